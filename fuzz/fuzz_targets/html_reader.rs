#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed markup must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = folio_read_html::parse(s);
    }
});
