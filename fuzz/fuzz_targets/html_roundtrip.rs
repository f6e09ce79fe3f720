#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(first) = folio_read_html::parse(s) else {
        return;
    };
    let Ok(emitted) = folio_write_html::emit(&first.value) else {
        return;
    };
    let html1 = String::from_utf8_lossy(&emitted.value).into_owned();

    // Canonical output must be a fixpoint
    let second = folio_read_html::parse(&html1).expect("canonical output parses");
    let emitted = folio_write_html::emit(&second.value).expect("canonical output emits");
    let html2 = String::from_utf8_lossy(&emitted.value);

    assert_eq!(html1, html2, "serialization not stable");
});
