#![no_main]

use folio_core::media::codec::{self, AttrList};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|pairs: Vec<(String, String)>| {
    let element: AttrList = pairs.into_iter().collect();

    // Whatever decodes must survive encode then decode unchanged
    if let Some(attrs) = codec::decode(&element) {
        let again = codec::decode(&codec::encode(&attrs).to_attr_list());
        assert_eq!(again, Some(attrs));
    }
});
