//! Raw image bytes -> self-contained `data:` URI.

use base64::Engine;
use folio_core::Resource;

/// Encode a resource as a base64 data URI suitable for a media `source`.
pub fn to_data_uri(resource: &Resource) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&resource.data);
    format!("data:{};base64,{}", resource.mime_type, encoded)
}
