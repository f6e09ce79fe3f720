//! Raw embedded content handed to the editor by the host (picked image files).

/// An embeddable resource: raw bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Original filename or identifier.
    pub name: Option<String>,
    /// MIME type.
    pub mime_type: String,
    /// Raw data.
    pub data: Vec<u8>,
}

impl Resource {
    /// Create a new resource.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: None,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Set the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Create a PNG image resource.
    pub fn png(data: Vec<u8>) -> Self {
        Self::new("image/png", data)
    }

    /// Create a JPEG image resource.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new("image/jpeg", data)
    }

    /// Image MIME type for a file extension, if it is one we recognize.
    pub fn image_mime_for_extension(ext: &str) -> Option<&'static str> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            "bmp" => Some("image/bmp"),
            "avif" => Some("image/avif"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(Resource::image_mime_for_extension("PNG"), Some("image/png"));
        assert_eq!(Resource::image_mime_for_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(Resource::image_mime_for_extension("txt"), None);
    }
}
