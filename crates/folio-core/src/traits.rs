//! Reader/writer options, error types and the `Transformer` trait.

use crate::Document;

/// Options for parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Keep whitespace runs in text verbatim instead of collapsing them.
    pub preserve_whitespace: bool,
}

/// Options for emitting.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Put each top-level block on its own line where applicable.
    pub pretty: bool,
}

/// Error during parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during emitting.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("unsupported node kind: {0}")]
    UnsupportedNode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("transform failed: {0}")]
    Failed(String),
}

/// Transform a document (same tree type, modified content).
pub trait Transformer {
    /// Name of this transformer.
    fn name(&self) -> &str;

    /// Transform a document.
    fn transform(&self, doc: Document) -> Result<Document, TransformError>;
}
