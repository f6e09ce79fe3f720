//! HTML reader for folio.
//!
//! Parses HTML5 (whole pages or fragments) into a normalized folio document.
//! Image elements are decoded through the media attribute codec; elements
//! outside the vocabulary are dropped with a fidelity warning while their
//! content is kept.

use folio_core::{ConversionResult, Document, ParseError, ParseOptions};

mod dom;

/// Parse HTML text into a folio Document.
pub fn parse(input: &str) -> Result<ConversionResult<Document>, ParseError> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse HTML with custom options.
pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<ConversionResult<Document>, ParseError> {
    let result = dom::parse_with_options(input, options)?;
    tracing::debug!(
        bytes = input.len(),
        blocks = result.value.content.children.len(),
        warnings = result.warnings.len(),
        "parsed html"
    );
    Ok(result)
}
