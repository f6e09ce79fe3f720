//! Attribute-editing commands for a selected media node.

use folio_core::media::{Alignment, Length, MediaAttrs, WrapStyle};

/// One in-place edit of a media node's attributes.
///
/// Commands are plain values; the editor decides which node they target
/// and reports "not applicable" when no media node is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCommand {
    SetAlignment(Alignment),
    SetWrapStyle(WrapStyle),
    SetWrapMargin(Length),
    /// Set the width. A `None` height leaves the current height untouched.
    SetSize {
        width: Length,
        height: Option<Length>,
    },
    /// Drop explicit dimensions, returning to the intrinsic size.
    ClearSize,
}

impl MediaCommand {
    /// Apply to `attrs`. Returns whether anything changed.
    pub fn apply(&self, attrs: &mut MediaAttrs) -> bool {
        let before = attrs.clone();
        match self {
            MediaCommand::SetAlignment(alignment) => attrs.alignment = *alignment,
            MediaCommand::SetWrapStyle(wrap_style) => attrs.wrap_style = *wrap_style,
            MediaCommand::SetWrapMargin(margin) => attrs.wrap_margin = margin.clone(),
            MediaCommand::SetSize { width, height } => {
                attrs.width = Some(width.clone());
                if let Some(height) = height {
                    attrs.height = Some(height.clone());
                }
            }
            MediaCommand::ClearSize => {
                attrs.width = None;
                attrs.height = None;
            }
        }
        *attrs != before
    }

    pub fn name(&self) -> &'static str {
        match self {
            MediaCommand::SetAlignment(_) => "set_alignment",
            MediaCommand::SetWrapStyle(_) => "set_wrap_style",
            MediaCommand::SetWrapMargin(_) => "set_wrap_margin",
            MediaCommand::SetSize { .. } => "set_size",
            MediaCommand::ClearSize => "clear_size",
        }
    }
}
