//! Caller-supplied overrides applied on insertion.

use folio_core::media::{Alignment, Length, MediaAttrs, WrapStyle};

/// A partial [`MediaAttrs`]: every `Some` field overrides the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaAttrsPatch {
    pub alignment: Option<Alignment>,
    pub wrap_style: Option<WrapStyle>,
    pub wrap_margin: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

impl MediaAttrsPatch {
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn wrap_style(mut self, wrap_style: WrapStyle) -> Self {
        self.wrap_style = Some(wrap_style);
        self
    }

    pub fn wrap_margin(mut self, margin: Length) -> Self {
        self.wrap_margin = Some(margin);
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Overwrite the fields of `attrs` that this patch sets.
    pub fn apply_to(&self, attrs: &mut MediaAttrs) {
        if let Some(alignment) = self.alignment {
            attrs.alignment = alignment;
        }
        if let Some(wrap_style) = self.wrap_style {
            attrs.wrap_style = wrap_style;
        }
        if let Some(margin) = &self.wrap_margin {
            attrs.wrap_margin = margin.clone();
        }
        if let Some(width) = &self.width {
            attrs.width = Some(width.clone());
        }
        if let Some(height) = &self.height {
            attrs.height = Some(height.clone());
        }
        if let Some(alt) = &self.alt {
            attrs.alt = Some(alt.clone());
        }
        if let Some(title) = &self.title {
            attrs.title = Some(title.clone());
        }
    }
}
