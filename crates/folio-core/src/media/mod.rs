//! The embeddable image node's attribute record.
//!
//! [`MediaAttrs`] is the typed form of everything a media node knows about
//! itself. The [`codec`] module maps it to and from element attributes.

pub mod codec;
mod style;

pub use style::InlineStyle;

use crate::Properties;

/// Default spacing kept between wrapped text and the image.
pub const DEFAULT_WRAP_MARGIN: &str = "0.5rem";

/// Property keys used when media attributes are viewed as a [`Properties`] bag.
pub mod attr {
    pub const SOURCE: &str = "source";
    pub const ALIGNMENT: &str = "alignment";
    pub const WRAP_STYLE: &str = "wrap_style";
    pub const WRAP_MARGIN: &str = "wrap_margin";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const ALT: &str = "alt";
    pub const TITLE: &str = "title";
}

/// Horizontal placement of a media node.
///
/// Left and right imply a text-wrap layout; center implies a block layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Parse a markup value. Case and surrounding whitespace are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(value))
    }

    /// Whether text flows around a node with this alignment.
    pub fn wraps_text(self) -> bool {
        !matches!(self, Alignment::Center)
    }
}

/// Text-flow behavior around a left or right aligned media node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum WrapStyle {
    #[default]
    Square,
    Tight,
    Through,
    TopBottom,
    Behind,
    InFront,
}

impl WrapStyle {
    pub const ALL: [WrapStyle; 6] = [
        WrapStyle::Square,
        WrapStyle::Tight,
        WrapStyle::Through,
        WrapStyle::TopBottom,
        WrapStyle::Behind,
        WrapStyle::InFront,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WrapStyle::Square => "square",
            WrapStyle::Tight => "tight",
            WrapStyle::Through => "through",
            WrapStyle::TopBottom => "top-bottom",
            WrapStyle::Behind => "behind",
            WrapStyle::InFront => "in-front",
        }
    }

    /// Parse a markup value. Case and surrounding whitespace are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(value))
    }
}

/// A CSS length as written by the author (`"300px"`, `"50%"`, `"0.5rem"`).
///
/// Always trimmed, never empty, and never contains `;`, so it can be written
/// into an inline style rule as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Length(String);

impl Length {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.contains(';') {
            return None;
        }
        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as a CSS dimension; bare numbers are taken as pixels.
    pub fn to_css(&self) -> String {
        if self.0.chars().all(|c| c.is_ascii_digit() || c == '.') {
            format!("{}px", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Length {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Length::parse(&value).ok_or(value)
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.0
    }
}

/// Attributes of the embeddable image node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaAttrs {
    /// Image payload location; may be a data URI.
    pub source: String,
    pub alignment: Alignment,
    /// Only observable when `alignment` is left or right.
    pub wrap_style: WrapStyle,
    pub wrap_margin: Length,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

impl MediaAttrs {
    /// Attributes for `source` with every other attribute at its default.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alignment: Alignment::default(),
            wrap_style: WrapStyle::default(),
            wrap_margin: default_wrap_margin(),
            width: None,
            height: None,
            alt: None,
            title: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_wrap_style(mut self, wrap_style: WrapStyle) -> Self {
        self.wrap_style = wrap_style;
        self
    }

    pub fn with_wrap_margin(mut self, margin: Length) -> Self {
        self.wrap_margin = margin;
        self
    }

    pub fn with_size(mut self, width: Option<Length>, height: Option<Length>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// The wrap style that actually applies: `None` for centered media.
    pub fn effective_wrap(&self) -> Option<WrapStyle> {
        self.alignment.wraps_text().then_some(self.wrap_style)
    }

    /// View the attributes as a property bag. Absent attributes are omitted.
    pub fn to_props(&self) -> Properties {
        let mut props = Properties::new();
        if !self.source.is_empty() {
            props.set(attr::SOURCE, self.source.as_str());
        }
        props.set(attr::ALIGNMENT, self.alignment.as_str());
        props.set(attr::WRAP_STYLE, self.wrap_style.as_str());
        props.set(attr::WRAP_MARGIN, self.wrap_margin.as_str());
        if let Some(width) = &self.width {
            props.set(attr::WIDTH, width.as_str());
        }
        if let Some(height) = &self.height {
            props.set(attr::HEIGHT, height.as_str());
        }
        if let Some(alt) = &self.alt {
            props.set(attr::ALT, alt.as_str());
        }
        if let Some(title) = &self.title {
            props.set(attr::TITLE, title.as_str());
        }
        props
    }

    /// Property view of the defaults, used when no media node is selected.
    pub fn default_props() -> Properties {
        MediaAttrs::new("").to_props()
    }
}

fn default_wrap_margin() -> Length {
    Length(DEFAULT_WRAP_MARGIN.to_string())
}
