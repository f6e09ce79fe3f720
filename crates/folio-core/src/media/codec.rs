//! Element attributes <-> [`MediaAttrs`].
//!
//! Both directions are pure. For every record `a` with a non-blank source,
//! `decode(&encode(&a).to_attr_list()) == Some(a)`.

use super::{Alignment, InlineStyle, Length, MediaAttrs, WrapStyle};

pub const ATTR_SRC: &str = "src";
pub const ATTR_ALT: &str = "alt";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_ALIGN: &str = "data-align";
pub const ATTR_WRAP: &str = "data-wrap";
pub const ATTR_WRAP_MARGIN: &str = "data-wrap-margin";
pub const ATTR_WIDTH: &str = "width";
pub const ATTR_HEIGHT: &str = "height";
pub const ATTR_STYLE: &str = "style";

/// Attributes of a markup element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList(Vec<(String, String)>);

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`; attribute names are case-insensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The parsed `style` attribute (empty if absent).
    pub fn style(&self) -> InlineStyle {
        self.get(ATTR_STYLE).map(InlineStyle::parse).unwrap_or_default()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for AttrList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

/// The markup form of a media node: plain attributes plus an inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    /// Attributes in emission order, `style` excluded.
    pub attrs: Vec<(&'static str, String)>,
    pub style: InlineStyle,
}

impl EncodedMedia {
    /// All attributes, with `style` last when it has any declarations.
    pub fn to_attr_list(&self) -> AttrList {
        let mut list: AttrList = self.attrs.iter().map(|(n, v)| (*n, v.clone())).collect();
        if !self.style.is_empty() {
            list.push(ATTR_STYLE, self.style.to_string());
        }
        list
    }
}

/// Decode an image element's attributes.
///
/// Returns `None` only when the element has no usable `src`; every other
/// missing or unrecognized value falls back to its default.
pub fn decode(element: &AttrList) -> Option<MediaAttrs> {
    let source = element.get(ATTR_SRC)?;
    if source.trim().is_empty() {
        return None;
    }
    let style = element.style();

    let alignment = element
        .get(ATTR_ALIGN)
        .and_then(Alignment::parse)
        .unwrap_or_else(|| alignment_from_float(&style));

    let wrap_style = element
        .get(ATTR_WRAP)
        .and_then(WrapStyle::parse)
        .unwrap_or_default();

    let mut attrs = MediaAttrs::new(source)
        .with_alignment(alignment)
        .with_wrap_style(wrap_style);

    if let Some(margin) = element.get(ATTR_WRAP_MARGIN).and_then(Length::parse) {
        attrs.wrap_margin = margin;
    }
    attrs.width = dimension(element, &style, ATTR_WIDTH);
    attrs.height = dimension(element, &style, ATTR_HEIGHT);
    attrs.alt = element.get(ATTR_ALT).map(str::to_string);
    attrs.title = element.get(ATTR_TITLE).map(str::to_string);

    Some(attrs)
}

/// Encode a media record as element attributes and inline style.
pub fn encode(attrs: &MediaAttrs) -> EncodedMedia {
    let mut out = Vec::new();
    out.push((ATTR_SRC, attrs.source.clone()));
    if let Some(alt) = &attrs.alt {
        out.push((ATTR_ALT, alt.clone()));
    }
    if let Some(title) = &attrs.title {
        out.push((ATTR_TITLE, title.clone()));
    }
    out.push((ATTR_ALIGN, attrs.alignment.as_str().to_string()));
    // Emitted for every alignment; consumers ignore it when centered.
    out.push((ATTR_WRAP, attrs.wrap_style.as_str().to_string()));
    out.push((ATTR_WRAP_MARGIN, attrs.wrap_margin.to_string()));
    if let Some(width) = &attrs.width {
        out.push((ATTR_WIDTH, width.to_string()));
    }
    if let Some(height) = &attrs.height {
        out.push((ATTR_HEIGHT, height.to_string()));
    }

    let mut style = InlineStyle::new();
    match attrs.alignment {
        Alignment::Center => {
            style.push("display", "block");
            style.push("margin-left", "auto");
            style.push("margin-right", "auto");
            style.push("max-width", "100%");
        }
        Alignment::Left => {
            style.push("float", "left");
            style.push("margin-right", "1rem");
            style.push("max-width", "50%");
        }
        Alignment::Right => {
            style.push("float", "right");
            style.push("margin-left", "1rem");
            style.push("max-width", "50%");
        }
    }
    if let Some(width) = &attrs.width {
        style.push("width", width.to_css());
    }
    if let Some(height) = &attrs.height {
        style.push("height", height.to_css());
    }

    EncodedMedia { attrs: out, style }
}

/// Placement attributes present on `element` whose values `decode` could not
/// use, as `(attribute, value)` pairs. Each one decoded to its default.
pub fn rejected(element: &AttrList) -> Vec<(&'static str, String)> {
    let checks: [(&'static str, fn(&str) -> bool); 5] = [
        (ATTR_ALIGN, |v| Alignment::parse(v).is_some()),
        (ATTR_WRAP, |v| WrapStyle::parse(v).is_some()),
        (ATTR_WRAP_MARGIN, |v| Length::parse(v).is_some()),
        (ATTR_WIDTH, |v| Length::parse(v).is_some()),
        (ATTR_HEIGHT, |v| Length::parse(v).is_some()),
    ];
    checks
        .into_iter()
        .filter_map(|(name, valid)| {
            element
                .get(name)
                .filter(|value| !valid(value))
                .map(|value| (name, value.to_string()))
        })
        .collect()
}

fn alignment_from_float(style: &InlineStyle) -> Alignment {
    match style.get("float").map(str::to_ascii_lowercase).as_deref() {
        Some("left") => Alignment::Left,
        Some("right") => Alignment::Right,
        _ => Alignment::Center,
    }
}

fn dimension(element: &AttrList, style: &InlineStyle, name: &str) -> Option<Length> {
    element
        .get(name)
        .and_then(Length::parse)
        .or_else(|| style.get(name).and_then(Length::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(pairs: &[(&str, &str)]) -> AttrList {
        pairs.iter().copied().collect()
    }

    fn roundtrip(attrs: &MediaAttrs) -> Option<MediaAttrs> {
        decode(&encode(attrs).to_attr_list())
    }

    #[test]
    fn test_rejected_lists_fallbacks() {
        let el = element(&[
            ("src", "a.png"),
            ("data-align", "middle"),
            ("data-wrap", "tight"),
            ("width", " "),
        ]);
        assert_eq!(
            rejected(&el),
            vec![(ATTR_ALIGN, "middle".to_string()), (ATTR_WIDTH, " ".to_string())]
        );
        assert!(rejected(&element(&[("src", "a.png"), ("data-align", "LEFT")])).is_empty());
    }

    #[test]
    fn test_roundtrip_law() {
        for alignment in Alignment::ALL {
            for wrap in WrapStyle::ALL {
                let attrs = MediaAttrs::new("data:image/png;base64,AAAA")
                    .with_alignment(alignment)
                    .with_wrap_style(wrap);
                assert_eq!(roundtrip(&attrs), Some(attrs.clone()));

                let sized = attrs
                    .with_wrap_margin(Length::parse("2em").unwrap())
                    .with_size(Length::parse("320"), Length::parse("50%"))
                    .with_alt("a \"quoted\" caption");
                assert_eq!(roundtrip(&sized), Some(sized.clone()));
            }
        }
    }

    #[test]
    fn test_roundtrip_width_without_height() {
        let attrs = MediaAttrs::new("a.png").with_size(Length::parse("10rem"), None);
        assert_eq!(roundtrip(&attrs), Some(attrs));
    }

    #[test]
    fn test_data_align_wins_over_float() {
        let el = element(&[
            ("src", "a.png"),
            ("data-align", "right"),
            ("style", "float: left"),
        ]);
        assert_eq!(decode(&el).unwrap().alignment, Alignment::Right);
    }

    #[test]
    fn test_legacy_float_fallback() {
        let left = element(&[("src", "a.png"), ("style", "float:left")]);
        let right = element(&[("src", "a.png"), ("style", "margin: 0; float: RIGHT")]);
        let neither = element(&[("src", "a.png"), ("style", "display: block")]);
        assert_eq!(decode(&left).unwrap().alignment, Alignment::Left);
        assert_eq!(decode(&right).unwrap().alignment, Alignment::Right);
        assert_eq!(decode(&neither).unwrap().alignment, Alignment::Center);
    }

    #[test]
    fn test_invalid_data_align_falls_back_to_float() {
        let el = element(&[("src", "a.png"), ("data-align", "justify"), ("style", "float: left")]);
        assert_eq!(decode(&el).unwrap().alignment, Alignment::Left);
    }

    #[test]
    fn test_unknown_values_use_defaults() {
        let el = element(&[("src", "a.png"), ("data-wrap", "zigzag"), ("data-wrap-margin", " ")]);
        let attrs = decode(&el).unwrap();
        assert_eq!(attrs.wrap_style, WrapStyle::Square);
        assert_eq!(attrs.wrap_margin.as_str(), "0.5rem");
    }

    #[test]
    fn test_size_prefers_attribute_over_style() {
        let el = element(&[("src", "a.png"), ("width", "200"), ("style", "width: 90px; height: 40px")]);
        let attrs = decode(&el).unwrap();
        assert_eq!(attrs.width.unwrap().as_str(), "200");
        assert_eq!(attrs.height.unwrap().as_str(), "40px");
    }

    #[test]
    fn test_missing_src_is_not_media() {
        assert_eq!(decode(&element(&[("alt", "x")])), None);
        assert_eq!(decode(&element(&[("src", "  ")])), None);
    }

    #[test]
    fn test_wrap_emitted_for_every_alignment() {
        for alignment in Alignment::ALL {
            let encoded = encode(&MediaAttrs::new("a.png").with_alignment(alignment));
            let list = encoded.to_attr_list();
            assert_eq!(list.get("data-wrap"), Some("square"));
            assert_eq!(list.get("data-wrap-margin"), Some("0.5rem"));
            assert_eq!(list.get("data-align"), Some(alignment.as_str()));
        }
    }

    #[test]
    fn test_alignment_styles() {
        let center = encode(&MediaAttrs::new("a.png"));
        assert_eq!(center.style.get("display"), Some("block"));
        assert_eq!(center.style.get("max-width"), Some("100%"));
        assert_eq!(center.style.get("float"), None);

        let left = encode(&MediaAttrs::new("a.png").with_alignment(Alignment::Left));
        assert_eq!(left.style.get("float"), Some("left"));
        assert_eq!(left.style.get("margin-right"), Some("1rem"));
        assert_eq!(left.style.get("margin-left"), None);

        let right = encode(&MediaAttrs::new("a.png").with_alignment(Alignment::Right));
        assert_eq!(right.style.get("float"), Some("right"));
        assert_eq!(right.style.get("margin-left"), Some("1rem"));
        assert_eq!(right.style.get("margin-right"), None);
    }

    #[test]
    fn test_absent_size_emits_nothing() {
        let encoded = encode(&MediaAttrs::new("a.png"));
        let list = encoded.to_attr_list();
        assert_eq!(list.get("width"), None);
        assert_eq!(list.get("height"), None);
        assert_eq!(encoded.style.get("width"), None);
        assert_eq!(encoded.style.get("height"), None);
    }

    #[test]
    fn test_present_size_emits_attribute_and_style() {
        let attrs = MediaAttrs::new("a.png").with_size(Length::parse("300"), Length::parse("4em"));
        let encoded = encode(&attrs);
        let list = encoded.to_attr_list();
        assert_eq!(list.get("width"), Some("300"));
        assert_eq!(list.get("height"), Some("4em"));
        assert_eq!(encoded.style.get("width"), Some("300px"));
        assert_eq!(encoded.style.get("height"), Some("4em"));
    }
}
