//! Minimal inline `style` attribute handling.

/// An ordered list of CSS declarations from (or for) a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle(Vec<(String, String)>);

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a: b; c: d`. Declarations without a colon are skipped.
    pub fn parse(input: &str) -> Self {
        let decls = input
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim();
                (!name.is_empty() && !value.is_empty()).then(|| (name, value.to_string()))
            })
            .collect();
        Self(decls)
    }

    /// Last value declared for `property` (later declarations win in CSS).
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, property: &str, value: impl Into<String>) {
        self.0.push((property.to_string(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let style = InlineStyle::parse("FLOAT: Left ; width:300px;; bogus");
        assert_eq!(style.get("float"), Some("Left"));
        assert_eq!(style.get("width"), Some("300px"));
        assert_eq!(style.get("bogus"), None);
    }

    #[test]
    fn test_later_declaration_wins() {
        let style = InlineStyle::parse("float: left; float: right");
        assert_eq!(style.get("float"), Some("right"));
    }

    #[test]
    fn test_display() {
        let mut style = InlineStyle::new();
        style.push("float", "left");
        style.push("margin-right", "1rem");
        assert_eq!(style.to_string(), "float: left; margin-right: 1rem");
        assert_eq!(InlineStyle::parse(&style.to_string()), style);
    }
}
