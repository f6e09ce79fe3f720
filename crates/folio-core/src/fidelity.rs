//! What a reader or writer could not carry over.

/// Output of a conversion plus the losses it reported.
#[derive(Debug)]
pub struct ConversionResult<T> {
    pub value: T,
    pub warnings: Vec<FidelityWarning>,
}

impl<T> ConversionResult<T> {
    /// A lossless result.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<FidelityWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// One loss noticed during a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FidelityWarning {
    pub severity: Severity,
    pub kind: WarningKind,
    pub message: String,
}

impl FidelityWarning {
    pub fn new(severity: Severity, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
        }
    }

    /// An attribute value that was not understood; its default applies.
    pub fn unsupported_property(element: &str, attr: &str, value: &str) -> Self {
        Self::new(
            Severity::Minor,
            WarningKind::UnsupportedProperty(format!("{element}:{attr}")),
            format!("Unrecognized {attr}={value:?} on <{element}>, default used"),
        )
    }

    /// An element outside the vocabulary whose content was kept.
    pub fn unsupported_node(tag: &str) -> Self {
        Self::new(
            Severity::Minor,
            WarningKind::UnsupportedNode(format!("html:{tag}")),
            format!("Unknown HTML element: {tag}"),
        )
    }
}

impl std::fmt::Display for FidelityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Presentation may differ; content is intact.
    Minor,
    /// Content was dropped.
    Major,
}

/// What was lost. Each variant names the element or attribute concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Attribute value not recognized, default used instead.
    UnsupportedProperty(String),
    /// Element not supported, dropped (its content is kept).
    UnsupportedNode(String),
    /// Content dropped entirely.
    FeatureLost(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_property_names_attribute() {
        let warning = FidelityWarning::unsupported_property("img", "data-align", "middle");
        assert_eq!(
            warning.kind,
            WarningKind::UnsupportedProperty("img:data-align".to_string())
        );
        assert_eq!(warning.severity, Severity::Minor);
        assert_eq!(
            warning.to_string(),
            r#"Unrecognized data-align="middle" on <img>, default used"#
        );
    }

    #[test]
    fn test_has_warnings() {
        let clean = ConversionResult::ok(());
        assert!(!clean.has_warnings());
        let lossy = ConversionResult::with_warnings((), vec![FidelityWarning::unsupported_node("blink")]);
        assert!(lossy.has_warnings());
        assert!(Severity::Minor < Severity::Major);
    }
}
