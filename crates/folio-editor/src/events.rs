//! Values delivered to subscribers.

use std::fmt;

/// Fired once per commit that changed the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// The full serialized document after the commit.
    pub html: String,
    pub word_count: usize,
}

/// A word-limit policy outcome the user should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitWarning {
    /// The document went over the limit and was cut to its first `limit` words.
    Truncated { limit: usize },
    /// A paste was refused because it would not fit.
    PasteRejected { limit: usize, remaining: usize },
}

impl LimitWarning {
    pub fn limit(&self) -> usize {
        match self {
            LimitWarning::Truncated { limit } | LimitWarning::PasteRejected { limit, .. } => *limit,
        }
    }
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitWarning::Truncated { limit } => {
                write!(f, "Content exceeds the {limit}-word limit and was truncated")
            }
            LimitWarning::PasteRejected { limit, remaining } => write!(
                f,
                "Paste exceeds the {limit}-word limit; {remaining} words remaining"
            ),
        }
    }
}
