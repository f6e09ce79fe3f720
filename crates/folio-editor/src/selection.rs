//! Selections over flat document positions.

/// An anchor/head pair of positions; collapsed when both are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Clamp arbitrary (possibly negative) bounds into `[0, size]`.
    pub fn clamped(anchor: i64, head: i64, size: usize) -> Self {
        let clamp = |p: i64| usize::try_from(p.max(0)).unwrap_or(usize::MAX).min(size);
        Self::new(clamp(anchor), clamp(head))
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Both bounds limited to `size`.
    pub fn clamp_to(self, size: usize) -> Self {
        Self::new(self.anchor.min(size), self.head.min(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        let sel = Selection::clamped(-5, 110, 10);
        assert_eq!(sel, Selection::new(0, 10));
        assert_eq!(Selection::clamped(i64::MIN, i64::MAX, 3), Selection::new(0, 3));
    }

    #[test]
    fn test_from_to_order() {
        let sel = Selection::new(7, 2);
        assert_eq!((sel.from(), sel.to()), (2, 7));
        assert!(!sel.is_collapsed());
        assert!(Selection::caret(4).is_collapsed());
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(Selection::new(3, 12).clamp_to(5), Selection::new(3, 5));
    }
}
