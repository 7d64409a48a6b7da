//! Indentation configuration for code generation.

/// Indentation for generated code: a fixed number of spaces per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    width: usize,
}

impl Indent {
    /// 4-space indentation, used for all generated C and C++.
    pub const C: Self = Self::spaces(4);

    pub const fn spaces(width: usize) -> Self {
        Self { width }
    }

    /// Spaces per indent level.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::C
    }
}
