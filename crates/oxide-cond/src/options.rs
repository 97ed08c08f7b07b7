//! Parser configuration.

/// Default nesting limit for brackets, comparison chains and subqueries.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options shared by every parser working on one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth before parsing fails with
    /// [`ParseError::DepthLimitExceeded`](crate::ParseError::DepthLimitExceeded).
    pub max_depth: usize,
}

impl ParseOptions {
    /// Creates options with the given nesting limit.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }
}
