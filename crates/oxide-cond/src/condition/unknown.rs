//! Catch-all leaf for conditions no grammar recognizes.

use core::fmt;

use super::simple::render_raw;
use crate::lexer::TokenList;

/// A leaf no grammar recognized, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NotYetImplementedCondition {
    /// Source text of the whole leaf.
    pub raw: String,
}

impl NotYetImplementedCondition {
    /// Consumes every token from the cursor to the end of the list.
    #[must_use]
    pub fn parse(list: &mut TokenList) -> Self {
        let raw = render_raw(list.remaining());
        list.seek(list.len());
        Self { raw }
    }
}

impl fmt::Display for NotYetImplementedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A trailing `--` followed by a space would lex as a comment.
        if self.raw.ends_with('-') {
            write!(f, "({})", self.raw)
        } else {
            f.write_str(&self.raw)
        }
    }
}
