#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ids::BlockId;
use crate::utils::string_builder::StringBuilder;

/// A paragraph of the document: a line of text without its line break.
///
/// The text is never edited in place; edits produce a new `Block` with the
/// same id.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    text: String,
    length: usize,
}

impl Block {
    pub(crate) fn new(id: BlockId, text: String) -> Self {
        let length = text.chars().count();
        Self { id, text, length }
    }

    #[must_use]
    pub fn id(&self) -> BlockId { self.id }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    /// Length of the text in characters.
    #[must_use]
    pub fn len(&self) -> usize { self.length }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.length == 0 }

    /// The characters in `start..end`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    pub(crate) fn with_removed(&self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= self.length, "Range must be within the block");

        let mut builder = StringBuilder::new(&self.text);
        builder.retain(start);
        builder.delete(end - start);
        builder.retain_rest();

        Self::new(self.id, builder.take())
    }

    /// Appends `other`'s text, keeping this block's id.
    pub(crate) fn joined(&self, other: &Block) -> Self {
        Self {
            id: self.id,
            text: format!("{}{}", self.text, other.text),
            length: self.length + other.length,
        }
    }
}
