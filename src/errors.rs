use thiserror::Error;

use crate::document::BlockId;

/// Error type for fragments that cannot be projected onto a document.
///
/// Fragments produced by [`crate::segment`] always project cleanly onto the
/// unannotated document they were computed against, so any of these variants
/// indicates a mismatch between the fragments and the base document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The base document still carries annotations from an earlier projection
    #[error(
        "Cannot project onto a document with {count} pending annotations, resolve or drop them \
         first"
    )]
    AnnotatedBase {
        /// The number of pending annotations on the base document
        count: usize,
    },

    /// The fragment addresses a block past the end of the document
    #[error(
        "Invalid fragment: block index {block_index} is out of range, the document only has \
         {block_count} blocks"
    )]
    BlockIndexOutOfRange {
        /// The block index the fragment refers to
        block_index: usize,
        /// The number of blocks in the document when the fragment was applied
        block_count: usize,
    },

    /// The fragment's range ends before it starts
    #[error("Invalid fragment: start offset {start} is after end offset {end}")]
    InvertedRange {
        /// The start offset of the fragment
        start: usize,
        /// The end offset of the fragment
        end: usize,
    },

    /// The fragment's range doesn't match the length of its text
    #[error(
        "Invalid fragment: range {start}..{end} doesn't match the fragment's length of {length} \
         characters"
    )]
    LengthMismatch {
        /// The start offset of the fragment
        start: usize,
        /// The end offset of the fragment
        end: usize,
        /// The number of characters in the fragment's value
        length: usize,
    },

    /// The fragment's range exceeds the text of the addressed block
    #[error(
        "Invalid fragment: range {start}..{end} exceeds block {block_id} which only has \
         {available} characters"
    )]
    OffsetExceedsBlock {
        /// The block the fragment was applied to
        block_id: BlockId,
        /// The start offset of the fragment
        start: usize,
        /// The end offset of the fragment
        end: usize,
        /// The number of characters in the block
        available: usize,
    },

    /// A removed or unchanged line break must coincide with a block boundary
    /// of the base document
    #[error(
        "Invalid fragment: line break at offset {offset} of block {block_id} does not match a \
         block boundary (block has {available} characters)"
    )]
    MisplacedLineBreak {
        /// The block the line break was applied to
        block_id: BlockId,
        /// The offset of the line break
        offset: usize,
        /// The number of characters in the block
        available: usize,
    },

    /// A fragment starts before the end of the fragment preceding it
    #[error(
        "Invalid fragment: position {offset} of block {block_index} lies before the end of the \
         previous fragment at position {expected_offset} of block {expected_block_index}"
    )]
    OutOfOrder {
        /// The block index the fragment refers to
        block_index: usize,
        /// The start offset of the fragment
        offset: usize,
        /// The block index the previous fragment ended in
        expected_block_index: usize,
        /// The offset the previous fragment ended at
        expected_offset: usize,
    },

    /// A removed or unchanged fragment doesn't match the text it covers
    #[error(
        "Invalid fragment: expected {expected:?} at offset {start} of block {block_id} but the \
         document has {found:?}"
    )]
    TextMismatch {
        /// The block the fragment was applied to
        block_id: BlockId,
        /// The start offset of the fragment
        start: usize,
        /// The text of the fragment
        expected: String,
        /// The text of the document under the fragment's range
        found: String,
    },
}
