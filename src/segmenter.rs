use std::fmt::Display;

use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    AnnotationKind,
    diffs::{RawOperation, diff_chars},
};

/// How a fragment relates the base text to the candidate text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Unchanged,
    Added,
    Removed,
}

impl FragmentKind {
    /// The kind of annotation a fragment of this kind turns into, if any.
    #[must_use]
    pub fn annotation_kind(self) -> Option<AnnotationKind> {
        match self {
            FragmentKind::Unchanged => None,
            FragmentKind::Added => Some(AnnotationKind::Added),
            FragmentKind::Removed => Some(AnnotationKind::Removed),
        }
    }
}

impl Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentKind::Unchanged => write!(f, "unchanged"),
            FragmentKind::Added => write!(f, "added"),
            FragmentKind::Removed => write!(f, "removed"),
        }
    }
}

/// A piece of diff output that never spans more than one line, addressed by
/// its position in the annotated document: the block it falls into and its
/// character range within that block.
///
/// A line break is its own fragment with `value == "\n"`; it sits at the end
/// of the block it closes and has an empty range.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFragment {
    pub value: String,
    pub kind: FragmentKind,
    pub block_index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl DiffFragment {
    #[must_use]
    pub fn is_added(&self) -> bool { self.kind == FragmentKind::Added }

    #[must_use]
    pub fn is_removed(&self) -> bool { self.kind == FragmentKind::Removed }

    #[must_use]
    pub fn is_line_break(&self) -> bool { self.value == "\n" }
}

/// Tracks where the next fragment lands in the annotated document. Every
/// fragment moves it, whatever its kind, since unchanged, removed and added
/// text all end up in the annotated document.
#[derive(Debug, Default)]
struct Cursor {
    block_index: usize,
    offset: usize,
}

impl Cursor {
    fn text_fragment(&mut self, kind: FragmentKind, value: &str) -> DiffFragment {
        let start_offset = self.offset;
        self.offset += value.chars().count();

        DiffFragment {
            value: value.to_owned(),
            kind,
            block_index: self.block_index,
            start_offset,
            end_offset: self.offset,
        }
    }

    fn line_break(&mut self, kind: FragmentKind) -> DiffFragment {
        let fragment = DiffFragment {
            value: "\n".to_owned(),
            kind,
            block_index: self.block_index,
            start_offset: self.offset,
            end_offset: self.offset,
        };

        self.block_index += 1;
        self.offset = 0;

        fragment
    }
}

/// Diff `old_text` against `new_text` character by character and chop the
/// result at every line break.
///
/// Offsets refer to the annotated document, which contains the unchanged,
/// the removed and the added text alike, in diff order. Because they come
/// from a cursor that only moves forward, applying the fragments in order
/// never invalidates the position of a later one.
///
/// ```
/// use annotated_diff::{FragmentKind, segment};
///
/// let fragments = segment("hello", "hello world");
///
/// assert_eq!(fragments.len(), 2);
/// assert_eq!(fragments[1].kind, FragmentKind::Added);
/// assert_eq!(fragments[1].value, " world");
/// assert_eq!((fragments[1].start_offset, fragments[1].end_offset), (5, 11));
/// ```
#[must_use]
pub fn segment(old_text: &str, new_text: &str) -> Vec<DiffFragment> {
    let mut cursor = Cursor::default();
    let mut fragments = Vec::new();

    for raw_operation in diff_chars(old_text, new_text) {
        let kind = match raw_operation {
            RawOperation::Equal(_) => FragmentKind::Unchanged,
            RawOperation::Insert(_) => FragmentKind::Added,
            RawOperation::Delete(_) => FragmentKind::Removed,
        };
        let text = raw_operation.text();

        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                fragments.push(cursor.text_fragment(kind, line));
            }

            if lines.peek().is_some() {
                fragments.push(cursor.line_break(kind));
            }
        }
    }

    for fragment in &fragments {
        trace!(
            "{} fragment {:?} at block {}, {}..{}",
            fragment.kind,
            fragment.value,
            fragment.block_index,
            fragment.start_offset,
            fragment.end_offset
        );
    }

    fragments
}
