use std::{slice, str::Chars};

use log::{debug, trace};

use crate::{
    Annotation, AnnotationKind, BlockId, Document, ProjectionError,
    document::{Block, IdGenerator},
    segmenter::{DiffFragment, FragmentKind},
};

/// Apply `fragments` to a copy of `base`, returning the annotated document.
///
/// Added text is inserted into the document and annotated, removed text is
/// annotated in place, and unchanged text is only checked against the
/// document. Line breaks split blocks (when added) or must coincide with an
/// existing block boundary (when removed or unchanged). Every added or
/// removed fragment results in exactly one annotation.
///
/// The fragments must be in diff order and computed against the text of
/// `base`, as returned by [`crate::segment`]. Text between fragments is
/// carried over unchanged. The document is built in a single pass over
/// `base` and `fragments`.
///
/// # Errors
///
/// Returns a [`ProjectionError`] if `base` has pending annotations or if a
/// fragment doesn't fit the document, for example because it addresses a
/// block that doesn't exist, a range beyond the end of its block or text that
/// differs from the document's. The fragments then weren't derived from
/// `base`.
pub fn project<'a, I>(base: &Document, fragments: I) -> Result<Document, ProjectionError>
where
    I: IntoIterator<Item = &'a DiffFragment>,
{
    if base.annotation_count() > 0 {
        return Err(ProjectionError::AnnotatedBase {
            count: base.annotation_count(),
        });
    }

    let mut projection = Projection::new(base);
    let mut fragment_count = 0;

    for fragment in fragments {
        trace!("Projecting {fragment:?}");
        projection.apply(fragment)?;
        fragment_count += 1;
    }

    let document = projection.finish();

    debug!(
        "Projected {fragment_count} fragments onto {} blocks, creating {} annotations",
        document.blocks().len(),
        document.annotation_count()
    );
    debug_assert!(document.is_consistent(), "Projection must keep the document consistent");

    Ok(document)
}

/// The annotated document under construction. Fragments arrive in document
/// order, so the base is read once from front to back while blocks are
/// completed one after the other.
struct Projection<'a> {
    /// Base blocks not reached yet.
    upcoming: slice::Iter<'a, Block>,
    /// The unread rest of the current base block.
    line: Chars<'a>,
    line_remaining: usize,

    block_id: BlockId,
    text: String,
    offset: usize,

    blocks: Vec<Block>,
    annotations: Vec<Annotation>,
    ids: IdGenerator,
}

impl<'a> Projection<'a> {
    fn new(base: &'a Document) -> Self {
        let mut ids = base.ids().clone();
        let mut upcoming = base.blocks().iter();
        let (block_id, line, line_remaining) = match upcoming.next() {
            Some(block) => (block.id(), block.text().chars(), block.len()),
            None => (ids.next_block_id(), "".chars(), 0),
        };

        Self {
            upcoming,
            line,
            line_remaining,
            block_id,
            text: String::new(),
            offset: 0,
            blocks: Vec::with_capacity(base.blocks().len()),
            annotations: Vec::new(),
            ids,
        }
    }

    fn apply(&mut self, fragment: &DiffFragment) -> Result<(), ProjectionError> {
        let DiffFragment {
            value,
            kind,
            block_index,
            start_offset: start,
            end_offset: end,
        } = fragment;
        let (kind, block_index, start, end) = (*kind, *block_index, *start, *end);

        if start > end {
            return Err(ProjectionError::InvertedRange { start, end });
        }

        if fragment.is_line_break() {
            self.seek(block_index, start, end)?;
            return self.apply_line_break(kind, value);
        }

        let length = value.chars().count();
        if end - start != length {
            return Err(ProjectionError::LengthMismatch { start, end, length });
        }

        self.seek(block_index, start, end)?;

        match kind {
            FragmentKind::Added => {
                self.text.push_str(value);
                self.offset += length;
            }
            FragmentKind::Removed | FragmentKind::Unchanged => {
                if length > self.line_remaining {
                    return Err(ProjectionError::OffsetExceedsBlock {
                        block_id: self.block_id,
                        start,
                        end,
                        available: self.available(),
                    });
                }

                let found = self.carry(length);
                if found != *value {
                    return Err(ProjectionError::TextMismatch {
                        block_id: self.block_id,
                        start,
                        expected: value.clone(),
                        found,
                    });
                }
            }
        }

        if let Some(annotation_kind) = kind.annotation_kind().filter(|_| length > 0) {
            self.annotate(annotation_kind, start, end, value);
        }

        Ok(())
    }

    fn apply_line_break(&mut self, kind: FragmentKind, value: &str) -> Result<(), ProjectionError> {
        let offset = self.offset;

        match kind {
            FragmentKind::Added => {
                self.annotate(AnnotationKind::Added, offset, offset, value);
                let tail_id = self.ids.next_block_id();
                self.close_block(tail_id);
            }
            FragmentKind::Removed | FragmentKind::Unchanged => {
                if self.line_remaining > 0 || self.upcoming.as_slice().is_empty() {
                    return Err(ProjectionError::MisplacedLineBreak {
                        block_id: self.block_id,
                        offset,
                        available: self.available(),
                    });
                }

                if let Some(annotation_kind) = kind.annotation_kind() {
                    self.annotate(annotation_kind, offset, offset, value);
                }
                self.enter_next_base_block();
            }
        }

        Ok(())
    }

    /// Carry unchanged base text over until the cursor reaches `start` of the
    /// block at `block_index`.
    fn seek(&mut self, block_index: usize, start: usize, end: usize) -> Result<(), ProjectionError> {
        if (block_index, start) < (self.blocks.len(), self.offset) {
            return Err(ProjectionError::OutOfOrder {
                block_index,
                offset: start,
                expected_block_index: self.blocks.len(),
                expected_offset: self.offset,
            });
        }

        while self.blocks.len() < block_index {
            let block_count = self.blocks.len() + 1 + self.upcoming.len();
            if !self.enter_next_base_block() {
                return Err(ProjectionError::BlockIndexOutOfRange {
                    block_index,
                    block_count,
                });
            }
        }

        let gap = start - self.offset;
        if gap > self.line_remaining {
            return Err(ProjectionError::OffsetExceedsBlock {
                block_id: self.block_id,
                start,
                end,
                available: self.available(),
            });
        }
        self.carry(gap);

        Ok(())
    }

    /// Length of the current block if the rest of its base text is kept.
    fn available(&self) -> usize { self.offset + self.line_remaining }

    /// Move the next `length` characters of the base block into the current
    /// block and return them.
    fn carry(&mut self, length: usize) -> String {
        let carried: String = self.line.by_ref().take(length).collect();
        self.text.push_str(&carried);
        self.offset += length;
        self.line_remaining -= length;

        carried
    }

    fn close_block(&mut self, next_id: BlockId) {
        let text = std::mem::take(&mut self.text);
        self.blocks.push(Block::new(self.block_id, text));
        self.block_id = next_id;
        self.offset = 0;
    }

    /// Finish the current block with the rest of its base text and continue
    /// with the next base block. Returns `false` at the last base block.
    fn enter_next_base_block(&mut self) -> bool {
        let Some(next) = self.upcoming.next() else {
            return false;
        };

        self.carry(self.line_remaining);
        self.close_block(next.id());
        self.line = next.text().chars();
        self.line_remaining = next.len();

        true
    }

    fn annotate(&mut self, kind: AnnotationKind, start: usize, end: usize, value: &str) {
        self.annotations.push(Annotation {
            key: self.ids.next_annotation_key(),
            kind,
            block_id: self.block_id,
            start,
            end,
            payload: value.to_owned(),
        });
    }

    fn finish(mut self) -> Document {
        while self.enter_next_base_block() {}
        self.carry(self.line_remaining);
        self.blocks.push(Block::new(self.block_id, self.text));

        Document::from_parts(self.blocks, self.annotations, self.ids)
    }
}
