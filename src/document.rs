mod annotation;
mod block;
mod ids;
mod span;

use std::collections::{BTreeMap, HashMap};

pub use annotation::{Annotation, AnnotationKind};
pub use block::Block;
pub use ids::{AnnotationKey, BlockId};
pub(crate) use ids::IdGenerator;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use span::AnnotatedSpan;

use crate::utils::string_builder::StringBuilder;

/// The separator placed between blocks when a document is turned into plain
/// text.
pub const LINE_SEPARATOR: &str = "\n";

/// Whether the text under a resolved annotation stays in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Keep,
    Erase,
}

/// A text document made of blocks (paragraphs) with a side table of pending
/// annotations.
///
/// Blocks are kept in document order and carry stable ids; annotations
/// reference blocks by id, never by position, so splitting or joining blocks
/// cannot leave an annotation dangling.
///
/// ```
/// use annotated_diff::Document;
///
/// let document = Document::from_text("first line\nsecond line");
/// assert_eq!(document.blocks().len(), 2);
/// assert_eq!(document.plain_text(), "first line\nsecond line");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    annotations: BTreeMap<AnnotationKey, Annotation>,
    ids: IdGenerator,
}

impl Document {
    /// Create a document without annotations by splitting `text` into blocks
    /// at each `'\n'`. The empty string results in a single empty block.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut ids = IdGenerator::default();
        let blocks = text
            .split('\n')
            .map(|line| Block::new(ids.next_block_id(), line.to_owned()))
            .collect();

        Self::from_parts(blocks, Vec::new(), ids)
    }

    /// A document whose future ids come from `ids`, which must not have handed
    /// out any of the ids in `blocks` and `annotations` yet.
    pub(crate) fn from_parts(blocks: Vec<Block>, annotations: Vec<Annotation>, ids: IdGenerator) -> Self {
        Self {
            blocks,
            annotations: annotations
                .into_iter()
                .map(|annotation| (annotation.key, annotation))
                .collect(),
            ids,
        }
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] { &self.blocks }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.block_position(id).map(|position| &self.blocks[position])
    }

    /// The current position of the block with `id`.
    #[must_use]
    pub fn block_position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    #[must_use]
    pub fn annotation(&self, key: AnnotationKey) -> Option<&Annotation> {
        self.annotations.get(&key)
    }

    /// All pending annotations in key (creation) order. Use
    /// [`crate::list_annotations`] for document order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> { self.annotations.values() }

    #[must_use]
    pub fn annotation_count(&self) -> usize { self.annotations.len() }

    /// The text of the document with every annotation ignored, blocks joined by
    /// [`LINE_SEPARATOR`]. Added spans are included, removed spans too.
    #[must_use]
    pub fn plain_text(&self) -> String { self.plain_text_with_separator(LINE_SEPARATOR) }

    #[must_use]
    pub fn plain_text_with_separator(&self, separator: &str) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Checks that every annotation lies within its block, that annotations
    /// on the same block don't overlap, and that line breaks sit at the end of
    /// a block that has a following block.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let last = self.blocks.len().saturating_sub(1);
        let blocks: HashMap<BlockId, (usize, usize)> = self
            .blocks
            .iter()
            .enumerate()
            .map(|(position, block)| (block.id(), (position, block.len())))
            .collect();

        self.annotations.values().all(|annotation| {
            blocks.get(&annotation.block_id).is_some_and(|&(position, length)| {
                annotation.start <= annotation.end
                    && annotation.end <= length
                    && (!annotation.is_line_break()
                        || (annotation.start == length && position < last))
            })
        }) && self.annotations_by_block().values().all(|annotations| {
            annotations
                .windows(2)
                .all(|pair| pair[0].end <= pair[1].start)
        })
    }

    /// Annotations grouped by block, each group ordered by start offset and
    /// then by key.
    pub(crate) fn annotations_by_block(&self) -> HashMap<BlockId, Vec<&Annotation>> {
        let mut grouped: HashMap<BlockId, Vec<&Annotation>> = HashMap::new();
        for annotation in self.annotations.values() {
            grouped.entry(annotation.block_id).or_default().push(annotation);
        }

        for annotations in grouped.values_mut() {
            annotations.sort_by_key(|annotation| (annotation.start, annotation.key));
        }

        grouped
    }

    #[cfg(test)]
    pub(crate) fn annotate(
        &mut self,
        kind: AnnotationKind,
        block_id: BlockId,
        start: usize,
        end: usize,
        payload: String,
    ) -> AnnotationKey {
        let key = self.ids.next_annotation_key();
        self.annotations.insert(
            key,
            Annotation {
                key,
                kind,
                block_id,
                start,
                end,
                payload,
            },
        );

        key
    }

    pub(crate) fn remove_annotation(&mut self, key: AnnotationKey) -> Option<Annotation> {
        self.annotations.remove(&key)
    }

    pub(crate) fn ids(&self) -> &IdGenerator { &self.ids }

    /// A copy of the document with the same blocks and no annotations.
    pub(crate) fn without_annotations(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            annotations: BTreeMap::new(),
            ids: self.ids.clone(),
        }
    }

    /// Append the block following `block_id` onto it, removing the following
    /// block. Returns `false` if there's no following block.
    pub(crate) fn join_with_next(&mut self, block_id: BlockId) -> bool {
        let Some(position) = self.block_position(block_id) else {
            return false;
        };
        if position + 1 >= self.blocks.len() {
            return false;
        }

        let next = self.blocks.remove(position + 1);
        let shift = self.blocks[position].len();
        self.blocks[position] = self.blocks[position].joined(&next);

        for annotation in self.annotations.values_mut() {
            if annotation.block_id == next.id() {
                annotation.block_id = block_id;
                annotation.start += shift;
                annotation.end += shift;
            }
        }

        true
    }

    /// Resolve annotations in one pass over the blocks, rebuilding each block
    /// once. `decide` picks the outcome of every annotation; those it returns
    /// `None` for stay pending and move along with their text. An erased line
    /// break joins the following block onto the block being built.
    ///
    /// The document must be consistent.
    pub(crate) fn settle_where<F>(self, decide: F) -> Self
    where
        F: Fn(&Annotation) -> Option<Outcome>,
    {
        let Self {
            blocks,
            annotations,
            ids,
        } = self;

        let mut grouped: HashMap<BlockId, Vec<Annotation>> = HashMap::new();
        for annotation in annotations.into_values() {
            grouped.entry(annotation.block_id).or_default().push(annotation);
        }

        let mut settled = Vec::with_capacity(blocks.len());
        let mut pending = BTreeMap::new();
        // Id, text and character count of a block that absorbs the next one.
        let mut joining: Option<(BlockId, String, usize)> = None;

        for block in &blocks {
            let (block_id, mut text, mut length) =
                joining.take().unwrap_or_else(|| (block.id(), String::new(), 0));
            let mut annotations = grouped.remove(&block.id()).unwrap_or_default();
            annotations.sort_by_key(|annotation| (annotation.start, annotation.key));

            let mut builder = StringBuilder::new(block.text());
            let mut cursor = 0;
            let mut joins_next = false;

            for mut annotation in annotations {
                let (start, end) = (annotation.start, annotation.end);
                builder.retain(start - cursor);
                length += start - cursor;
                cursor = end;

                match decide(&annotation) {
                    Some(Outcome::Erase) if annotation.is_line_break() => joins_next = true,
                    Some(Outcome::Erase) => builder.delete(end - start),
                    Some(Outcome::Keep) => {
                        builder.retain(end - start);
                        length += end - start;
                    }
                    None => {
                        builder.retain(end - start);
                        annotation.block_id = block_id;
                        annotation.start = length;
                        annotation.end = length + end - start;
                        length = annotation.end;
                        pending.insert(annotation.key, annotation);
                    }
                }
            }

            builder.retain_rest();
            length += block.len() - cursor;
            text.push_str(&builder.take());

            if joins_next {
                joining = Some((block_id, text, length));
            } else {
                settled.push(Block::new(block_id, text));
            }
        }

        if let Some((block_id, text, _)) = joining {
            settled.push(Block::new(block_id, text));
        }

        Self {
            blocks: settled,
            annotations: pending,
            ids,
        }
    }
}

impl Default for Document {
    fn default() -> Self { Self::from_text("") }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self { Self::from_text(text) }
}

impl From<&String> for Document {
    fn from(text: &String) -> Self { Self::from_text(text) }
}
