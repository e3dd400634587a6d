#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AnnotationKey, AnnotationKind, BlockId, Document};

/// A snapshot of where a pending annotation currently sits.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationRange {
    pub key: AnnotationKey,
    pub kind: AnnotationKind,
    pub block_id: BlockId,
    pub start: usize,
    pub end: usize,
}

/// A user selection spanning from an offset of one block to an offset of the
/// same or a later block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_block: BlockId,
    pub start_offset: usize,
    pub end_block: BlockId,
    pub end_offset: usize,
}

impl Selection {
    /// A selection within a single block.
    #[must_use]
    pub fn within(block: BlockId, start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_block: block,
            start_offset,
            end_block: block,
            end_offset,
        }
    }
}

/// List the pending annotations of `document` ordered by block position, then
/// by start offset. When `kind_filter` is given, only annotations of that kind
/// are listed.
#[must_use]
pub fn list_annotations(
    document: &Document,
    kind_filter: Option<AnnotationKind>,
) -> Vec<AnnotationRange> {
    collect(document, kind_filter, |_, _| true)
}

/// List the pending annotations touched by `selection`, in the same order as
/// [`list_annotations`].
///
/// An annotation is touched if its block lies between the selection's first
/// and last block, and on those boundary blocks its range reaches the
/// selected offsets. Ranges that merely touch the selection boundary count.
/// A selection referring to unknown blocks, or ending before it starts,
/// touches nothing.
#[must_use]
pub fn annotations_in_selection(
    document: &Document,
    selection: &Selection,
    kind_filter: Option<AnnotationKind>,
) -> Vec<AnnotationRange> {
    let (Some(first), Some(last)) = (
        document.block_position(selection.start_block),
        document.block_position(selection.end_block),
    ) else {
        return Vec::new();
    };

    if first > last || (first == last && selection.start_offset > selection.end_offset) {
        return Vec::new();
    }

    collect(document, kind_filter, |position, range| {
        (first..=last).contains(&position)
            && (position != first || range.end >= selection.start_offset)
            && (position != last || range.start <= selection.end_offset)
    })
}

fn collect<F>(
    document: &Document,
    kind_filter: Option<AnnotationKind>,
    include: F,
) -> Vec<AnnotationRange>
where
    F: Fn(usize, &AnnotationRange) -> bool,
{
    let mut grouped = document.annotations_by_block();

    document
        .blocks()
        .iter()
        .enumerate()
        .flat_map(|(position, block)| {
            grouped
                .remove(&block.id())
                .unwrap_or_default()
                .into_iter()
                .map(move |annotation| (position, annotation))
        })
        .filter(|(_, annotation)| kind_filter.is_none_or(|kind| annotation.kind() == kind))
        .map(|(position, annotation)| {
            (
                position,
                AnnotationRange {
                    key: annotation.key(),
                    kind: annotation.kind(),
                    block_id: annotation.block_id(),
                    start: annotation.start(),
                    end: annotation.end(),
                },
            )
        })
        .filter(|(position, range)| include(*position, range))
        .map(|(_, range)| range)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compute_diff_annotated_document;

    fn keys(ranges: &[AnnotationRange]) -> Vec<(AnnotationKind, usize, usize)> {
        ranges
            .iter()
            .map(|range| (range.kind, range.start, range.end))
            .collect()
    }

    fn example() -> Document {
        // block 0: "the cat sat"  -> "the dog sat"
        // block 1: "on the mat"   -> "on a mat"
        // block 2: "today"        -> "today!"
        compute_diff_annotated_document(
            &Document::from_text("the cat sat\non the mat\ntoday"),
            "the dog sat\non a mat\ntoday!",
        )
        .unwrap()
    }

    #[test]
    fn test_ordered_by_block_then_offset() {
        let document = example();
        let ranges = list_annotations(&document, None);

        let positions: Vec<(usize, usize)> = ranges
            .iter()
            .map(|range| (document.block_position(range.block_id).unwrap(), range.start))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();

        assert_eq!(positions, sorted);
        assert_eq!(ranges.len(), document.annotation_count());
    }

    #[test]
    fn test_kind_filter() {
        let document = example();

        let added = list_annotations(&document, Some(AnnotationKind::Added));
        let removed = list_annotations(&document, Some(AnnotationKind::Removed));

        assert!(added.iter().all(|range| range.kind == AnnotationKind::Added));
        assert!(removed.iter().all(|range| range.kind == AnnotationKind::Removed));
        assert_eq!(added.len() + removed.len(), document.annotation_count());
    }

    #[test]
    fn test_listing_is_a_snapshot() {
        let document = example();
        assert_eq!(
            list_annotations(&document, None),
            list_annotations(&document, None)
        );
    }

    #[test]
    fn test_selection_within_block() {
        let mut document = Document::from_text("abcdef");
        let block = document.blocks()[0].id();
        document.annotate(AnnotationKind::Removed, block, 0, 1, "a".to_owned());
        document.annotate(AnnotationKind::Added, block, 2, 3, "c".to_owned());
        document.annotate(AnnotationKind::Removed, block, 4, 6, "ef".to_owned());

        let selected = annotations_in_selection(&document, &Selection::within(block, 1, 2), None);
        assert_eq!(
            keys(&selected),
            vec![
                (AnnotationKind::Removed, 0, 1),
                (AnnotationKind::Added, 2, 3)
            ]
        );

        let selected = annotations_in_selection(&document, &Selection::within(block, 3, 3), None);
        assert_eq!(keys(&selected), vec![(AnnotationKind::Added, 2, 3)]);

        let selected = annotations_in_selection(
            &document,
            &Selection::within(block, 0, 6),
            Some(AnnotationKind::Removed),
        );
        assert_eq!(
            keys(&selected),
            vec![
                (AnnotationKind::Removed, 0, 1),
                (AnnotationKind::Removed, 4, 6)
            ]
        );
    }

    #[test]
    fn test_selection_across_blocks() {
        let mut document = Document::from_text("aaaa\nbbbb\ncccc\ndddd");
        let blocks: Vec<BlockId> = document.blocks().iter().map(|block| block.id()).collect();
        for block in &blocks {
            document.annotate(AnnotationKind::Added, *block, 0, 1, "x".to_owned());
            document.annotate(AnnotationKind::Removed, *block, 3, 4, "y".to_owned());
        }

        let selection = Selection {
            start_block: blocks[1],
            start_offset: 2,
            end_block: blocks[2],
            end_offset: 2,
        };
        let selected = annotations_in_selection(&document, &selection, None);

        assert_eq!(
            selected
                .iter()
                .map(|range| (range.block_id, range.start))
                .collect::<Vec<_>>(),
            vec![(blocks[1], 3), (blocks[2], 0)]
        );
    }

    #[test]
    fn test_invalid_selections_select_nothing() {
        let document = example();
        let first = document.blocks()[0].id();
        let last = document.blocks()[2].id();

        let reversed = Selection {
            start_block: last,
            start_offset: 0,
            end_block: first,
            end_offset: 3,
        };
        assert_eq!(annotations_in_selection(&document, &reversed, None), vec![]);

        let unknown = Selection::within(BlockId::new(999), 0, 100);
        assert_eq!(annotations_in_selection(&document, &unknown, None), vec![]);

        let inverted = Selection::within(first, 5, 1);
        assert_eq!(annotations_in_selection(&document, &inverted, None), vec![]);
    }
}
