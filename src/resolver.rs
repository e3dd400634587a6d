use std::{collections::HashSet, fmt::Display};

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::{
    Annotation, AnnotationKey, AnnotationKind, Document,
    annotation_index::{AnnotationRange, Selection, annotations_in_selection, list_annotations},
    document::Outcome,
};

/// What to do with a pending annotation.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Take the candidate's side: keep added spans, delete removed spans.
    Apply,
    /// Take the base's side: delete added spans, keep removed spans.
    Revert,
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Apply => write!(f, "apply"),
            Resolution::Revert => write!(f, "revert"),
        }
    }
}

impl Resolution {
    fn outcome(self, kind: AnnotationKind) -> Outcome {
        match (kind, self) {
            (AnnotationKind::Added, Resolution::Apply)
            | (AnnotationKind::Removed, Resolution::Revert) => Outcome::Keep,
            (AnnotationKind::Removed, Resolution::Apply)
            | (AnnotationKind::Added, Resolution::Revert) => Outcome::Erase,
        }
    }
}

/// Keep the added span identified by `key` and clear its annotation.
///
/// Returns the document unchanged if `key` isn't a pending added annotation.
#[must_use]
pub fn accept_added(document: Document, key: AnnotationKey) -> Document {
    settle(document, key, AnnotationKind::Added, Outcome::Keep)
}

/// Delete the removed span identified by `key` and clear its annotation. A
/// removed line break joins the following block onto its block.
///
/// Returns the document unchanged if `key` isn't a pending removed annotation.
#[must_use]
pub fn reject_removed(document: Document, key: AnnotationKey) -> Document {
    settle(document, key, AnnotationKind::Removed, Outcome::Erase)
}

/// Keep the removed span identified by `key` after all and clear its
/// annotation.
#[must_use]
pub fn restore_removed(document: Document, key: AnnotationKey) -> Document {
    settle(document, key, AnnotationKind::Removed, Outcome::Keep)
}

/// Delete the added span identified by `key` and clear its annotation. An
/// added line break joins the following block back onto its block.
#[must_use]
pub fn discard_added(document: Document, key: AnnotationKey) -> Document {
    settle(document, key, AnnotationKind::Added, Outcome::Erase)
}

/// Resolve the annotation identified by `key` towards the candidate text:
/// added spans are kept, removed spans are deleted.
///
/// Unknown or already resolved keys leave the document unchanged.
///
/// ```
/// use annotated_diff::{Document, compute_diff_annotated_document, list_annotations, resolve_one};
///
/// let base = Document::from_text("hello");
/// let document = compute_diff_annotated_document(&base, "hello world")?;
/// let key = list_annotations(&document, None)[0].key;
///
/// let resolved = resolve_one(document, key);
/// assert_eq!(resolved.plain_text(), "hello world");
/// assert_eq!(resolved.annotation_count(), 0);
/// # Ok::<(), annotated_diff::ProjectionError>(())
/// ```
#[must_use]
pub fn resolve_one(document: Document, key: AnnotationKey) -> Document {
    resolve_with(document, key, Resolution::Apply)
}

/// Resolve the annotation identified by `key` in the direction given by
/// `resolution`.
#[must_use]
pub fn resolve_with(document: Document, key: AnnotationKey, resolution: Resolution) -> Document {
    let Some(kind) = document.annotation(key).map(|annotation| annotation.kind()) else {
        debug!("Ignoring unknown or already resolved annotation {key}");
        return document;
    };

    match (kind, resolution) {
        (AnnotationKind::Added, Resolution::Apply) => accept_added(document, key),
        (AnnotationKind::Removed, Resolution::Apply) => reject_removed(document, key),
        (AnnotationKind::Added, Resolution::Revert) => discard_added(document, key),
        (AnnotationKind::Removed, Resolution::Revert) => restore_removed(document, key),
    }
}

/// Resolve every annotation towards the candidate text. The result has no
/// annotations and its text is the candidate's. Resolving an already
/// resolved document is a no-op.
///
/// Every block is rebuilt at most once, however many annotations it holds.
#[must_use]
pub fn resolve_all(document: Document) -> Document {
    resolve_matching(document, Resolution::Apply, |_| true)
}

/// Resolve every annotation towards the base text, undoing the diff.
#[must_use]
pub fn revert_all(document: Document) -> Document {
    resolve_matching(document, Resolution::Revert, |_| true)
}

/// Resolve every annotation touched by `selection`.
#[must_use]
pub fn resolve_selection(
    document: Document,
    selection: &Selection,
    resolution: Resolution,
) -> Document {
    let selected: HashSet<AnnotationKey> = annotations_in_selection(&document, selection, None)
        .iter()
        .map(|range| range.key)
        .collect();

    resolve_matching(document, resolution, |annotation| {
        selected.contains(&annotation.key())
    })
}

fn resolve_matching<F>(document: Document, resolution: Resolution, include: F) -> Document
where
    F: Fn(&Annotation) -> bool,
{
    if !document.is_consistent() {
        warn!("Resolving annotations one at a time as the document is inconsistent");

        let ranges: Vec<AnnotationRange> = list_annotations(&document, None)
            .into_iter()
            .filter(|range| document.annotation(range.key).is_some_and(&include))
            .collect();
        return resolve_ranges(document, &ranges, resolution);
    }

    let before = document.annotation_count();
    let document = document.settle_where(|annotation| {
        include(annotation).then(|| resolution.outcome(annotation.kind()))
    });

    debug!(
        "Resolved {} annotations ({resolution}), {} remain",
        before - document.annotation_count(),
        document.annotation_count()
    );
    debug_assert!(document.is_consistent(), "Resolution must keep the document consistent");

    document
}

fn resolve_ranges(
    document: Document,
    ranges: &[AnnotationRange],
    resolution: Resolution,
) -> Document {
    let before = document.annotation_count();

    let document = ranges.iter().fold(document, |document, range| {
        resolve_with(document, range.key, resolution)
    });

    debug!(
        "Resolved {} of {} annotations ({resolution})",
        before - document.annotation_count(),
        ranges.len()
    );

    document
}

fn settle(
    mut document: Document,
    key: AnnotationKey,
    expected_kind: AnnotationKind,
    outcome: Outcome,
) -> Document {
    let Some(annotation) = document.annotation(key) else {
        debug!("Ignoring unknown or already resolved annotation {key}");
        return document;
    };

    if annotation.kind() != expected_kind {
        debug!(
            "Ignoring annotation {key}: expected {expected_kind} but it is {}",
            annotation.kind()
        );
        return document;
    }

    let (block_id, start, end) = (annotation.block_id(), annotation.start(), annotation.end());
    let is_line_break = annotation.is_line_break();

    let Some(position) = document.block_position(block_id) else {
        warn!("Annotation {key} refers to missing block {block_id}");
        return document;
    };
    let block_length = document.blocks()[position].len();

    if start > end || end > block_length {
        warn!("Annotation {key} ({start}..{end}) lies outside of block {block_id} ({block_length})");
        return document;
    }

    if is_line_break
        && outcome == Outcome::Erase
        && (start != block_length || position + 1 >= document.blocks().len())
    {
        warn!("Line break annotation {key} doesn't end block {block_id}");
        return document;
    }

    document.remove_annotation(key);

    if outcome == Outcome::Erase {
        if is_line_break {
            document.join_with_next(block_id);
        } else {
            document.remove_text(block_id, start, end);
        }
    }

    debug_assert!(document.is_consistent(), "Resolution must keep the document consistent");

    document
}
