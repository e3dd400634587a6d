//! Turn a character-level diff between two texts into an annotated document
//! that a reviewer can resolve change by change.
//!
//! The base text becomes a [`Document`] of blocks; [`compute_diff_annotated_document`]
//! overlays the candidate text onto it, keeping removed text in place and
//! inserting added text next to it, each marked with an annotation. The
//! annotations can then be accepted, rejected or reverted individually, per
//! selection, or all at once.
//!
//! ```
//! use annotated_diff::{Document, compute_diff_annotated_document, resolve_all, revert_all};
//!
//! let base = Document::from_text("the cat sat\non the mat");
//! let document = compute_diff_annotated_document(&base, "the dog sat\non a mat")?;
//!
//! assert_eq!(resolve_all(document.clone()).plain_text(), "the dog sat\non a mat");
//! assert_eq!(revert_all(document).plain_text(), "the cat sat\non the mat");
//! # Ok::<(), annotated_diff::ProjectionError>(())
//! ```

mod annotation_index;
mod diffs;
mod document;
mod errors;
mod projector;
mod resolver;
mod segmenter;
mod utils;

pub use annotation_index::{
    AnnotationRange, Selection, annotations_in_selection, list_annotations,
};
pub use document::{
    AnnotatedSpan, Annotation, AnnotationKey, AnnotationKind, Block, BlockId, Document,
    LINE_SEPARATOR,
};
pub use errors::ProjectionError;
pub use projector::project;
pub use resolver::{
    Resolution, accept_added, discard_added, reject_removed, resolve_all, resolve_one,
    resolve_selection, resolve_with, restore_removed, revert_all,
};
pub use segmenter::{DiffFragment, FragmentKind, segment};

#[cfg(feature = "wasm")]
pub mod wasm;

/// Diff the text of `base` against `candidate` and project the result onto a
/// copy of `base`. Annotations already present on `base` are not carried
/// over.
///
/// Resolving every annotation of the result yields `candidate`, reverting
/// every annotation yields the text of `base`.
///
/// # Errors
///
/// Returns a [`ProjectionError`] if the diff cannot be projected onto the
/// document. This indicates a bug rather than bad input.
pub fn compute_diff_annotated_document(
    base: &Document,
    candidate: &str,
) -> Result<Document, ProjectionError> {
    let base = base.without_annotations();
    let fragments = segment(&base.plain_text(), candidate);

    project(&base, &fragments)
}

/// The text of `document` with annotations ignored, blocks separated by
/// [`LINE_SEPARATOR`].
#[must_use]
pub fn serialize_to_plain_text(document: &Document) -> String { document.plain_text() }
