use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use super::ids::{AnnotationKey, BlockId};

/// Whether an annotated span exists only in the candidate (`Added`) or only
/// in the base (`Removed`).
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Added,
    Removed,
}

impl Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationKind::Added => write!(f, "added"),
            AnnotationKind::Removed => write!(f, "removed"),
        }
    }
}

/// A pending change anchored to a character range of a block.
///
/// Line breaks are annotated too: an added or removed line break is a
/// zero-width annotation at the end of the block it closes, with `"\n"` as
/// its payload.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub(crate) key: AnnotationKey,
    pub(crate) kind: AnnotationKind,
    pub(crate) block_id: BlockId,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) payload: String,
}

impl Annotation {
    #[must_use]
    pub fn key(&self) -> AnnotationKey { self.key }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind { self.kind }

    #[must_use]
    pub fn block_id(&self) -> BlockId { self.block_id }

    #[must_use]
    pub fn start(&self) -> usize { self.start }

    #[must_use]
    pub fn end(&self) -> usize { self.end }

    /// The fragment text the annotation was created from.
    #[must_use]
    pub fn payload(&self) -> &str { &self.payload }

    #[must_use]
    pub fn is_line_break(&self) -> bool { self.start == self.end && self.payload == "\n" }
}
