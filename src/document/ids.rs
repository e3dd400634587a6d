use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a block. Unlike a block's position, it survives blocks
/// being split or joined around it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u64);

/// Unique key of an annotation within its document. Keys are never reused, so
/// a key that has been resolved stays stale.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationKey(u64);

impl BlockId {
    #[must_use]
    pub fn new(value: u64) -> Self { Self(value) }

    #[must_use]
    pub fn value(self) -> u64 { self.0 }
}

impl AnnotationKey {
    #[must_use]
    pub fn new(value: u64) -> Self { Self(value) }

    #[must_use]
    pub fn value(self) -> u64 { self.0 }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "b{}", self.0) }
}

impl Display for AnnotationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "a{}", self.0) }
}

/// Hands out ids from a monotonically increasing counter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn next_block_id(&mut self) -> BlockId { BlockId(self.advance()) }

    pub fn next_annotation_key(&mut self) -> AnnotationKey { AnnotationKey(self.advance()) }

    fn advance(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }
}
