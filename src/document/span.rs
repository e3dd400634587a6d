#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{AnnotationKey, AnnotationKind, Document, LINE_SEPARATOR};

/// A run of document text that is either plain or covered by exactly one
/// annotation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSpan {
    pub text: String,
    pub kind: Option<AnnotationKind>,
    pub key: Option<AnnotationKey>,
}

impl AnnotatedSpan {
    fn plain(text: String) -> Self {
        Self {
            text,
            kind: None,
            key: None,
        }
    }
}

impl Document {
    /// The document as an ordered list of spans, suitable for rendering.
    ///
    /// Block boundaries appear as [`LINE_SEPARATOR`] spans, annotated when the
    /// line break itself is pending. Concatenating the spans' text gives
    /// [`Document::plain_text`]. Empty plain spans are omitted.
    #[must_use]
    pub fn spans(&self) -> Vec<AnnotatedSpan> {
        let grouped = self.annotations_by_block();
        let mut spans = Vec::new();

        for (position, block) in self.blocks().iter().enumerate() {
            let mut line_break = None;
            let mut cursor = 0;

            for annotation in grouped.get(&block.id()).into_iter().flatten() {
                if annotation.is_line_break() {
                    line_break = Some(*annotation);
                    continue;
                }

                if annotation.start > cursor {
                    spans.push(AnnotatedSpan::plain(block.slice(cursor, annotation.start)));
                }
                spans.push(AnnotatedSpan {
                    text: block.slice(annotation.start, annotation.end),
                    kind: Some(annotation.kind),
                    key: Some(annotation.key),
                });
                cursor = annotation.end;
            }

            if cursor < block.len() {
                spans.push(AnnotatedSpan::plain(block.slice(cursor, block.len())));
            }

            if position + 1 < self.blocks().len() {
                spans.push(AnnotatedSpan {
                    text: LINE_SEPARATOR.to_owned(),
                    kind: line_break.map(|annotation| annotation.kind),
                    key: line_break.map(|annotation| annotation.key),
                });
            }
        }

        spans
    }
}
