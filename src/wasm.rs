//! Expose the `annotated-diff` crate's functionality to WebAssembly.
//!
//! Documents are immutable from JavaScript: every resolution returns a new
//! document and leaves its input untouched.
use wasm_bindgen::prelude::*;

use crate::{AnnotationKey, AnnotationKind, AnnotationRange, Document, Resolution};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// Wrapper type to expose `Document` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsDocument {
    inner: Document,
}

#[wasm_bindgen]
impl JsDocument {
    /// Create a document without annotations from plain text.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(text: &str) -> Self {
        set_panic_hook();

        Self {
            inner: Document::from_text(text),
        }
    }

    #[wasm_bindgen(js_name = blockCount)]
    #[must_use]
    pub fn block_count(&self) -> usize { self.inner.blocks().len() }

    #[wasm_bindgen(js_name = annotationCount)]
    #[must_use]
    pub fn annotation_count(&self) -> usize { self.inner.annotation_count() }

    /// The text of the block at `position`, if there is one.
    #[wasm_bindgen(js_name = blockText)]
    #[must_use]
    pub fn block_text(&self, position: usize) -> Option<String> {
        self.inner
            .blocks()
            .get(position)
            .map(|block| block.text().to_owned())
    }
}

/// Wrapper type to expose `AnnotationRange` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsAnnotation {
    key: u64,
    kind: AnnotationKind,
    block_index: usize,
    start: usize,
    end: usize,
}

#[wasm_bindgen]
impl JsAnnotation {
    #[must_use]
    pub fn key(&self) -> u64 { self.key }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind { self.kind }

    #[wasm_bindgen(js_name = blockIndex)]
    #[must_use]
    pub fn block_index(&self) -> usize { self.block_index }

    #[must_use]
    pub fn start(&self) -> usize { self.start }

    #[must_use]
    pub fn end(&self) -> usize { self.end }
}

impl JsAnnotation {
    fn from_range(document: &Document, range: &AnnotationRange) -> Option<Self> {
        Some(Self {
            key: range.key.value(),
            kind: range.kind,
            block_index: document.block_position(range.block_id)?,
            start: range.start,
            end: range.end,
        })
    }
}

/// WASM wrapper around `crate::compute_diff_annotated_document`.
///
/// # Errors
///
/// Throws if the diff cannot be projected onto the base document.
#[wasm_bindgen(js_name = computeDiffAnnotatedDocument)]
pub fn compute_diff_annotated_document(base: &str, candidate: &str) -> Result<JsDocument, JsError> {
    set_panic_hook();

    let inner = crate::compute_diff_annotated_document(&Document::from_text(base), candidate)?;
    Ok(JsDocument { inner })
}

/// WASM wrapper around `crate::list_annotations`, listing every pending
/// annotation in document order.
#[wasm_bindgen(js_name = listAnnotations)]
#[must_use]
pub fn list_annotations(document: &JsDocument) -> Vec<JsAnnotation> {
    set_panic_hook();

    crate::list_annotations(&document.inner, None)
        .iter()
        .filter_map(|range| JsAnnotation::from_range(&document.inner, range))
        .collect()
}

/// WASM wrapper around `crate::resolve_with`.
#[wasm_bindgen(js_name = resolveWith)]
#[must_use]
pub fn resolve_with(document: &JsDocument, key: u64, resolution: Resolution) -> JsDocument {
    set_panic_hook();

    JsDocument {
        inner: crate::resolve_with(document.inner.clone(), AnnotationKey::new(key), resolution),
    }
}

/// WASM wrapper around `crate::resolve_one`.
#[wasm_bindgen(js_name = resolveOne)]
#[must_use]
pub fn resolve_one(document: &JsDocument, key: u64) -> JsDocument {
    resolve_with(document, key, Resolution::Apply)
}

/// WASM wrapper around `crate::resolve_all`.
#[wasm_bindgen(js_name = resolveAll)]
#[must_use]
pub fn resolve_all(document: &JsDocument) -> JsDocument {
    set_panic_hook();

    JsDocument {
        inner: crate::resolve_all(document.inner.clone()),
    }
}

/// WASM wrapper around `crate::revert_all`.
#[wasm_bindgen(js_name = revertAll)]
#[must_use]
pub fn revert_all(document: &JsDocument) -> JsDocument {
    set_panic_hook();

    JsDocument {
        inner: crate::revert_all(document.inner.clone()),
    }
}

/// WASM wrapper around `crate::serialize_to_plain_text`.
#[wasm_bindgen(js_name = serializeToPlainText)]
#[must_use]
pub fn serialize_to_plain_text(document: &JsDocument) -> String {
    crate::serialize_to_plain_text(&document.inner)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
