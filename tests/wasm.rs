#![cfg(feature = "wasm")]

use annotated_diff::{AnnotationKind, Resolution, wasm::*};
use wasm_bindgen_test::*;

#[wasm_bindgen_test(unsupported = test)]
fn test_compute_and_serialize() {
    let document = compute_diff_annotated_document("A\nB", "A\nC").unwrap();

    assert_eq!(serialize_to_plain_text(&document), "A\nBC");
    assert_eq!(document.block_count(), 2);
    assert_eq!(document.annotation_count(), 2);
    assert_eq!(document.block_text(1), Some("BC".to_owned()));
    assert_eq!(document.block_text(2), None);
}

#[wasm_bindgen_test(unsupported = test)]
fn test_list_annotations() {
    let document = compute_diff_annotated_document("A\nB", "A\nC").unwrap();
    let annotations = list_annotations(&document);

    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].kind(), AnnotationKind::Removed);
    assert_eq!(
        (annotations[0].block_index(), annotations[0].start(), annotations[0].end()),
        (1, 0, 1)
    );
    assert_eq!(annotations[1].kind(), AnnotationKind::Added);
}

#[wasm_bindgen_test(unsupported = test)]
fn test_resolutions_leave_their_input_untouched() {
    let document = compute_diff_annotated_document("hello", "hello world").unwrap();
    let key = list_annotations(&document)[0].key();

    let resolved = resolve_one(&document, key);
    assert_eq!(serialize_to_plain_text(&resolved), "hello world");
    assert_eq!(resolved.annotation_count(), 0);
    assert_eq!(document.annotation_count(), 1);

    let reverted = resolve_with(&document, key, Resolution::Revert);
    assert_eq!(serialize_to_plain_text(&reverted), "hello");
}

#[wasm_bindgen_test(unsupported = test)]
fn test_resolve_and_revert_all() {
    let document = compute_diff_annotated_document("one\ntwo", "one two\nthree").unwrap();

    assert_eq!(serialize_to_plain_text(&resolve_all(&document)), "one two\nthree");
    assert_eq!(serialize_to_plain_text(&revert_all(&document)), "one\ntwo");
}

#[wasm_bindgen_test(unsupported = test)]
fn test_new_document_has_no_annotations() {
    let document = JsDocument::new("plain\ntext");

    assert_eq!(document.block_count(), 2);
    assert!(list_annotations(&document).is_empty());
    assert_eq!(serialize_to_plain_text(&resolve_all(&document)), "plain\ntext");
}
