use annotated_diff::{
    AnnotationKind, Document, Resolution, Selection, accept_added, annotations_in_selection,
    compute_diff_annotated_document, list_annotations, reject_removed, resolve_all, resolve_one,
    resolve_selection, resolve_with, revert_all, segment, serialize_to_plain_text,
};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> { "[ab \n国é]{0,16}" }

fn annotated(base: &str, candidate: &str) -> Document {
    compute_diff_annotated_document(&Document::from_text(base), candidate).unwrap()
}

proptest! {
    #[test]
    fn resolving_everything_gives_the_candidate(base in text(), candidate in text()) {
        let resolved = resolve_all(annotated(&base, &candidate));

        prop_assert_eq!(serialize_to_plain_text(&resolved), candidate);
        prop_assert_eq!(resolved.annotation_count(), 0);
    }

    #[test]
    fn reverting_everything_gives_the_base(base in text(), candidate in text()) {
        let reverted = revert_all(annotated(&base, &candidate));

        prop_assert_eq!(serialize_to_plain_text(&reverted), base);
        prop_assert_eq!(reverted.annotation_count(), 0);
    }

    #[test]
    fn every_change_becomes_one_annotation(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let changes = segment(&base, &candidate)
            .iter()
            .filter(|fragment| fragment.is_added() || fragment.is_removed())
            .count();

        prop_assert_eq!(document.annotation_count(), changes);
        prop_assert!(document.is_consistent());
    }

    #[test]
    fn payloads_match_the_changed_fragments(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let fragments = segment(&base, &candidate);

        for kind in [AnnotationKind::Added, AnnotationKind::Removed] {
            let payloads: String = list_annotations(&document, Some(kind))
                .iter()
                .map(|range| document.annotation(range.key).unwrap().payload().to_owned())
                .collect();
            let changed: String = fragments
                .iter()
                .filter(|fragment| fragment.kind.annotation_kind() == Some(kind))
                .map(|fragment| fragment.value.as_str())
                .collect();

            prop_assert_eq!(payloads, changed);
        }

        for range in list_annotations(&document, None) {
            let annotation = document.annotation(range.key).unwrap();
            if annotation.is_line_break() {
                continue;
            }

            let block = document.block(range.block_id).unwrap();
            prop_assert_eq!(block.slice(range.start, range.end), annotation.payload());
        }
    }

    #[test]
    fn resolving_in_one_pass_matches_resolving_one_by_one(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let ranges = list_annotations(&document, None);

        let one_by_one = ranges
            .iter()
            .fold(document.clone(), |document, range| resolve_one(document, range.key));
        prop_assert_eq!(resolve_all(document.clone()), one_by_one);

        let reverted_one_by_one = ranges.iter().fold(document.clone(), |document, range| {
            resolve_with(document, range.key, Resolution::Revert)
        });
        prop_assert_eq!(revert_all(document), reverted_one_by_one);
    }

    #[test]
    fn fragments_never_span_lines(base in text(), candidate in text()) {
        for fragment in segment(&base, &candidate) {
            prop_assert!(fragment.is_line_break() || !fragment.value.contains('\n'));
            prop_assert!(!fragment.value.is_empty());
            prop_assert!(fragment.start_offset <= fragment.end_offset);
        }
    }

    #[test]
    fn resolving_is_idempotent(base in text(), candidate in text()) {
        let resolved = resolve_all(annotated(&base, &candidate));

        prop_assert_eq!(resolve_all(resolved.clone()), resolved.clone());
        prop_assert_eq!(revert_all(resolved.clone()), resolved);
    }

    #[test]
    fn listing_is_in_document_order(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let positions = list_annotations(&document, None)
            .iter()
            .map(|range| (document.block_position(range.block_id), range.start))
            .collect::<Vec<_>>();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn spans_concatenate_to_the_plain_text(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let text: String = document.spans().into_iter().map(|span| span.text).collect();

        prop_assert_eq!(text, document.plain_text());
    }

    #[test]
    fn resolving_a_selection_only_touches_selected_annotations(
        base in text(),
        candidate in text(),
        block in 0usize..4,
    ) {
        let document = annotated(&base, &candidate);
        let Some(block_id) = document.blocks().get(block).map(|block| block.id()) else {
            return Ok(());
        };
        let selection = Selection::within(block_id, 0, usize::MAX);
        let selected = annotations_in_selection(&document, &selection, None);

        let resolved = resolve_selection(document.clone(), &selection, Resolution::Apply);

        prop_assert_eq!(
            resolved.annotation_count(),
            document.annotation_count() - selected.len()
        );
        for range in list_annotations(&document, None) {
            let still_pending = resolved.annotation(range.key).is_some();
            prop_assert_eq!(still_pending, !selected.contains(&range));
        }
        prop_assert_eq!(serialize_to_plain_text(&resolve_all(resolved)), candidate);
    }

    #[test]
    fn accepting_additions_then_rejecting_removals(base in text(), candidate in text()) {
        let document = annotated(&base, &candidate);
        let added = list_annotations(&document, Some(AnnotationKind::Added));

        let accepted = added
            .iter()
            .fold(document, |document, range| accept_added(document, range.key));
        let pending = list_annotations(&accepted, None);
        prop_assert!(pending.iter().all(|range| range.kind == AnnotationKind::Removed));

        let rejected = pending
            .iter()
            .fold(accepted, |document, range| reject_removed(document, range.key));
        prop_assert_eq!(serialize_to_plain_text(&rejected), candidate);
    }
}
