use annotated_diff::{AnnotatedSpan, AnnotationKind, Document, list_annotations};

use crate::config::{Config, Marker};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Render `document` with every pending change wrapped in its marker.
pub fn render_annotated(document: &Document, config: &Config, use_colors: bool) -> String {
    document
        .spans()
        .iter()
        .map(|span| render_span(span, config, use_colors))
        .collect()
}

fn render_span(span: &AnnotatedSpan, config: &Config, use_colors: bool) -> String {
    let Some(kind) = span.kind else {
        return span.text.clone();
    };

    let (marker, color) = match kind {
        AnnotationKind::Added => (&config.added_marker, GREEN),
        AnnotationKind::Removed => (&config.removed_marker, RED),
    };

    // A pending line break stays a line break so the block structure remains
    // readable; the marker only flags it.
    let (text, suffix) = if span.text == "\n" {
        (config.line_break_marker.as_str(), "\n")
    } else {
        (span.text.as_str(), "")
    };

    let Marker { open, close } = marker;
    if use_colors {
        format!("{color}{open}{text}{close}{RESET}{suffix}")
    } else {
        format!("{open}{text}{close}{suffix}")
    }
}

/// One line per pending annotation: key, kind, block position, start and end
/// offsets and the quoted payload.
pub fn render_list(document: &Document) -> String {
    list_annotations(document, None)
        .iter()
        .filter_map(|range| {
            let block = document.block_position(range.block_id)?;
            let payload = document.annotation(range.key)?.payload();

            Some(format!(
                "{} {} {block} {} {} {payload:?}\n",
                range.key, range.kind, range.start, range.end
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use annotated_diff::compute_diff_annotated_document;
    use insta::assert_snapshot;

    use super::*;

    fn annotated(base: &str, candidate: &str) -> Document {
        compute_diff_annotated_document(&Document::from_text(base), candidate).unwrap()
    }

    #[test]
    fn test_render_annotated() {
        let config = Config::default();

        assert_snapshot!(
            render_annotated(&annotated("hello", "hello world"), &config, false),
            @"hello{+ world+}"
        );
        assert_snapshot!(
            render_annotated(&annotated("A\nB", "A\nC"), &config, false),
            @r"
        A
        [-B-]{+C+}
        "
        );
    }

    #[test]
    fn test_render_line_breaks() {
        let config = Config::default();

        assert_snapshot!(
            render_annotated(&annotated("one two", "one\ntwo"), &config, false),
            @r"
        one[- -]{+↵+}
        two
        "
        );
    }

    #[test]
    fn test_render_with_colors() {
        let rendered = render_annotated(&annotated("ab", "b"), &Config::default(), true);

        assert_eq!(rendered, format!("{RED}[-a-]{RESET}b"));
    }

    #[test]
    fn test_render_list() {
        assert_snapshot!(
            render_list(&annotated("A\nB", "A\nC")).trim_end(),
            @r#"
        a2 removed 1 0 1 "B"
        a3 added 1 1 2 "C"
        "#
        );
    }
}
