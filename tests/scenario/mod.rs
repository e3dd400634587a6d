use std::{fs, path::Path};

use annotated_diff::{Document, compute_diff_annotated_document, list_annotations};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// A base and candidate text, optionally with the expected annotated
/// document.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub base: String,
    pub candidate: String,

    /// Plain text of the annotated document
    #[serde(default)]
    pub annotated: Option<String>,

    #[serde(default)]
    pub annotations: Option<Vec<ExpectedAnnotation>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedAnnotation {
    pub kind: String,
    pub block: usize,
    pub start: usize,
    pub end: usize,
    pub payload: String,
}

impl Scenario {
    pub fn annotated_document(&self) -> Document {
        compute_diff_annotated_document(&Document::from_text(&self.base), &self.candidate)
            .unwrap_or_else(|error| panic!("{}: {error}", self.name))
    }

    pub fn assert_annotations(&self, document: &Document) {
        if let Some(expected) = &self.annotated {
            assert_eq!(&document.plain_text(), expected, "{}", self.name);
        }

        if let Some(expected) = &self.annotations {
            let actual: Vec<ExpectedAnnotation> = list_annotations(document, None)
                .iter()
                .map(|range| ExpectedAnnotation {
                    kind: range.kind.to_string(),
                    block: document.block_position(range.block_id).unwrap(),
                    start: range.start,
                    end: range.end,
                    payload: document.annotation(range.key).unwrap().payload().to_owned(),
                })
                .collect();

            assert_eq!(&actual, expected, "{}", self.name);
        }
    }
}

pub fn get_all_scenarios() -> Vec<Scenario> {
    let scenarios_dir = Path::new("tests/scenarios");
    let mut paths = fs::read_dir(scenarios_dir)
        .expect("Failed to read scenarios directory")
        .map(|entry| entry.expect("Failed to read directory entry").path())
        .filter(|path| path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml"))
        .collect::<Vec<_>>();
    paths.sort();

    let mut scenarios = Vec::new();
    for path in paths {
        let file = fs::File::open(&path).expect("Failed to open scenario file");
        for document in serde_yaml::Deserializer::from_reader(file) {
            let scenario =
                Scenario::deserialize(document).expect("Failed to deserialize scenario");
            scenarios.push(scenario);
        }
    }

    assert!(!scenarios.is_empty(), "No scenarios found");
    scenarios
}
