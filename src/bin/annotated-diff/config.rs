use std::path::Path;

use anyhow::{Context as _, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

const DEFAULT_ADDED_OPEN: &str = "{+";
const DEFAULT_ADDED_CLOSE: &str = "+}";
const DEFAULT_REMOVED_OPEN: &str = "[-";
const DEFAULT_REMOVED_CLOSE: &str = "-]";
const DEFAULT_LINE_BREAK_MARKER: &str = "↵";

/// Text printed around an annotated span.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_added_marker")]
    pub added_marker: Marker,

    #[serde(default = "default_removed_marker")]
    pub removed_marker: Marker,

    /// Printed in place of a pending line break, before the break itself.
    #[serde(default = "default_line_break_marker")]
    pub line_break_marker: String,
}

fn default_added_marker() -> Marker {
    debug!("Using default added marker: {DEFAULT_ADDED_OPEN}...{DEFAULT_ADDED_CLOSE}");
    Marker {
        open: DEFAULT_ADDED_OPEN.to_owned(),
        close: DEFAULT_ADDED_CLOSE.to_owned(),
    }
}

fn default_removed_marker() -> Marker {
    debug!("Using default removed marker: {DEFAULT_REMOVED_OPEN}...{DEFAULT_REMOVED_CLOSE}");
    Marker {
        open: DEFAULT_REMOVED_OPEN.to_owned(),
        close: DEFAULT_REMOVED_CLOSE.to_owned(),
    }
}

fn default_line_break_marker() -> String {
    debug!("Using default line break marker: {DEFAULT_LINE_BREAK_MARKER}");
    DEFAULT_LINE_BREAK_MARKER.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            added_marker: default_added_marker(),
            removed_marker: default_removed_marker(),
            line_break_marker: default_line_break_marker(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or fall back to the defaults when
    /// no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        info!("Loading configuration from '{}'", path.display());
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!("Cannot load configuration from disk from {}", path.display())
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).context("Failed to parse configuration")
    }
}
