use clap::ValueEnum;

/// What to print once the annotated document is computed.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// The annotated document with changes marked
    #[default]
    Annotate,
    /// The candidate text, after accepting every change
    Resolve,
    /// The base text, after reverting every change
    Revert,
    /// One line per pending annotation
    List,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Annotate => write!(f, "annotate"),
            Mode::Resolve => write!(f, "resolve"),
            Mode::Revert => write!(f, "revert"),
            Mode::List => write!(f, "list"),
        }
    }
}
