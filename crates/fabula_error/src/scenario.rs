//! Scenario validation error types.

/// How many missing scene identifiers a reference error spells out.
pub const MAX_LISTED_REFERENCES: usize = 5;

/// Specific error conditions for scenario validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScenarioErrorKind {
    /// Missing or mistyped field, or wrong top-level shape
    #[display("{_0}")]
    Structural(String),
    /// Two scenes share an identifier and duplicates are rejected
    #[display("duplicate scene identifier '{_0}'")]
    DuplicateScene(String),
    /// Too few scenes
    #[display("not enough scenes: found {found}, at least {required} required")]
    Size {
        /// Number of scenes in the document
        found: usize,
        /// Minimum number of scenes
        required: usize,
    },
    /// Choices pointing at scenes that do not exist
    #[display("references to nonexistent scenes: {}", format_missing(missing))]
    Reference {
        /// Deduplicated missing identifiers, in first-seen order
        missing: Vec<String>,
    },
    /// No scene offers a real choice
    #[display("no branch found: no scene has {required} or more choices")]
    Topology {
        /// Choices a scene needs to count as a branch
        required: usize,
    },
    /// No simple path from the start scene is long enough
    #[display("no sufficiently deep path: no path from the start scene visits {required} or more scenes")]
    Depth {
        /// Minimum number of scenes on the path
        required: usize,
    },
    /// Path enumeration hit a configured ceiling
    #[display("resource limit exceeded: {limit} reached {value}")]
    ResourceExceeded {
        /// Name of the limit that was hit
        limit: &'static str,
        /// Configured value of the limit
        value: usize,
    },
    /// Failed to read the scenario file
    #[display("{_0}")]
    Io(String),
    /// Failed to decode the scenario file as JSON
    #[display("file is not valid JSON: {_0}")]
    Parse(String),
}

fn format_missing(missing: &[String]) -> String {
    let listed = missing
        .iter()
        .take(MAX_LISTED_REFERENCES)
        .map(|id| format!("'{}'", id))
        .collect::<Vec<_>>()
        .join(", ");

    if missing.len() > MAX_LISTED_REFERENCES {
        format!(
            "{} and {} more",
            listed,
            missing.len() - MAX_LISTED_REFERENCES
        )
    } else {
        listed
    }
}

/// Error type for scenario validation.
///
/// # Examples
///
/// ```
/// use fabula_error::{ScenarioError, ScenarioErrorKind};
///
/// let err = ScenarioError::new(ScenarioErrorKind::Size { found: 4, required: 5 });
/// assert!(err.message().contains("found 4"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scenario Error: {} at line {} in {}", kind, line, file)]
pub struct ScenarioError {
    /// The specific error condition
    pub kind: ScenarioErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScenarioError {
    /// Create a new ScenarioError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScenarioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenarioErrorKind {
        &self.kind
    }

    /// The user-facing message, without source location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<ScenarioErrorKind> for ScenarioError {
    #[track_caller]
    fn from(kind: ScenarioErrorKind) -> Self {
        Self::new(kind)
    }
}
