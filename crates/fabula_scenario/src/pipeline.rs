//! Fail-fast validation pipeline.
//!
//! Stages run in a fixed order and the first failing stage ends the run; later
//! stages never execute, so a report names exactly one defect. A [`Validator`]
//! holds only configuration. Every call builds its own graph, which is handed
//! back to the caller on success and never kept.

use crate::extract::extract_document;
use crate::store::scene_values;
use crate::{MIN_BRANCH_CHOICES, PathEnumerator, ScenarioGraph, ValidationConfig};
use fabula_error::{ScenarioError, ScenarioErrorKind};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Minimum number of entries in the `scenes` array.
pub const MIN_SCENES: usize = 5;

/// Minimum number of scenes on the required simple path from the start scene.
pub const MIN_PATH_LENGTH: usize = 3;

/// Message reported when every stage passes.
pub const SUCCESS_MESSAGE: &str = "all checks passed";

/// A step of validation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum ValidationStage {
    /// Reading and decoding a file (file variants only)
    Load,
    /// Document is an object with a `scenes` array
    Schema,
    /// At least [`MIN_SCENES`] scenes
    MinimumSize,
    /// Every scene and choice carries its required fields
    SceneSchema,
    /// Every choice target names an existing scene
    ReferenceIntegrity,
    /// Some scene has at least [`MIN_BRANCH_CHOICES`] choices
    BranchExistence,
    /// A simple path of at least [`MIN_PATH_LENGTH`] scenes leaves the start scene
    DepthCheck,
}

/// Result of validating one document.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// Every stage passed
    Valid(ScenarioGraph),
    /// The first failing stage and its error
    Invalid {
        /// Stage that failed
        stage: ValidationStage,
        /// What went wrong
        error: ScenarioError,
    },
}

impl ValidationOutcome {
    /// Returns true if every stage passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Human-readable result: [`SUCCESS_MESSAGE`] or the failing stage's message.
    pub fn message(&self) -> String {
        match self {
            Self::Valid(_) => SUCCESS_MESSAGE.to_string(),
            Self::Invalid { error, .. } => error.message(),
        }
    }

    /// The validated graph, if every stage passed.
    pub fn graph(&self) -> Option<&ScenarioGraph> {
        match self {
            Self::Valid(graph) => Some(graph),
            Self::Invalid { .. } => None,
        }
    }

    /// The failing stage, if any.
    pub fn stage(&self) -> Option<ValidationStage> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { stage, .. } => Some(*stage),
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&ScenarioError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { error, .. } => Some(error),
        }
    }

    /// Converts into a `Result`, dropping the stage.
    pub fn into_result(self) -> Result<ScenarioGraph, ScenarioError> {
        match self {
            Self::Valid(graph) => Ok(graph),
            Self::Invalid { error, .. } => Err(error),
        }
    }
}

/// Result of validating a file: the outcome plus, on success, the parsed document.
#[derive(Debug, Clone)]
pub struct FileValidation {
    outcome: ValidationOutcome,
    document: Option<Value>,
}

impl FileValidation {
    /// Returns true if the file held a valid scenario.
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// Human-readable result.
    pub fn message(&self) -> String {
        self.outcome.message()
    }

    /// The validation outcome.
    pub fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    /// The parsed document; present only when validation passed.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Splits into the outcome and the document.
    pub fn into_parts(self) -> (ValidationOutcome, Option<Value>) {
        (self.outcome, self.document)
    }
}

/// Runs the validation pipeline against scenario documents.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The validator's configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates an in-memory document.
    #[instrument(skip_all)]
    pub fn validate_data(&self, document: &Value) -> ValidationOutcome {
        match self.run(document) {
            Ok(graph) => {
                info!(scenes = graph.len(), "Scenario passed validation");
                ValidationOutcome::Valid(graph)
            }
            Err((stage, error)) => {
                warn!(%stage, %error, "Scenario failed validation");
                ValidationOutcome::Invalid { stage, error }
            }
        }
    }

    /// Validates a JSON file. Read and decode failures are reported as
    /// [`ValidationStage::Load`] outcomes.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn validate_file(&self, path: impl AsRef<Path>) -> FileValidation {
        self.validate_loaded(path.as_ref(), |text| {
            serde_json::from_str(text)
                .map_err(|e| ScenarioError::new(ScenarioErrorKind::Parse(e.to_string())))
        })
    }

    /// Validates a file of raw generator output, extracting the embedded JSON document first.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn validate_text_file(&self, path: impl AsRef<Path>) -> FileValidation {
        self.validate_loaded(path.as_ref(), |text| {
            extract_document(text).ok_or_else(|| {
                ScenarioError::new(ScenarioErrorKind::Parse(
                    "no JSON document found in text".to_string(),
                ))
            })
        })
    }

    fn validate_loaded(
        &self,
        path: &Path,
        decode: impl FnOnce(&str) -> Result<Value, ScenarioError>,
    ) -> FileValidation {
        let document = match read_text(path).and_then(|text| decode(&text)) {
            Ok(document) => document,
            Err(error) => {
                warn!(%error, "Could not load scenario file");
                return FileValidation {
                    outcome: ValidationOutcome::Invalid {
                        stage: ValidationStage::Load,
                        error,
                    },
                    document: None,
                };
            }
        };

        let outcome = self.validate_data(&document);
        let document = outcome.is_valid().then_some(document);
        FileValidation { outcome, document }
    }

    fn run(&self, document: &Value) -> Result<ScenarioGraph, (ValidationStage, ScenarioError)> {
        use ValidationStage::*;

        let scenes = scene_values(document).map_err(at(Schema))?;
        check_minimum_size(scenes.len()).map_err(at(MinimumSize))?;

        let graph = ScenarioGraph::from_scene_values(scenes, *self.config.duplicate_policy())
            .map_err(at(SceneSchema))?;

        check_references(&graph).map_err(at(ReferenceIntegrity))?;
        check_branch(&graph).map_err(at(BranchExistence))?;
        self.check_depth(&graph).map_err(at(DepthCheck))?;

        Ok(graph)
    }

    fn check_depth(&self, graph: &ScenarioGraph) -> Result<(), ScenarioError> {
        let enumeration =
            PathEnumerator::new(graph, *self.config.limits()).enumerate(self.config.start_scene())?;

        debug!(
            paths = enumeration.paths().len(),
            dropped = enumeration.dropped_branches(),
            "Depth check enumerated paths"
        );

        if enumeration.has_path_of(MIN_PATH_LENGTH) {
            Ok(())
        } else {
            Err(ScenarioError::new(ScenarioErrorKind::Depth {
                required: MIN_PATH_LENGTH,
            }))
        }
    }
}

fn at(stage: ValidationStage) -> impl FnOnce(ScenarioError) -> (ValidationStage, ScenarioError) {
    move |error| (stage, error)
}

fn check_minimum_size(found: usize) -> Result<(), ScenarioError> {
    if found < MIN_SCENES {
        return Err(ScenarioError::new(ScenarioErrorKind::Size {
            found,
            required: MIN_SCENES,
        }));
    }
    Ok(())
}

fn check_references(graph: &ScenarioGraph) -> Result<(), ScenarioError> {
    let missing = graph.missing_references();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScenarioError::new(ScenarioErrorKind::Reference { missing }))
    }
}

fn check_branch(graph: &ScenarioGraph) -> Result<(), ScenarioError> {
    if graph.branch_count() > 0 {
        Ok(())
    } else {
        Err(ScenarioError::new(ScenarioErrorKind::Topology {
            required: MIN_BRANCH_CHOICES,
        }))
    }
}

fn read_text(path: &Path) -> Result<String, ScenarioError> {
    std::fs::read_to_string(path).map_err(|e| {
        let message = if e.kind() == std::io::ErrorKind::NotFound {
            format!("file not found: '{}'", path.display())
        } else {
            format!("failed to read file '{}': {}", path.display(), e)
        };
        ScenarioError::new(ScenarioErrorKind::Io(message))
    })
}
