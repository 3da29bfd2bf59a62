//! Scenario graph validation and path enumeration.
//!
//! A scenario is a JSON document of scenes connected by choices. This crate
//! turns such a document into a [`ScenarioGraph`], checks it with a fail-fast
//! [`Validator`] pipeline, and enumerates its root-to-sink paths.
//!
//! ```
//! use fabula_scenario::{Validator, SUCCESS_MESSAGE};
//! use serde_json::json;
//!
//! let document = json!({"scenes": [
//!     {"scene_id": "start", "text": "A fork.", "choices": [
//!         {"text": "Left", "next_scene": "a"},
//!         {"text": "Right", "next_scene": "b"}
//!     ]},
//!     {"scene_id": "a", "text": "Left.", "choices": [{"text": "On", "next_scene": "c"}]},
//!     {"scene_id": "b", "text": "Right.", "choices": [{"text": "On", "next_scene": "c"}]},
//!     {"scene_id": "c", "text": "Join.", "choices": [{"text": "On", "next_scene": "end"}]},
//!     {"scene_id": "end", "text": "The end.", "choices": []}
//! ]});
//!
//! let outcome = Validator::default().validate_data(&document);
//! assert!(outcome.is_valid());
//! assert_eq!(outcome.message(), SUCCESS_MESSAGE);
//! ```

mod config;
mod extract;
mod paths;
mod pipeline;
mod scene;
mod stats;
mod store;

pub use config::{
    DuplicatePolicy, ENV_PREFIX, EnumerationLimits, EnumerationLimitsBuilder, ValidationConfig,
    ValidationConfigBuilder,
};
pub use extract::extract_document;
pub use paths::{Enumeration, PathEnumerator};
pub use pipeline::{
    FileValidation, MIN_PATH_LENGTH, MIN_SCENES, SUCCESS_MESSAGE, ValidationOutcome,
    ValidationStage, Validator,
};
pub use scene::{Choice, MIN_BRANCH_CHOICES, Scene};
pub use stats::ScenarioStats;
pub use store::{ScenarioGraph, scene_values};
