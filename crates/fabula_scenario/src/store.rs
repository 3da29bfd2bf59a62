//! Scene store: turns a loosely-typed JSON document into a scenario graph.
//!
//! The store keeps scenes in insertion order (the order of the `scenes`
//! array), which makes the fallback start scene deterministic. The adjacency
//! view may name scenes that do not exist; resolving them is the job of the
//! reference-integrity stage, not of the store.

use crate::{Choice, DuplicatePolicy, Scene};
use fabula_error::{ScenarioError, ScenarioErrorKind};
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// A mapping from scene identifier to scene, plus the derived adjacency view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioGraph {
    scenes: IndexMap<String, Scene>,
    adjacency: IndexMap<String, Vec<String>>,
}

impl ScenarioGraph {
    /// Builds a graph from a full document, checking only its structure.
    ///
    /// This runs the schema and scene-schema checks without the size,
    /// reference, branch or depth rules, for callers that need the graph
    /// shape of a document that has not been (or need not be) validated.
    pub fn from_document(
        document: &Value,
        policy: DuplicatePolicy,
    ) -> Result<Self, ScenarioError> {
        let scenes = scene_values(document)?;
        Self::from_scene_values(scenes, policy)
    }

    /// Builds a graph from the elements of a `scenes` array.
    ///
    /// Fails on the first element or choice missing a required field.
    #[instrument(skip_all, fields(scenes = values.len(), policy = ?policy))]
    pub fn from_scene_values(
        values: &[Value],
        policy: DuplicatePolicy,
    ) -> Result<Self, ScenarioError> {
        let mut graph = Self::default();

        for (index, value) in values.iter().enumerate() {
            let scene = parse_scene(index + 1, value)?;

            if graph.scenes.contains_key(scene.scene_id()) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(ScenarioError::new(ScenarioErrorKind::DuplicateScene(
                            scene.scene_id().clone(),
                        )));
                    }
                    DuplicatePolicy::Overwrite => {
                        debug!(
                            scene_id = %scene.scene_id(),
                            "Duplicate scene overwrites earlier one"
                        );
                    }
                }
            }

            graph.insert(scene);
        }

        debug!(scenes = graph.len(), "Scene store built");
        Ok(graph)
    }

    /// Builds a graph from already-typed scenes. Later duplicates overwrite earlier ones.
    pub fn from_scenes(scenes: impl IntoIterator<Item = Scene>) -> Self {
        let mut graph = Self::default();
        for scene in scenes {
            graph.insert(scene);
        }
        graph
    }

    // IndexMap keeps the first position of a key and replaces its value.
    fn insert(&mut self, scene: Scene) {
        let id = scene.scene_id().clone();
        let targets = scene.targets().map(str::to_string).collect();
        self.adjacency.insert(id.clone(), targets);
        self.scenes.insert(id, scene);
    }

    /// Scenes keyed by identifier, in insertion order.
    pub fn scenes(&self) -> &IndexMap<String, Scene> {
        &self.scenes
    }

    /// Looks up a scene by identifier.
    pub fn get(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.get(scene_id)
    }

    /// Returns true if a scene with this identifier exists.
    pub fn contains(&self, scene_id: &str) -> bool {
        self.scenes.contains_key(scene_id)
    }

    /// Outgoing targets of a scene; empty for unknown identifiers.
    pub fn targets(&self, scene_id: &str) -> &[String] {
        self.adjacency
            .get(scene_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if the graph holds no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Resolves the root scene for traversal.
    ///
    /// Returns `preferred` if such a scene exists, otherwise the first scene
    /// in insertion order, or `None` for an empty graph.
    pub fn start_scene<'a>(&'a self, preferred: &'a str) -> Option<&'a str> {
        if self.contains(preferred) {
            Some(preferred)
        } else {
            self.scenes.keys().next().map(String::as_str)
        }
    }

    /// Choice targets that name no scene, deduplicated in first-seen order.
    pub fn missing_references(&self) -> Vec<String> {
        let missing: IndexSet<&str> = self
            .adjacency
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|target| !self.contains(target))
            .collect();

        missing.into_iter().map(str::to_string).collect()
    }

    /// Number of scenes offering two or more choices.
    pub fn branch_count(&self) -> usize {
        self.scenes.values().filter(|scene| scene.is_branch()).count()
    }
}

/// Extracts the `scenes` array from a document.
pub fn scene_values(document: &Value) -> Result<&[Value], ScenarioError> {
    let Some(object) = document.as_object() else {
        return Err(structural("document must be a JSON object with a 'scenes' field"));
    };

    match object.get("scenes") {
        None => Err(structural("document does not contain a 'scenes' field")),
        Some(Value::Array(scenes)) => Ok(scenes.as_slice()),
        Some(_) => Err(structural("field 'scenes' must be an array")),
    }
}

fn parse_scene(position: usize, value: &Value) -> Result<Scene, ScenarioError> {
    let Some(object) = value.as_object() else {
        return Err(structural(format!("scene #{} must be an object", position)));
    };

    let scene_id = required_str(object, "scene_id", || format!("scene #{}", position))?;
    let owner = || format!("scene '{}'", scene_id);
    let text = required_str(object, "text", owner)?;

    let choices = match object.get("choices") {
        None => return Err(structural(format!("{} is missing field 'choices'", owner()))),
        Some(Value::Array(choices)) => choices,
        Some(_) => {
            return Err(structural(format!(
                "{}: field 'choices' must be an array",
                owner()
            )));
        }
    };

    let choices = choices
        .iter()
        .enumerate()
        .map(|(index, choice)| parse_choice(scene_id, index + 1, choice))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scene::new(scene_id, text, choices))
}

fn parse_choice(scene_id: &str, position: usize, value: &Value) -> Result<Choice, ScenarioError> {
    let owner = || format!("scene '{}': choice #{}", scene_id, position);

    let Some(object) = value.as_object() else {
        return Err(structural(format!("{} must be an object", owner())));
    };

    let text = required_str(object, "text", owner)?;
    let next_scene = required_str(object, "next_scene", owner)?;
    Ok(Choice::new(text, next_scene))
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    owner: impl Fn() -> String,
) -> Result<&'a str, ScenarioError> {
    match object.get(field) {
        None => Err(structural(format!(
            "{} is missing field '{}'",
            owner(),
            field
        ))),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(structural(format!(
            "{}: field '{}' must be a string",
            owner(),
            field
        ))),
    }
}

#[track_caller]
fn structural(message: impl Into<String>) -> ScenarioError {
    ScenarioError::new(ScenarioErrorKind::Structural(message.into()))
}
