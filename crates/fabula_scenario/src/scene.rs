//! Scenes and the choices that connect them.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Number of choices a scene needs to count as a branch.
pub const MIN_BRANCH_CHOICES: usize = 2;

/// A directed edge from one scene to another, shown to the player as an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Choice {
    /// Text displayed for this option
    #[new(into)]
    text: String,
    /// Identifier of the scene this choice leads to (may not resolve)
    #[new(into)]
    next_scene: String,
}

/// A node of the narrative graph.
///
/// Choice order is meaningful: it is the numbering a player sees and the order
/// in which path enumeration explores continuations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Scene {
    /// Unique scene identifier
    #[new(into)]
    scene_id: String,
    /// Text displayed when the scene is entered
    #[new(into)]
    text: String,
    /// Outgoing choices, in display order
    choices: Vec<Choice>,
}

impl Scene {
    /// Returns true if the scene ends the story (no choices).
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Returns true if the scene offers at least [`MIN_BRANCH_CHOICES`] choices.
    pub fn is_branch(&self) -> bool {
        self.choices.len() >= MIN_BRANCH_CHOICES
    }

    /// Iterates over the target identifiers of this scene's choices, in order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.next_scene.as_str())
    }
}
