//! Summary statistics over a scenario graph and its enumerated paths.

use crate::ScenarioGraph;
use derive_getters::Getters;
use serde::Serialize;

/// Shape of a scenario: size, branching, and path lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ScenarioStats {
    /// Number of distinct scenes
    scene_count: usize,
    /// Scenes offering two or more choices
    branch_count: usize,
    /// Scenes with no choices
    ending_count: usize,
    /// Number of root-to-sink paths
    path_count: usize,
    /// Scenes on the shortest path
    min_path_length: Option<usize>,
    /// Scenes on the longest path
    max_path_length: Option<usize>,
}

impl ScenarioStats {
    /// Collects statistics for `graph` given the paths enumerated from its start scene.
    pub fn collect(graph: &ScenarioGraph, paths: &[Vec<String>]) -> Self {
        let lengths = paths.iter().map(Vec::len);

        Self {
            scene_count: graph.len(),
            branch_count: graph.branch_count(),
            ending_count: graph.scenes().values().filter(|s| s.is_terminal()).count(),
            path_count: paths.len(),
            min_path_length: lengths.clone().min(),
            max_path_length: lengths.max(),
        }
    }
}
