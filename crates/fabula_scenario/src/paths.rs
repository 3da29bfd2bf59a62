//! Exhaustive, cycle-safe enumeration of root-to-sink paths.
//!
//! Traversal is depth-first over an explicit stack of frames, each carrying the
//! path walked so far and the set of scenes on it. A path is recorded only when
//! it reaches a sink (a scene with no choices). Continuations that would revisit
//! a scene already on the current path are never expanded, and a frame left with
//! no continuation records nothing: graphs whose only loops never reach a sink
//! yield no paths at all. Such frames are counted as dropped branches.
//!
//! Targets that name no scene are skipped. Shared sub-targets are re-expanded for
//! every path that reaches them, so work grows combinatorially; the
//! [`EnumerationLimits`] ceilings turn runaway enumeration into an error.

use crate::{EnumerationLimits, ScenarioGraph};
use derive_getters::Getters;
use fabula_error::{ScenarioError, ScenarioErrorKind};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// The paths found from one start scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Enumeration {
    /// Every root-to-sink path, in discovery order
    paths: Vec<Vec<String>>,
    /// Frames abandoned because every continuation revisited the path
    dropped_branches: usize,
    /// Frames expanded during traversal
    visits: usize,
}

impl Enumeration {
    /// Consumes the enumeration, returning the paths.
    pub fn into_paths(self) -> Vec<Vec<String>> {
        self.paths
    }

    /// Returns true if some path visits at least `length` scenes.
    pub fn has_path_of(&self, length: usize) -> bool {
        self.paths.iter().any(|path| path.len() >= length)
    }
}

struct Frame<'g> {
    scene: &'g str,
    path: Vec<&'g str>,
    visited: HashSet<&'g str>,
}

/// Depth-first path enumerator over a read-only graph.
#[derive(Debug, Clone, Copy)]
pub struct PathEnumerator<'g> {
    graph: &'g ScenarioGraph,
    limits: EnumerationLimits,
}

impl<'g> PathEnumerator<'g> {
    /// Creates an enumerator bounded by `limits`.
    pub fn new(graph: &'g ScenarioGraph, limits: EnumerationLimits) -> Self {
        Self { graph, limits }
    }

    /// Enumerates every path from `start`.
    ///
    /// Falls back to the first scene in insertion order when `start` does not
    /// exist; an empty graph yields no paths. Output order follows choice
    /// order, first choice first.
    #[instrument(skip(self), fields(scenes = self.graph.len()))]
    pub fn enumerate(&self, start: &str) -> Result<Enumeration, ScenarioError> {
        let mut enumeration = Enumeration::default();
        let max_visits = *self.limits.max_visits();
        let max_depth = *self.limits.max_depth();
        let max_paths = *self.limits.max_paths();

        let Some(root) = self.graph.start_scene(start) else {
            debug!("Empty graph, nothing to enumerate");
            return Ok(enumeration);
        };

        let mut stack = vec![Frame {
            scene: root,
            path: Vec::new(),
            visited: HashSet::new(),
        }];

        while let Some(Frame {
            scene,
            mut path,
            mut visited,
        }) = stack.pop()
        {
            enumeration.visits += 1;
            if enumeration.visits > max_visits {
                return Err(exceeded("max_visits", max_visits));
            }

            path.push(scene);
            visited.insert(scene);
            if path.len() > max_depth {
                return Err(exceeded("max_depth", max_depth));
            }

            let targets = self.graph.targets(scene);
            if targets.is_empty() {
                if enumeration.paths.len() == max_paths {
                    return Err(exceeded("max_paths", max_paths));
                }
                enumeration
                    .paths
                    .push(path.iter().map(|id| id.to_string()).collect());
                continue;
            }

            let continuations: Vec<&str> = targets
                .iter()
                .map(String::as_str)
                .filter(|target| self.graph.contains(target) && !visited.contains(target))
                .collect();

            if continuations.is_empty() {
                enumeration.dropped_branches += 1;
                continue;
            }

            // Reversed so the first choice is popped first.
            for next in continuations.into_iter().rev() {
                stack.push(Frame {
                    scene: next,
                    path: path.clone(),
                    visited: visited.clone(),
                });
            }
        }

        debug!(
            paths = enumeration.paths.len(),
            dropped = enumeration.dropped_branches,
            visits = enumeration.visits,
            "Enumeration complete"
        );
        Ok(enumeration)
    }
}

impl ScenarioGraph {
    /// Lists every root-to-sink path from `start`, bounded by `limits`.
    pub fn find_all_paths(
        &self,
        start: &str,
        limits: EnumerationLimits,
    ) -> Result<Vec<Vec<String>>, ScenarioError> {
        PathEnumerator::new(self, limits)
            .enumerate(start)
            .map(Enumeration::into_paths)
    }
}

#[track_caller]
fn exceeded(limit: &'static str, value: usize) -> ScenarioError {
    ScenarioError::new(ScenarioErrorKind::ResourceExceeded { limit, value })
}
