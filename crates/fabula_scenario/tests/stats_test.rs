//! Tests for scenario statistics and text extraction.

use fabula_scenario::{
    Choice, EnumerationLimits, ScenarioGraph, ScenarioStats, Scene, extract_document,
};

fn scene(id: &str, targets: &[&str]) -> Scene {
    let choices = targets
        .iter()
        .map(|target| Choice::new("Go", *target))
        .collect();
    Scene::new(id, "text", choices)
}

#[test]
fn test_stats_for_uneven_branches() {
    let graph = ScenarioGraph::from_scenes([
        scene("start", &["short", "long"]),
        scene("short", &[]),
        scene("long", &["longer"]),
        scene("longer", &["last"]),
        scene("last", &[]),
    ]);
    let paths = graph
        .find_all_paths("start", EnumerationLimits::default())
        .unwrap();

    let stats = ScenarioStats::collect(&graph, &paths);
    assert_eq!(*stats.scene_count(), 5);
    assert_eq!(*stats.branch_count(), 1);
    assert_eq!(*stats.ending_count(), 2);
    assert_eq!(*stats.path_count(), 2);
    assert_eq!(*stats.min_path_length(), Some(2));
    assert_eq!(*stats.max_path_length(), Some(4));
}

#[test]
fn test_stats_without_paths() {
    let graph = ScenarioGraph::from_scenes([scene("a", &["b"]), scene("b", &["a"])]);
    let stats = ScenarioStats::collect(&graph, &[]);

    assert_eq!(*stats.path_count(), 0);
    assert_eq!(*stats.min_path_length(), None);
    assert_eq!(*stats.max_path_length(), None);
}

#[test]
fn test_extract_plain_document() {
    let document = extract_document(r#"{"scenes": []}"#).unwrap();
    assert!(document["scenes"].as_array().unwrap().is_empty());
}

#[test]
fn test_extract_from_prose() {
    let text = "Here you go: {\"scenes\": [{\"scene_id\": \"start\"}]} Have fun!";
    let document = extract_document(text).unwrap();
    assert_eq!(document["scenes"][0]["scene_id"], "start");
}

#[test]
fn test_extract_fails_on_broken_json() {
    assert!(extract_document("no braces here").is_none());
    assert!(extract_document("prefix {\"scenes\": [} suffix").is_none());
}
