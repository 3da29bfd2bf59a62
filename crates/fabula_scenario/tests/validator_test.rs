//! Tests for the scenario validation pipeline.

use fabula_error::ScenarioErrorKind;
use fabula_scenario::{
    DuplicatePolicy, EnumerationLimitsBuilder, SUCCESS_MESSAGE, ValidationConfigBuilder,
    ValidationStage, Validator,
};
use serde_json::{Value, json};
use std::collections::HashSet;

fn scene(id: &str, targets: &[&str]) -> Value {
    let choices: Vec<Value> = targets
        .iter()
        .map(|target| json!({"text": format!("Go to {}", target), "next_scene": target}))
        .collect();
    json!({"scene_id": id, "text": format!("Scene {}", id), "choices": choices})
}

fn document(scenes: Vec<Value>) -> Value {
    json!({ "scenes": scenes })
}

fn diamond() -> Value {
    document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["c"]),
        scene("b", &["c"]),
        scene("c", &["end"]),
        scene("end", &[]),
    ])
}

#[test]
fn test_valid_diamond_scenario() {
    let outcome = Validator::default().validate_data(&diamond());

    assert!(outcome.is_valid(), "Expected valid scenario, got: {:?}", outcome.error());
    assert_eq!(outcome.message(), SUCCESS_MESSAGE);
    assert_eq!(outcome.stage(), None);

    let graph = outcome.graph().unwrap();
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.targets("start"), ["a".to_string(), "b".to_string()]);
}

#[test]
fn test_renamed_target_is_reference_error() {
    let doc = document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["c"]),
        scene("b", &["c"]),
        scene("c", &["ending"]),
        scene("end", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert!(!outcome.is_valid());
    assert_eq!(outcome.stage(), Some(ValidationStage::ReferenceIntegrity));
    assert_eq!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::Reference {
            missing: vec!["ending".to_string()]
        }
    );
    assert!(outcome.message().contains("'ending'"));
}

#[test]
fn test_four_scenes_is_size_error() {
    let doc = document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["end"]),
        scene("b", &["end"]),
        scene("end", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::MinimumSize));
    assert_eq!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::Size {
            found: 4,
            required: 5
        }
    );
    assert!(outcome.message().contains("found 4"));
}

#[test]
fn test_size_error_wins_over_every_later_defect() {
    // Dangling reference, no branch, malformed scene: size is still reported.
    let doc = document(vec![
        scene("start", &["nowhere"]),
        json!("not a scene"),
        json!({"scene_id": "x"}),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::MinimumSize));
}

#[test]
fn test_missing_scenes_field() {
    let outcome = Validator::default().validate_data(&json!({"title": "quest"}));
    assert_eq!(outcome.stage(), Some(ValidationStage::Schema));
    assert!(outcome.message().contains("'scenes'"));
}

#[test]
fn test_scenes_must_be_array() {
    let outcome = Validator::default().validate_data(&json!({"scenes": {"start": {}}}));
    assert_eq!(outcome.stage(), Some(ValidationStage::Schema));
    assert!(outcome.message().contains("must be an array"));
}

#[test]
fn test_top_level_must_be_object() {
    let outcome = Validator::default().validate_data(&json!([1, 2, 3]));
    assert_eq!(outcome.stage(), Some(ValidationStage::Schema));
}

#[test]
fn test_non_object_scene_names_its_position() {
    let mut scenes: Vec<Value> = (0..5).map(|i| scene(&format!("s{}", i), &[])).collect();
    scenes[1] = json!(42);

    let outcome = Validator::default().validate_data(&document(scenes));
    assert_eq!(outcome.stage(), Some(ValidationStage::SceneSchema));
    assert_eq!(outcome.message(), "scene #2 must be an object");
}

#[test]
fn test_missing_scene_id() {
    let mut scenes: Vec<Value> = (0..5).map(|i| scene(&format!("s{}", i), &[])).collect();
    scenes[3] = json!({"text": "anonymous", "choices": []});

    let outcome = Validator::default().validate_data(&document(scenes));
    assert_eq!(outcome.message(), "scene #4 is missing field 'scene_id'");
}

#[test]
fn test_missing_text_names_scene() {
    let mut scenes: Vec<Value> = (0..5).map(|i| scene(&format!("s{}", i), &[])).collect();
    scenes[0] = json!({"scene_id": "start", "choices": []});

    let outcome = Validator::default().validate_data(&document(scenes));
    assert_eq!(outcome.stage(), Some(ValidationStage::SceneSchema));
    assert_eq!(outcome.message(), "scene 'start' is missing field 'text'");
}

#[test]
fn test_choices_must_be_array() {
    let mut scenes: Vec<Value> = (0..5).map(|i| scene(&format!("s{}", i), &[])).collect();
    scenes[2] = json!({"scene_id": "s2", "text": "t", "choices": "none"});

    let outcome = Validator::default().validate_data(&document(scenes));
    assert_eq!(outcome.message(), "scene 's2': field 'choices' must be an array");
}

#[test]
fn test_choice_missing_target_names_index() {
    let mut scenes: Vec<Value> = (0..5).map(|i| scene(&format!("s{}", i), &[])).collect();
    scenes[0] = json!({"scene_id": "start", "text": "t", "choices": [
        {"text": "ok", "next_scene": "s1"},
        {"text": "broken"}
    ]});

    let outcome = Validator::default().validate_data(&document(scenes));
    assert_eq!(
        outcome.message(),
        "scene 'start': choice #2 is missing field 'next_scene'"
    );
}

#[test]
fn test_missing_references_are_deduplicated() {
    let doc = document(vec![
        scene("start", &["a", "ghost", "b"]),
        scene("a", &["ghost", "phantom"]),
        scene("b", &["phantom", "end"]),
        scene("c", &["ghost"]),
        scene("end", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    let Some(ScenarioErrorKind::Reference { missing }) = outcome.error().map(|e| e.kind.clone())
    else {
        panic!("Expected reference error, got: {:?}", outcome);
    };

    let missing: HashSet<String> = missing.into_iter().collect();
    let expected: HashSet<String> = ["ghost", "phantom"].iter().map(|s| s.to_string()).collect();
    assert_eq!(missing, expected);
}

#[test]
fn test_reference_message_shows_first_five() {
    let doc = document(vec![
        scene("start", &["m1", "m2", "m3", "m4", "m5", "m6", "m7"]),
        scene("a", &[]),
        scene("b", &[]),
        scene("c", &[]),
        scene("d", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(
        outcome.message(),
        "references to nonexistent scenes: 'm1', 'm2', 'm3', 'm4', 'm5' and 2 more"
    );
}

#[test]
fn test_reference_error_reported_before_missing_branch() {
    let doc = document(vec![
        scene("start", &["a"]),
        scene("a", &["b"]),
        scene("b", &["c"]),
        scene("c", &["gone"]),
        scene("end", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::ReferenceIntegrity));
}

#[test]
fn test_linear_story_has_no_branch() {
    let doc = document(vec![
        scene("start", &["a"]),
        scene("a", &["b"]),
        scene("b", &["c"]),
        scene("c", &["end"]),
        scene("end", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::BranchExistence));
    assert!(matches!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::Topology { .. }
    ));
    assert!(outcome.message().contains("no branch found"));
}

#[test]
fn test_cycle_without_sink_fails_depth() {
    let doc = document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["start"]),
        scene("b", &["start", "a"]),
        scene("c", &["start"]),
        scene("d", &["c"]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::DepthCheck));
    assert!(matches!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::Depth { required: 3 }
    ));
}

#[test]
fn test_shallow_paths_fail_depth() {
    let doc = document(vec![
        scene("start", &["end1", "end2"]),
        scene("end1", &[]),
        scene("end2", &[]),
        scene("x", &["y"]),
        scene("y", &[]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::DepthCheck));
}

#[test]
fn test_first_scene_is_root_without_start() {
    let doc = document(vec![
        scene("intro", &["a", "b"]),
        scene("a", &["end"]),
        scene("b", &["end"]),
        scene("end", &[]),
        scene("orphan", &[]),
    ]);

    assert!(Validator::default().validate_data(&doc).is_valid());
}

#[test]
fn test_configured_start_scene() {
    // Only the path from "deep" is long enough.
    let doc = document(vec![
        scene("start", &["e1", "e2"]),
        scene("e1", &[]),
        scene("e2", &[]),
        scene("deep", &["mid"]),
        scene("mid", &["e1"]),
    ]);

    assert!(!Validator::default().validate_data(&doc).is_valid());

    let config = ValidationConfigBuilder::default()
        .start_scene("deep")
        .build()
        .unwrap();
    assert!(Validator::new(config).validate_data(&doc).is_valid());
}

#[test]
fn test_duplicate_scene_overwrites_by_default() {
    let doc = document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["end"]),
        scene("b", &["end"]),
        scene("end", &[]),
        scene("a", &["b"]),
    ]);

    let outcome = Validator::default().validate_data(&doc);
    assert!(outcome.is_valid());

    let graph = outcome.graph().unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.targets("a"), ["b".to_string()]);
    assert_eq!(graph.scenes().get_index_of("a"), Some(1));
}

#[test]
fn test_duplicate_scene_rejected_by_policy() {
    let doc = document(vec![
        scene("start", &["a", "b"]),
        scene("a", &["end"]),
        scene("b", &["end"]),
        scene("end", &[]),
        scene("a", &["b"]),
    ]);

    let config = ValidationConfigBuilder::default()
        .duplicate_policy(DuplicatePolicy::Reject)
        .build()
        .unwrap();

    let outcome = Validator::new(config).validate_data(&doc);
    assert_eq!(outcome.stage(), Some(ValidationStage::SceneSchema));
    assert_eq!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::DuplicateScene("a".to_string())
    );
}

#[test]
fn test_path_ceiling_surfaces_as_resource_exceeded() {
    let limits = EnumerationLimitsBuilder::default()
        .max_paths(1usize)
        .build()
        .unwrap();
    let config = ValidationConfigBuilder::default()
        .limits(limits)
        .build()
        .unwrap();

    let outcome = Validator::new(config).validate_data(&diamond());
    assert_eq!(outcome.stage(), Some(ValidationStage::DepthCheck));
    assert_eq!(
        outcome.error().unwrap().kind,
        ScenarioErrorKind::ResourceExceeded {
            limit: "max_paths",
            value: 1
        }
    );
}

#[test]
fn test_validator_keeps_no_state_between_calls() {
    let validator = Validator::default();

    let first = validator.validate_data(&diamond());
    let second = validator.validate_data(&json!({"scenes": []}));
    let third = validator.validate_data(&diamond());

    assert!(first.is_valid());
    assert_eq!(second.stage(), Some(ValidationStage::MinimumSize));
    assert!(third.is_valid());
    assert_eq!(first.graph(), third.graph());
}

#[test]
fn test_into_result() {
    let graph = Validator::default()
        .validate_data(&diamond())
        .into_result()
        .unwrap();
    assert!(graph.contains("end"));

    let err = Validator::default()
        .validate_data(&json!({}))
        .into_result()
        .unwrap_err();
    assert!(matches!(err.kind, ScenarioErrorKind::Structural(_)));
}
