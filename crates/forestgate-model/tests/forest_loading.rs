//! Loading forests from artifact files on disk

use forestgate_core::{Error, Label};
use forestgate_model::{load_from_config, load_model, Classifier, ModelConfigSpec, ModelFormat};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

/// Three-feature forest: two trees voting on features 0 and 2
fn three_feature_artifact() -> serde_json::Value {
    json!({
        "name": "fraud-rf",
        "n_features": 3,
        "classes": [0, 1],
        "estimators": [
            { "nodes": [
                { "feature": 0, "threshold": 1.5, "left": 1, "right": 2 },
                { "value": [8.0, 2.0] },
                { "value": [1.0, 9.0] }
            ] },
            { "nodes": [
                { "feature": 2, "threshold": 2.5, "left": 1, "right": 2 },
                { "value": [6.0, 4.0] },
                { "value": [0.0, 5.0] }
            ] }
        ]
    })
}

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_json_artifact() {
    let file = write_temp(&three_feature_artifact().to_string(), ".json");
    let forest = load_model(file.path()).unwrap();

    assert_eq!(forest.n_features(), 3);
    assert_eq!(forest.name(), "fraud-rf");
    assert_eq!(forest.n_estimators(), 2);

    // both trees go right
    assert_eq!(forest.classify(&[2.0, 0.0, 3.0]).unwrap(), Label::Int(1));
    // both trees go left
    assert_eq!(forest.classify(&[1.0, 2.0, 1.0]).unwrap(), Label::Int(0));
}

#[test]
fn test_metadata_describes_forest() {
    let file = write_temp(&three_feature_artifact().to_string(), ".json");
    let forest = load_model(file.path()).unwrap();

    let metadata = forest.metadata();
    assert_eq!(metadata.n_features, 3);
    assert_eq!(metadata.classes, vec![Label::Int(0), Label::Int(1)]);
    assert_eq!(metadata.n_estimators, Some(2));
}

#[test]
fn test_load_yaml_via_config_with_overrides() {
    let yaml = serde_yaml::to_string(&three_feature_artifact()).unwrap();
    // extension says nothing about the format, the config does
    let file = write_temp(&yaml, ".model");

    let spec = ModelConfigSpec {
        path: file.path().to_path_buf(),
        format: Some(ModelFormat::Yaml),
        name: Some("renamed".to_string()),
    };

    let forest = load_from_config(&spec).unwrap();
    assert_eq!(forest.name(), "renamed");
    assert_eq!(forest.n_features(), 3);
}

#[test]
fn test_invalid_structure_is_reported() {
    let mut artifact = three_feature_artifact();
    artifact["estimators"][1]["nodes"][0]["feature"] = json!(9);
    let file = write_temp(&artifact.to_string(), ".json");

    let err = load_model(file.path()).unwrap_err();
    assert!(matches!(err, Error::ModelLoad(_)));
    assert!(err.to_string().contains("tree 1 node 0"));
}

#[test]
fn test_string_labels() {
    let mut artifact = three_feature_artifact();
    artifact["classes"] = json!(["legit", "fraud"]);
    let file = write_temp(&artifact.to_string(), ".json");

    let forest = load_model(file.path()).unwrap();
    assert_eq!(
        forest.classify(&[2.0, 0.0, 3.0]).unwrap(),
        Label::Text("fraud".to_string())
    );
}
