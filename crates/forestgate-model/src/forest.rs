//! Random Forest classifier over a flat-array tree artifact
//!
//! The artifact mirrors what scikit-learn keeps per fitted tree: a node
//! array rooted at index 0 where split nodes name a feature, a threshold
//! and two child indices, and leaves carry per-class weights. Prediction
//! averages the normalized leaf distributions across trees and returns the
//! class with the highest mean probability.

use crate::classifier::{check_features, Classifier, ModelMetadata};
use forestgate_core::{Error, Label, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_NAME: &str = "RandomForestClassifier";

/// Serialized form of a forest, as read from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Optional model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expected input width
    pub n_features: usize,

    /// Class labels, in the order leaf weights are stored
    pub classes: Vec<Label>,

    /// One entry per tree
    pub estimators: Vec<TreeArtifact>,
}

/// Serialized decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

/// Serialized tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    /// Internal node: go left when `x[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Terminal node with one weight per class
    Leaf { value: Vec<f64> },
}

/// A validated, immutable Random Forest
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    description: Option<String>,
    n_features: usize,
    classes: Vec<Label>,
    trees: Vec<DecisionTree>,
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: Vec<f64>,
    },
}

impl RandomForest {
    /// Validate an artifact and build the forest
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self> {
        if artifact.n_features == 0 {
            return Err(Error::model_load("n_features must be greater than zero"));
        }
        if artifact.classes.is_empty() {
            return Err(Error::model_load("model declares no classes"));
        }
        if artifact.estimators.is_empty() {
            return Err(Error::model_load("model contains no estimators"));
        }

        let n_classes = artifact.classes.len();
        let trees = artifact
            .estimators
            .into_iter()
            .enumerate()
            .map(|(t, tree)| DecisionTree::build(t, tree, artifact.n_features, n_classes))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: artifact.description,
            n_features: artifact.n_features,
            classes: artifact.classes,
            trees,
        })
    }

    /// Class labels in probability order
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Number of trees in the ensemble
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Optional description carried by the artifact
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Mean class probabilities across all trees
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_features(&self.name, self.n_features, features)?;

        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.leaf(features)) {
                *total += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        for total in &mut totals {
            *total /= n_trees;
        }

        Ok(totals)
    }

    /// Predict the label with the highest mean probability
    pub fn predict(&self, features: &[f64]) -> Result<Label> {
        let proba = self.predict_proba(features)?;

        // First maximum wins ties, as numpy's argmax does.
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }

        Ok(self.classes[best].clone())
    }
}

impl Classifier for RandomForest {
    fn classify(&self, features: &[f64]) -> Result<Label> {
        self.predict(features)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: self.name.clone(),
            n_features: self.n_features,
            classes: self.classes.clone(),
            n_estimators: Some(self.trees.len()),
        }
    }
}

impl DecisionTree {
    fn build(index: usize, artifact: TreeArtifact, n_features: usize, n_classes: usize) -> Result<Self> {
        if artifact.nodes.is_empty() {
            return Err(Error::model_load(format!("tree {} has no nodes", index)));
        }

        let n_nodes = artifact.nodes.len();
        let invalid = |node: usize, msg: String| {
            Error::model_load(format!("tree {} node {}: {}", index, node, msg))
        };

        let mut nodes = Vec::with_capacity(n_nodes);
        for (i, node) in artifact.nodes.into_iter().enumerate() {
            match node {
                NodeArtifact::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(invalid(
                            i,
                            format!("feature {} out of range for {} features", feature, n_features),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(i, "threshold is not finite".to_string()));
                    }
                    // Children must come after their parent; this rules out cycles.
                    for child in [left, right] {
                        if child <= i || child >= n_nodes {
                            return Err(invalid(i, format!("invalid child index {}", child)));
                        }
                    }
                    nodes.push(Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    });
                }
                NodeArtifact::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(invalid(
                            i,
                            format!("leaf has {} weights for {} classes", value.len(), n_classes),
                        ));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(invalid(i, "leaf weights must be finite and non-negative".to_string()));
                    }
                    let sum: f64 = value.iter().sum();
                    if sum <= 0.0 {
                        return Err(invalid(i, "leaf weights sum to zero".to_string()));
                    }
                    nodes.push(Node::Leaf {
                        proba: value.iter().map(|w| w / sum).collect(),
                    });
                }
            }
        }

        Ok(Self { nodes })
    }

    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // scikit-learn evaluates splits on float32 inputs
                    let value = features[*feature] as f32 as f64;
                    index = if value <= *threshold { *left } else { *right };
                }
                Node::Leaf { proba } => return proba,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One stump on feature 0 at 0.5: left leaf is class 0, right is class 1
    fn stump(threshold: f64) -> TreeArtifact {
        TreeArtifact {
            nodes: vec![
                NodeArtifact::Split {
                    feature: 0,
                    threshold,
                    left: 1,
                    right: 2,
                },
                NodeArtifact::Leaf {
                    value: vec![10.0, 0.0],
                },
                NodeArtifact::Leaf {
                    value: vec![1.0, 9.0],
                },
            ],
        }
    }

    fn artifact(estimators: Vec<TreeArtifact>) -> ForestArtifact {
        ForestArtifact {
            name: None,
            description: None,
            n_features: 2,
            classes: vec![Label::Int(0), Label::Int(1)],
            estimators,
        }
    }

    #[test]
    fn test_stump_prediction() {
        let forest = RandomForest::from_artifact(artifact(vec![stump(0.5)])).unwrap();

        assert_eq!(forest.predict(&[0.2, 0.9]).unwrap(), Label::Int(0));
        assert_eq!(forest.predict(&[0.8, 0.0]).unwrap(), Label::Int(1));
        assert_eq!(forest.name(), "RandomForestClassifier");
        assert_eq!(forest.n_estimators(), 1);
    }

    #[test]
    fn test_split_is_inclusive_on_threshold() {
        let forest = RandomForest::from_artifact(artifact(vec![stump(0.5)])).unwrap();
        assert_eq!(forest.predict(&[0.5, 0.0]).unwrap(), Label::Int(0));
    }

    #[test]
    fn test_probabilities_are_averaged() {
        let forest =
            RandomForest::from_artifact(artifact(vec![stump(0.5), stump(0.9)])).unwrap();

        let proba = forest.predict_proba(&[0.7, 0.0]).unwrap();
        // tree 1 -> [0.1, 0.9], tree 2 -> [1.0, 0.0]
        assert!((proba[0] - 0.55).abs() < 1e-12);
        assert!((proba[1] - 0.45).abs() < 1e-12);
        assert_eq!(forest.predict(&[0.7, 0.0]).unwrap(), Label::Int(0));
    }

    #[test]
    fn test_ties_go_to_first_class() {
        let tree = TreeArtifact {
            nodes: vec![NodeArtifact::Leaf {
                value: vec![5.0, 5.0],
            }],
        };
        let forest = RandomForest::from_artifact(artifact(vec![tree])).unwrap();
        assert_eq!(forest.predict(&[0.0, 0.0]).unwrap(), Label::Int(0));
    }

    #[test]
    fn test_wrong_width_is_classification_error() {
        let forest = RandomForest::from_artifact(artifact(vec![stump(0.5)])).unwrap();
        let err = forest.predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Classification(_)));
        assert!(err.to_string().contains("expecting 2 features"));
    }

    #[test]
    fn test_rejects_backward_child() {
        let tree = TreeArtifact {
            nodes: vec![
                NodeArtifact::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 0,
                },
                NodeArtifact::Leaf {
                    value: vec![1.0, 0.0],
                },
            ],
        };
        let err = RandomForest::from_artifact(artifact(vec![tree])).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
        assert!(err.to_string().contains("invalid child index 0"));
    }

    #[test]
    fn test_rejects_feature_out_of_range() {
        let mut tree = stump(0.5);
        tree.nodes[0] = NodeArtifact::Split {
            feature: 7,
            threshold: 0.5,
            left: 1,
            right: 2,
        };
        let err = RandomForest::from_artifact(artifact(vec![tree])).unwrap_err();
        assert!(err.to_string().contains("feature 7 out of range"));
    }

    #[test]
    fn test_rejects_leaf_width_mismatch() {
        let tree = TreeArtifact {
            nodes: vec![NodeArtifact::Leaf {
                value: vec![1.0, 2.0, 3.0],
            }],
        };
        let err = RandomForest::from_artifact(artifact(vec![tree])).unwrap_err();
        assert!(err.to_string().contains("3 weights for 2 classes"));
    }

    #[test]
    fn test_rejects_empty_forest() {
        let err = RandomForest::from_artifact(artifact(vec![])).unwrap_err();
        assert!(err.to_string().contains("no estimators"));
    }

    #[test]
    fn test_split_nodes_ignore_extra_value_field() {
        let json = r#"{"feature": 0, "threshold": 0.5, "left": 1, "right": 2, "value": [3.0, 3.0]}"#;
        let node: NodeArtifact = serde_json::from_str(json).unwrap();
        assert!(matches!(node, NodeArtifact::Split { feature: 0, .. }));
    }
}
