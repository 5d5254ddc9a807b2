//! Mock classifiers for search tests
//!
//! Configurable implementations of the Classifier trait for exercising
//! strategy order, budgets, cancellation and error paths.

#![allow(dead_code)]

use forestgate_core::{Error, Label, Result};
use forestgate_model::{Classifier, ForestArtifact, NodeArtifact, RandomForest, TreeArtifact};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Returns a fixed label and counts calls
pub struct ConstantClassifier {
    label: Label,
    width: usize,
    call_count: AtomicU64,
}

impl ConstantClassifier {
    pub fn new(label: i64, width: usize) -> Self {
        Self {
            label: Label::Int(label),
            width,
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Classifier for ConstantClassifier {
    fn classify(&self, _features: &[f64]) -> Result<Label> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.label.clone())
    }

    fn n_features(&self) -> usize {
        self.width
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Labels `1` when the first coordinate exceeds a threshold, else `0`.
/// Records any call whose vector has the wrong width.
pub struct FirstCoordinateAbove {
    threshold: f64,
    width: usize,
    call_count: AtomicU64,
    width_violations: AtomicU64,
}

impl FirstCoordinateAbove {
    pub fn new(threshold: f64, width: usize) -> Self {
        Self {
            threshold,
            width,
            call_count: AtomicU64::new(0),
            width_violations: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn width_violations(&self) -> u64 {
        self.width_violations.load(Ordering::Relaxed)
    }
}

impl Classifier for FirstCoordinateAbove {
    fn classify(&self, features: &[f64]) -> Result<Label> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if features.len() != self.width {
            self.width_violations.fetch_add(1, Ordering::Relaxed);
        }
        let positive = features.first().is_some_and(|x| *x > self.threshold);
        Ok(Label::Int(positive as i64))
    }

    fn n_features(&self) -> usize {
        self.width
    }

    fn name(&self) -> &str {
        "first-coordinate"
    }
}

/// Always fails to classify
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _features: &[f64]) -> Result<Label> {
        Err(Error::classification("Simulated classifier failure"))
    }

    fn n_features(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Raises a cancellation flag after a number of calls, always labels `0`
pub struct CancelAfter {
    calls: u64,
    flag: Arc<AtomicBool>,
    call_count: AtomicU64,
}

impl CancelAfter {
    pub fn new(calls: u64, flag: Arc<AtomicBool>) -> Self {
        Self {
            calls,
            flag,
            call_count: AtomicU64::new(0),
        }
    }
}

impl Classifier for CancelAfter {
    fn classify(&self, _features: &[f64]) -> Result<Label> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed) + 1;
        if n >= self.calls {
            self.flag.store(true, Ordering::Relaxed);
        }
        Ok(Label::Int(0))
    }

    fn n_features(&self) -> usize {
        3
    }

    fn name(&self) -> &str {
        "cancel-after"
    }
}

/// Four-feature forest labelling `1` only when `x[0] <= 0.1` and
/// `x[1] > 0.85`: none of `high`, `low` or `mixed` can hit it, `bimodal` can
pub fn bimodal_only_forest() -> RandomForest {
    let tree = TreeArtifact {
        nodes: vec![
            NodeArtifact::Split {
                feature: 0,
                threshold: 0.1,
                left: 1,
                right: 2,
            },
            NodeArtifact::Split {
                feature: 1,
                threshold: 0.85,
                left: 3,
                right: 4,
            },
            NodeArtifact::Leaf {
                value: vec![1.0, 0.0],
            },
            NodeArtifact::Leaf {
                value: vec![1.0, 0.0],
            },
            NodeArtifact::Leaf {
                value: vec![0.0, 1.0],
            },
        ],
    };

    RandomForest::from_artifact(ForestArtifact {
        name: Some("bimodal-only".to_string()),
        description: None,
        n_features: 4,
        classes: vec![Label::Int(0), Label::Int(1)],
        estimators: vec![tree],
    })
    .expect("fixture forest must be valid")
}
