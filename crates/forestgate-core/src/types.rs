//! Core types for forestgate

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A discrete class label produced by a classifier.
///
/// Serialized untagged, so integer labels appear as bare JSON numbers
/// (`[1]`) and string labels as JSON strings (`["fraud"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer class label
    Int(i64),
    /// String class label
    Text(String),
}

impl Label {
    /// Get the integer value, if this is an integer label
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::Int(1)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Integers parse as `Int`, anything else as `Text`
impl FromStr for Label {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_json_shapes() {
        assert_eq!(serde_json::to_string(&Label::Int(1)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&Label::from("fraud")).unwrap(),
            "\"fraud\""
        );

        let labels: Vec<Label> = serde_json::from_str(r#"[0, "legit"]"#).unwrap();
        assert_eq!(labels, vec![Label::Int(0), Label::Text("legit".into())]);
    }

    #[test]
    fn test_label_yaml_shapes() {
        let label: Label = serde_yaml::from_str("1").unwrap();
        assert_eq!(label, Label::Int(1));

        let label: Label = serde_yaml::from_str("positive").unwrap();
        assert_eq!(label, Label::Text("positive".into()));
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("1".parse::<Label>().unwrap(), Label::Int(1));
        assert_eq!(" -3 ".parse::<Label>().unwrap(), Label::Int(-3));
        assert_eq!("fraud".parse::<Label>().unwrap(), Label::Text("fraud".into()));
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(Label::default(), Label::Int(1));
        assert_eq!(Label::default().as_int(), Some(1));
    }
}
