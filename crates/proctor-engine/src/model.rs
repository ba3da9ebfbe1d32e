//! Shared data model: section codes and scoring primitives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The six section codes of a full battery, in fixed plan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionCode {
    #[serde(rename = "A")]
    Language,
    #[serde(rename = "B")]
    Arithmetic,
    #[serde(rename = "C")]
    GridReasoning,
    #[serde(rename = "D")]
    Perception,
    #[serde(rename = "E")]
    Science,
    #[serde(rename = "F")]
    Generative,
}

impl SectionCode {
    pub const ALL: [SectionCode; 6] = [
        SectionCode::Language,
        SectionCode::Arithmetic,
        SectionCode::GridReasoning,
        SectionCode::Perception,
        SectionCode::Science,
        SectionCode::Generative,
    ];

    pub fn letter(self) -> char {
        match self {
            SectionCode::Language => 'A',
            SectionCode::Arithmetic => 'B',
            SectionCode::GridReasoning => 'C',
            SectionCode::Perception => 'D',
            SectionCode::Science => 'E',
            SectionCode::Generative => 'F',
        }
    }
}

impl fmt::Display for SectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for SectionCode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(SectionCode::Language),
            "B" => Ok(SectionCode::Arithmetic),
            "C" => Ok(SectionCode::GridReasoning),
            "D" => Ok(SectionCode::Perception),
            "E" => Ok(SectionCode::Science),
            "F" => Ok(SectionCode::Generative),
            other => Err(EngineError::UnknownSectionCode(other.to_string())),
        }
    }
}

/// Atomic grading output for one item. `correctness` is always in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub item_id: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ItemResult {
    pub fn new(item_id: impl Into<String>, correctness: f64, feedback: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            correctness,
            feedback: Some(feedback.into()),
        }
    }
}

/// Per-section score: unweighted mean of item correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub overall: f64,
    pub items: Vec<ItemResult>,
}

impl SectionScore {
    /// Averages item correctness; an empty item list scores 0.
    pub fn from_items(items: Vec<ItemResult>) -> Self {
        let overall = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
        };
        Self { overall, items }
    }
}

/// Clamp into [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_display_and_parse() {
        assert_eq!(SectionCode::Language.to_string(), "A");
        assert_eq!(SectionCode::Generative.to_string(), "F");
        assert_eq!("c".parse::<SectionCode>().unwrap(), SectionCode::GridReasoning);
        assert_eq!(" E ".parse::<SectionCode>().unwrap(), SectionCode::Science);
        assert!("G".parse::<SectionCode>().is_err());
    }

    #[test]
    fn code_serde_uses_letters() {
        let json = serde_json::to_string(&SectionCode::Arithmetic).unwrap();
        assert_eq!(json, "\"B\"");
        let back: SectionCode = serde_json::from_str("\"D\"").unwrap();
        assert_eq!(back, SectionCode::Perception);
    }

    #[test]
    fn section_score_averages() {
        let score = SectionScore::from_items(vec![
            ItemResult::new("x", 1.0, "ok"),
            ItemResult::new("y", 0.5, "partial"),
        ]);
        assert!((score.overall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_section_scores_zero() {
        let score = SectionScore::from_items(vec![]);
        assert_eq!(score.overall, 0.0);
        assert!(score.items.is_empty());
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.3), 0.3);
    }
}
