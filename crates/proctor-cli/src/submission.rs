//! Submission wire format.
//!
//! A submission pairs section codes with response lists:
//!
//! ```json
//! {
//!   "seed": "optional",
//!   "sections": [
//!     { "code": "A", "responses": [ { "type": "spelling", ... } ] },
//!     { "code": "B", "responses": [ { "itemId": "B-XXXX", "answer": "42" } ] }
//!   ]
//! }
//! ```
//!
//! Plan sections with no matching block grade against an empty response
//! list, which scores zero throughout; they never error.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use proctor_engine::model::SectionCode;
use proctor_engine::sections::arithmetic::ArithmeticResponse;
use proctor_engine::sections::generative::GenerativeResponse;
use proctor_engine::sections::grid::GridReasoningResponse;
use proctor_engine::sections::language::LanguageResponse;
use proctor_engine::sections::perception::PerceptionResponse;
use proctor_engine::sections::science::ScienceResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum SectionResponses {
    #[serde(rename = "A")]
    Language {
        #[serde(default)]
        responses: Vec<LanguageResponse>,
    },
    #[serde(rename = "B")]
    Arithmetic {
        #[serde(default)]
        responses: Vec<ArithmeticResponse>,
    },
    #[serde(rename = "C")]
    GridReasoning {
        #[serde(default)]
        responses: Vec<GridReasoningResponse>,
    },
    #[serde(rename = "D")]
    Perception {
        #[serde(default)]
        responses: Vec<PerceptionResponse>,
    },
    #[serde(rename = "E")]
    Science {
        #[serde(default)]
        responses: Vec<ScienceResponse>,
    },
    #[serde(rename = "F")]
    Generative {
        #[serde(default)]
        responses: Vec<GenerativeResponse>,
    },
}

impl SectionResponses {
    pub fn code(&self) -> SectionCode {
        match self {
            SectionResponses::Language { .. } => SectionCode::Language,
            SectionResponses::Arithmetic { .. } => SectionCode::Arithmetic,
            SectionResponses::GridReasoning { .. } => SectionCode::GridReasoning,
            SectionResponses::Perception { .. } => SectionCode::Perception,
            SectionResponses::Science { .. } => SectionCode::Science,
            SectionResponses::Generative { .. } => SectionCode::Generative,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionResponses>,
}

impl Submission {
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submission from {}", path.display()))?;
        let submission: Submission =
            serde_json::from_str(&content).context("failed to parse submission JSON")?;
        Ok(submission)
    }

    pub fn language(&self) -> &[LanguageResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::Language { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn arithmetic(&self) -> &[ArithmeticResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::Arithmetic { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn grid(&self) -> &[GridReasoningResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::GridReasoning { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn perception(&self) -> &[PerceptionResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::Perception { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn science(&self) -> &[ScienceResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::Science { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn generative(&self) -> &[GenerativeResponse] {
        self.sections
            .iter()
            .find_map(|s| match s {
                SectionResponses::Generative { responses } => Some(responses.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_submission() {
        let json = r#"{
            "seed": "wire",
            "sections": [
                { "code": "B", "responses": [ { "itemId": "B-0001", "answer": "42" } ] },
                { "code": "C", "responses": [ { "itemId": "C-0001", "selectedIndex": 2 } ] },
                { "code": "F" }
            ]
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.seed.as_deref(), Some("wire"));
        assert_eq!(submission.sections.len(), 3);
        assert_eq!(submission.arithmetic().len(), 1);
        assert_eq!(submission.arithmetic()[0].answer, "42");
        assert_eq!(submission.grid()[0].selected_index, 2);
        // Block present without responses parses as empty.
        assert!(submission.generative().is_empty());
        // Absent blocks read as empty slices.
        assert!(submission.language().is_empty());
        assert!(submission.science().is_empty());
    }

    #[test]
    fn empty_object_is_a_valid_submission() {
        let submission: Submission = serde_json::from_str("{}").unwrap();
        assert!(submission.seed.is_none());
        assert!(submission.sections.is_empty());
    }

    #[test]
    fn unknown_code_is_rejected() {
        let json = r#"{ "sections": [ { "code": "Z", "responses": [] } ] }"#;
        assert!(serde_json::from_str::<Submission>(json).is_err());
    }

    #[test]
    fn typed_language_responses_round_trip() {
        let json = r#"{
            "sections": [
                { "code": "A", "responses": [
                    { "type": "spelling", "itemId": "A-0-abcd", "selectedIndex": 1 },
                    { "type": "microwrite", "itemId": "A-8-efgh", "text": "brief" }
                ] }
            ]
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.language().len(), 2);
        let back = serde_json::to_string(&submission).unwrap();
        assert!(back.contains("\"type\":\"microwrite\""));
    }
}
