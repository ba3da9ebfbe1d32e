//! Section F — constrained generative writing.
//!
//! Between three and five prompts drawn from six templates. Scoring checks
//! the sentence budget first, then required tokens and lexical coherence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, shuffle, SeededRng};
use crate::text::{normalize_words, split_sentences, CoherenceModel, LexicalCoherence};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeConstraint {
    pub max_sentences: usize,
    pub must_include: Vec<String>,
    pub style_hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeRubric {
    pub min_coherence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeItem {
    pub id: String,
    pub prompt: String,
    pub constraints: GenerativeConstraint,
    pub rubric: GenerativeRubric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<GenerativeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeResponse {
    pub item_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeDetails {
    pub sentences: usize,
    pub missing_tokens: Vec<String>,
    pub coherence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeItemResult {
    pub item_id: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<GenerativeDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeSectionScore {
    pub overall: f64,
    pub items: Vec<GenerativeItemResult>,
}

pub fn generate_generative_section(seed: &str) -> GenerativeSection {
    let mut rng = SeededRng::new(&format!("gen-{seed}"));
    let count = TEMPLATES.len().min(3 + rng.int(3));
    let items: Vec<GenerativeItem> = shuffle(&TEMPLATES, &mut rng)
        .into_iter()
        .take(count)
        .map(|template| GenerativeItem {
            id: format!("F-{}", id_fragment(&mut rng)),
            prompt: template.prompt.to_string(),
            constraints: GenerativeConstraint {
                max_sentences: template.max_sentences,
                must_include: template
                    .must_include
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect(),
                style_hint: template.style_hint.to_string(),
            },
            rubric: GenerativeRubric {
                min_coherence_score: template.min_coherence,
            },
        })
        .collect();

    tracing::debug!(item_count = items.len(), "generated generative section");

    GenerativeSection {
        label: "Generative Constraints & Calibration".to_string(),
        duration_seconds: 150,
        description: "Produce concise textual outputs under Authority constraints.".to_string(),
        items,
    }
}

pub fn grade_generative_section(
    section: &GenerativeSection,
    responses: &[GenerativeResponse],
) -> GenerativeSectionScore {
    let response_map: HashMap<&str, &GenerativeResponse> = responses
        .iter()
        .map(|r| (r.item_id.as_str(), r))
        .collect();

    let items: Vec<GenerativeItemResult> = section
        .items
        .iter()
        .map(|item| match response_map.get(item.id.as_str()) {
            None => GenerativeItemResult {
                item_id: item.id.clone(),
                correctness: 0.0,
                feedback: Some("No submission received.".to_string()),
                details: None,
            },
            Some(response) => evaluate_generative(item, response, &LexicalCoherence),
        })
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    GenerativeSectionScore { overall, items }
}

fn evaluate_generative(
    item: &GenerativeItem,
    response: &GenerativeResponse,
    model: &dyn CoherenceModel,
) -> GenerativeItemResult {
    let text = response.text.trim();
    if text.is_empty() {
        return GenerativeItemResult {
            item_id: item.id.clone(),
            correctness: 0.0,
            feedback: Some("Empty submission.".to_string()),
            details: None,
        };
    }

    let sentences = split_sentences(text);
    if sentences.len() > item.constraints.max_sentences {
        return GenerativeItemResult {
            item_id: item.id.clone(),
            correctness: 0.25,
            feedback: Some(format!(
                "Exceeded sentence limit ({}/{}).",
                sentences.len(),
                item.constraints.max_sentences
            )),
            details: None,
        };
    }

    let lowered = text.to_lowercase();
    let missing_tokens: Vec<String> = item
        .constraints
        .must_include
        .iter()
        .filter(|token| !lowered.contains(&token.to_lowercase()))
        .cloned()
        .collect();
    let tokens_met = missing_tokens.is_empty();

    let words = normalize_words(text);
    let coherence_score = model.coherence(&words, sentences.len().max(1));
    let meets_coherence = coherence_score >= item.rubric.min_coherence_score;

    let (correctness, feedback) = match (tokens_met, meets_coherence) {
        (true, true) => (
            1.0,
            "Constraints satisfied within coherence threshold.".to_string(),
        ),
        (false, true) => (
            0.5,
            format!("Missing required tokens: {}.", missing_tokens.join(", ")),
        ),
        (true, false) => (
            0.5,
            "Required tokens present but coherence below threshold.".to_string(),
        ),
        (false, false) => (
            0.25,
            format!(
                "Missing tokens ({}) and coherence below threshold.",
                missing_tokens.join(", ")
            ),
        ),
    };

    GenerativeItemResult {
        item_id: item.id.clone(),
        correctness,
        feedback: Some(feedback),
        details: Some(GenerativeDetails {
            sentences: sentences.len(),
            missing_tokens,
            coherence_score,
        }),
    }
}

// -- templates ----------------------------------------------------------------

#[derive(Clone, Copy)]
struct GenerativeTemplate {
    prompt: &'static str,
    max_sentences: usize,
    must_include: &'static [&'static str],
    style_hint: &'static str,
    min_coherence: f64,
}

static TEMPLATES: [GenerativeTemplate; 6] = [
    GenerativeTemplate {
        prompt:
            "Deliver a 2-sentence tribunal memo explaining why the language module flagged semantic brittleness.",
        max_sentences: 2,
        must_include: &["heteroscedasticity", "telemetry", "orthonormal"],
        style_hint: "Tone must resemble a forensic linguistic audit.",
        min_coherence: 0.7,
    },
    GenerativeTemplate {
        prompt:
            "Compose a 3-sentence cross-section synopsis tying arithmetic drift to grid inference failures.",
        max_sentences: 3,
        must_include: &["carry-propagation", "grid inference", "posterior", "entropy"],
        style_hint: "Sound like a Bayesian reliability engineer briefing leadership.",
        min_coherence: 0.68,
    },
    GenerativeTemplate {
        prompt:
            "Summarise the perception log in a single sentence highlighting the odd channel weighting.",
        max_sentences: 1,
        must_include: &["telemetry", "eigenvector", "anomaly"],
        style_hint: "Compression-grade note destined for the Authority console.",
        min_coherence: 0.62,
    },
    GenerativeTemplate {
        prompt:
            "Issue a 2-sentence verdict on the science section’s causal claims while referencing observed biases.",
        max_sentences: 2,
        must_include: &["collider", "hypothesis", "verdict"],
        style_hint: "Formal compliance prose with zero adornment.",
        min_coherence: 0.65,
    },
    GenerativeTemplate {
        prompt:
            "Craft a one-sentence anomaly report linking arithmetic latency spikes to spectral diagnostics.",
        max_sentences: 1,
        must_include: &["latency", "spectral", "diagnostic"],
        style_hint: "Telemetry console output referencing FFT metrics.",
        min_coherence: 0.6,
    },
    GenerativeTemplate {
        prompt:
            "Write a 2-sentence note describing how the specimen handled grid reasoning transforms.",
        max_sentences: 2,
        must_include: &["affine", "symmetry break", "adjudication"],
        style_hint: "Make it read like a mathematician’s adjudication memo.",
        min_coherence: 0.66,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(max_sentences: usize, must_include: &[&str], min_coherence: f64) -> GenerativeItem {
        GenerativeItem {
            id: "F-0001".into(),
            prompt: "Write.".into(),
            constraints: GenerativeConstraint {
                max_sentences,
                must_include: must_include.iter().map(|t| (*t).to_string()).collect(),
                style_hint: "Terse.".into(),
            },
            rubric: GenerativeRubric {
                min_coherence_score: min_coherence,
            },
        }
    }

    fn respond(text: &str) -> GenerativeResponse {
        GenerativeResponse {
            item_id: "F-0001".into(),
            text: text.into(),
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_generative_section("constraint-seed");
        let b = generate_generative_section("constraint-seed");
        assert_eq!(a, b);
    }

    #[test]
    fn section_draws_between_three_and_five_items() {
        for seed in ["one", "two", "three", "four", "five", "six"] {
            let section = generate_generative_section(seed);
            assert!((3..=5).contains(&section.items.len()), "seed {seed}");
            for item in &section.items {
                assert!(item.id.starts_with("F-"));
                assert!(!item.constraints.must_include.is_empty());
            }
        }
    }

    #[test]
    fn sentence_overflow_caps_credit() {
        let item = sample_item(1, &[], 0.0);
        let result = evaluate_generative(
            &item,
            &respond("First sentence. Second sentence. Third sentence."),
            &LexicalCoherence,
        );
        assert_eq!(result.correctness, 0.25);
        assert_eq!(result.feedback.as_deref(), Some("Exceeded sentence limit (3/1)."));
        assert!(result.details.is_none());
    }

    #[test]
    fn satisfied_constraints_score_one() {
        let item = sample_item(2, &["latency", "spectral"], 0.0);
        let result = evaluate_generative(
            &item,
            &respond("Latency spiked under spectral load during the diagnostic window."),
            &LexicalCoherence,
        );
        assert_eq!(result.correctness, 1.0);
        let details = result.details.unwrap();
        assert_eq!(details.sentences, 1);
        assert!(details.missing_tokens.is_empty());
    }

    #[test]
    fn missing_tokens_halve_credit() {
        let item = sample_item(2, &["latency", "spectral"], 0.0);
        let result = evaluate_generative(
            &item,
            &respond("Latency spiked during the overnight diagnostic window."),
            &LexicalCoherence,
        );
        assert_eq!(result.correctness, 0.5);
        assert_eq!(
            result.feedback.as_deref(),
            Some("Missing required tokens: spectral.")
        );
        assert_eq!(result.details.unwrap().missing_tokens, vec!["spectral"]);
    }

    #[test]
    fn low_coherence_with_tokens_halves_credit() {
        let item = sample_item(3, &["alpha"], 0.999);
        let result = evaluate_generative(
            &item,
            &respond("alpha alpha alpha alpha."),
            &LexicalCoherence,
        );
        assert_eq!(result.correctness, 0.5);
        assert_eq!(
            result.feedback.as_deref(),
            Some("Required tokens present but coherence below threshold.")
        );
    }

    #[test]
    fn double_failure_quarters_credit() {
        let item = sample_item(3, &["omega"], 0.999);
        let result = evaluate_generative(
            &item,
            &respond("alpha alpha alpha alpha."),
            &LexicalCoherence,
        );
        assert_eq!(result.correctness, 0.25);
        assert!(result
            .feedback
            .unwrap()
            .starts_with("Missing tokens (omega)"));
    }

    #[test]
    fn empty_and_missing_submissions_score_zero() {
        let section = generate_generative_section("empty");
        let item = &section.items[0];
        let blank = GenerativeResponse {
            item_id: item.id.clone(),
            text: "   ".into(),
        };
        let score = grade_generative_section(&section, &[blank]);
        assert_eq!(score.items[0].correctness, 0.0);
        assert_eq!(score.items[0].feedback.as_deref(), Some("Empty submission."));
        assert!(score
            .items
            .iter()
            .skip(1)
            .all(|r| r.feedback.as_deref() == Some("No submission received.")));
    }
}
