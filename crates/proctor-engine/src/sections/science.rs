//! Section E — science and quantitative reasoning.
//!
//! Two items are drawn from each of three fixed banks: Fermi estimates,
//! dimensional analysis, and causal-inference traps. A response only counts
//! when its declared kind matches the item's kind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, shuffle, SeededRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScienceKind {
    Fermi,
    Units,
    Causal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ScienceKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<ScienceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceResponse {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: ScienceKind,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceItemResult {
    pub item_id: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceSectionScore {
    pub overall: f64,
    pub items: Vec<ScienceItemResult>,
}

pub fn generate_science_section(seed: &str) -> ScienceSection {
    let mut rng = SeededRng::new(&format!("science-{seed}"));
    let fermi = choose_many(&FERMI_BANK, 2, &mut rng);
    let units = choose_many(&UNITS_BANK, 2, &mut rng);
    let causal = choose_many(&CAUSAL_BANK, 2, &mut rng);

    let items: Vec<ScienceItem> = fermi
        .into_iter()
        .chain(units)
        .chain(causal)
        .map(|template| ScienceItem {
            id: format!("E-{}", id_fragment(&mut rng)),
            kind: template.kind,
            prompt: template.prompt.to_string(),
            options: template.options.iter().map(|o| (*o).to_string()).collect(),
            correct_index: template.correct_index,
            rationale: template.rationale.to_string(),
        })
        .collect();

    tracing::debug!(item_count = items.len(), "generated science section");

    ScienceSection {
        label: "Science & Quantitative Reasoning".to_string(),
        duration_seconds: 150,
        description: "Fermi estimates, dimensional analysis, and causal traps.".to_string(),
        items,
    }
}

pub fn grade_science_section(
    section: &ScienceSection,
    responses: &[ScienceResponse],
) -> ScienceSectionScore {
    let response_map: HashMap<&str, &ScienceResponse> = responses
        .iter()
        .map(|r| (r.item_id.as_str(), r))
        .collect();

    let items: Vec<ScienceItemResult> = section
        .items
        .iter()
        .map(|item| {
            let response = response_map
                .get(item.id.as_str())
                .filter(|r| r.kind == item.kind);
            match response {
                None => ScienceItemResult {
                    item_id: item.id.clone(),
                    correctness: 0.0,
                    feedback: Some("No answer submitted.".to_string()),
                },
                Some(response) => {
                    let correct = response.selected_index == item.correct_index;
                    ScienceItemResult {
                        item_id: item.id.clone(),
                        correctness: if correct { 1.0 } else { 0.0 },
                        feedback: Some(if correct {
                            "Response within expected bounds.".to_string()
                        } else {
                            item.rationale.clone()
                        }),
                    }
                }
            }
        })
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    ScienceSectionScore { overall, items }
}

// -- banks -------------------------------------------------------------------

#[derive(Clone, Copy)]
struct ScienceTemplate {
    kind: ScienceKind,
    prompt: &'static str,
    options: [&'static str; 4],
    correct_index: usize,
    rationale: &'static str,
}

fn choose_many(bank: &[ScienceTemplate], count: usize, rng: &mut SeededRng) -> Vec<ScienceTemplate> {
    let pool = shuffle(bank, rng);
    pool.into_iter().take(count.min(bank.len())).collect()
}

static FERMI_BANK: [ScienceTemplate; 3] = [
    ScienceTemplate {
        kind: ScienceKind::Fermi,
        prompt:
            "Order-of-magnitude: how many telemetry packets (8 KB each) do 2,400 sensors streaming at 32 Hz emit over a 10-minute diagnostic?",
        options: [
            "≈5×10⁵ packets",
            "≈5×10⁶ packets",
            "≈5×10⁷ packets",
            "≈5×10⁸ packets",
        ],
        correct_index: 2,
        rationale:
            "2,400 × 32 Hz × 600 s ≈ 4.6×10⁷ samples, so tens of millions of packets is the right scale.",
    },
    ScienceTemplate {
        kind: ScienceKind::Fermi,
        prompt:
            "Approximate the kilowatt-hours consumed by a 1.2 MW data hall operating continuously for 48 hours.",
        options: ["≈6×10³ kWh", "≈6×10⁴ kWh", "≈6×10⁵ kWh", "≈6×10⁶ kWh"],
        correct_index: 1,
        rationale: "1.2 MW = 1,200 kW; ×48 h ≈ 5.8×10⁴ kWh, i.e. tens of thousands.",
    },
    ScienceTemplate {
        kind: ScienceKind::Fermi,
        prompt:
            "An RNA polymerase advances at 3×10⁻⁷ m/s. In 90 s, roughly how many bases (0.34 nm spacing) are transcribed?",
        options: ["≈8×10³ bases", "≈8×10⁴ bases", "≈8×10⁵ bases", "≈8×10⁶ bases"],
        correct_index: 1,
        rationale: "Distance ≈ 2.7×10⁻⁵ m; dividing by 3.4×10⁻¹⁰ m/base gives ≈8×10⁴ bases.",
    },
];

static UNITS_BANK: [ScienceTemplate; 3] = [
    ScienceTemplate {
        kind: ScienceKind::Units,
        prompt: "Which expression carries the dimensions of dynamic viscosity?",
        options: ["Pa·s", "N·s", "kg/m²", "A·s"],
        correct_index: 0,
        rationale: "Dynamic viscosity η has SI units Pa·s (equivalently kg·m⁻¹·s⁻¹).",
    },
    ScienceTemplate {
        kind: ScienceKind::Units,
        prompt: "Select the combination matching inductance units.",
        options: ["V·s/A", "A·s/V", "V·A", "C/s"],
        correct_index: 0,
        rationale: "Henries equal volt-seconds per ampere.",
    },
    ScienceTemplate {
        kind: ScienceKind::Units,
        prompt: "Which construction reduces to the SI base units of spectral radiance?",
        options: ["W·sr⁻¹·m⁻³", "W·m⁻²", "W·sr·m", "J·m⁻³"],
        correct_index: 0,
        rationale:
            "Spectral radiance is power per steradian per unit area per unit wavelength: W·sr⁻¹·m⁻³.",
    },
];

static CAUSAL_BANK: [ScienceTemplate; 3] = [
    ScienceTemplate {
        kind: ScienceKind::Causal,
        prompt:
            "A/B test shows users who enable dark mode churn less, but enabling is optional. Which explanation best fits the data?",
        options: [
            "Dark mode directly lowers churn for everyone.",
            "Opting in signals conscientious users who churn less regardless.",
            "Reduced churn causes users to enable dark mode later.",
            "The effect is pure measurement noise.",
        ],
        correct_index: 1,
        rationale: "Self-selection introduces a confounder (user conscientiousness).",
    },
    ScienceTemplate {
        kind: ScienceKind::Causal,
        prompt:
            "In a medical study, treatment and adverse outcome both depend on frailty. Conditioning on hospital admission reverses the treatment effect. What bias appeared?",
        options: [
            "Confounding by frailty.",
            "Collider bias from conditioning on admission.",
            "Simpson’s paradox due to subgrouping.",
            "Post-treatment bias from adjusting on the outcome.",
        ],
        correct_index: 1,
        rationale:
            "Admission is a collider influenced by treatment and frailty; conditioning induces spurious association.",
    },
    ScienceTemplate {
        kind: ScienceKind::Causal,
        prompt:
            "Alert logs show engineers paging more often during high-traffic weeks, and incidents also spike. Which interpretation holds?",
        options: [
            "Paging causes incidents.",
            "Incidents cause paging.",
            "Traffic load drives both paging volume and incidents.",
            "Paging volume and incidents are causally unrelated.",
        ],
        correct_index: 2,
        rationale: "Traffic load is the latent driver of both variables.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = generate_science_section("estimate-seed");
        let b = generate_science_section("estimate-seed");
        assert_eq!(a, b);
    }

    #[test]
    fn section_draws_two_items_per_kind() {
        let section = generate_science_section("composition");
        assert_eq!(section.items.len(), 6);
        let count = |kind: ScienceKind| section.items.iter().filter(|i| i.kind == kind).count();
        assert_eq!(count(ScienceKind::Fermi), 2);
        assert_eq!(count(ScienceKind::Units), 2);
        assert_eq!(count(ScienceKind::Causal), 2);

        let mut ids: Vec<&str> = section.items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert!(ids.iter().all(|id| id.starts_with("E-")));
    }

    #[test]
    fn correct_selection_scores_one() {
        let section = generate_science_section("grading");
        let responses: Vec<ScienceResponse> = section
            .items
            .iter()
            .map(|item| ScienceResponse {
                item_id: item.id.clone(),
                kind: item.kind,
                selected_index: item.correct_index,
            })
            .collect();
        let score = grade_science_section(&section, &responses);
        assert_eq!(score.overall, 1.0);
    }

    #[test]
    fn wrong_selection_surfaces_rationale() {
        let section = generate_science_section("rationale");
        let item = &section.items[0];
        let response = ScienceResponse {
            item_id: item.id.clone(),
            kind: item.kind,
            selected_index: (item.correct_index + 1) % item.options.len(),
        };
        let score = grade_science_section(&section, &[response]);
        assert_eq!(score.items[0].correctness, 0.0);
        assert_eq!(score.items[0].feedback.as_deref(), Some(item.rationale.as_str()));
    }

    #[test]
    fn kind_mismatch_counts_as_missing() {
        let section = generate_science_section("kind-mismatch");
        let item = &section.items[0];
        let wrong_kind = match item.kind {
            ScienceKind::Fermi => ScienceKind::Units,
            _ => ScienceKind::Fermi,
        };
        let response = ScienceResponse {
            item_id: item.id.clone(),
            kind: wrong_kind,
            selected_index: item.correct_index,
        };
        let score = grade_science_section(&section, &[response]);
        assert_eq!(score.items[0].correctness, 0.0);
        assert_eq!(score.items[0].feedback.as_deref(), Some("No answer submitted."));
    }

    #[test]
    fn missing_responses_score_zero() {
        let section = generate_science_section("missing");
        let score = grade_science_section(&section, &[]);
        assert_eq!(score.overall, 0.0);
        assert_eq!(score.items.len(), 6);
    }

    #[test]
    fn kind_serialises_lowercase() {
        let section = generate_science_section("serde");
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains("\"type\":\"fermi\""));
        assert!(json.contains("\"type\":\"causal\""));
        let back: ScienceSection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, section);
    }
}
