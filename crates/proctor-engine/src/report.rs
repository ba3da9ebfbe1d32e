//! Grade-report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{clamp01, ItemResult, SectionCode};
use crate::sections::arithmetic::ArithmeticSectionScore;
use crate::sections::generative::GenerativeSectionScore;
use crate::sections::grid::GridReasoningScore;
use crate::sections::language::LanguageSectionScore;
use crate::sections::perception::PerceptionSectionScore;
use crate::sections::science::ScienceSectionScore;

/// Normalized per-section result inside a grade report. Each typed section
/// score converts into this shape; item details beyond correctness and
/// feedback stay with the typed scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOutcome {
    pub code: SectionCode,
    pub score: f64,
    pub items: Vec<ItemResult>,
}

impl SectionOutcome {
    fn new(code: SectionCode, overall: f64, items: Vec<ItemResult>) -> Self {
        Self {
            code,
            score: clamp01(overall),
            items,
        }
    }
}

impl From<&LanguageSectionScore> for SectionOutcome {
    fn from(score: &LanguageSectionScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::Language, score.overall, items)
    }
}

impl From<&ArithmeticSectionScore> for SectionOutcome {
    fn from(score: &ArithmeticSectionScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::Arithmetic, score.overall, items)
    }
}

impl From<&GridReasoningScore> for SectionOutcome {
    fn from(score: &GridReasoningScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::GridReasoning, score.overall, items)
    }
}

impl From<&PerceptionSectionScore> for SectionOutcome {
    fn from(score: &PerceptionSectionScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::Perception, score.overall, items)
    }
}

impl From<&ScienceSectionScore> for SectionOutcome {
    fn from(score: &ScienceSectionScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::Science, score.overall, items)
    }
}

impl From<&GenerativeSectionScore> for SectionOutcome {
    fn from(score: &GenerativeSectionScore) -> Self {
        let items = score
            .items
            .iter()
            .map(|r| ItemResult {
                item_id: r.item_id.clone(),
                correctness: r.correctness,
                feedback: r.feedback.clone(),
            })
            .collect();
        Self::new(SectionCode::Generative, score.overall, items)
    }
}

/// A complete grade report for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Seed of the graded plan, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Per-section outcomes, in plan order.
    pub sections: Vec<SectionOutcome>,
    /// Unweighted mean of section scores, clamped into [0, 1].
    pub overall: f64,
}

impl GradeReport {
    pub fn new(seed: Option<String>, sections: Vec<SectionOutcome>) -> Self {
        let overall = if sections.is_empty() {
            0.0
        } else {
            sections.iter().map(|s| s.score).sum::<f64>() / sections.len() as f64
        };
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed,
            sections,
            overall: clamp01(overall),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as a markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Grade Report\n\n");
        out.push_str(&format!("- Report: `{}`\n", self.id));
        out.push_str(&format!("- Created: {}\n", self.created_at.to_rfc3339()));
        if let Some(seed) = &self.seed {
            out.push_str(&format!("- Seed: `{seed}` ({})\n", seed_to_color(seed)));
        }
        out.push_str(&format!("- Overall: **{:.1}%**\n\n", self.overall * 100.0));

        out.push_str("| Section | Score | Items |\n");
        out.push_str("|---------|-------|-------|\n");
        for section in &self.sections {
            out.push_str(&format!(
                "| {} | {:.1}% | {} |\n",
                section.code,
                section.score * 100.0,
                section.items.len()
            ));
        }

        for section in &self.sections {
            out.push_str(&format!("\n## Section {}\n\n", section.code));
            for item in &section.items {
                let feedback = item.feedback.as_deref().unwrap_or("");
                out.push_str(&format!(
                    "- `{}` — {:.0}% {}\n",
                    item.item_id,
                    item.correctness * 100.0,
                    feedback
                ));
            }
        }
        out
    }
}

/// Stable display colour for a seed, as an `hsl(...)` string. Same seed,
/// same hue, so report headers stay recognisable across runs.
pub fn seed_to_color(seed: &str) -> String {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = (hash << 5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    let hue = hash.unsigned_abs() % 360;
    format!("hsl({hue} 70% 55%)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn outcome(code: SectionCode, score: f64) -> SectionOutcome {
        SectionOutcome {
            code,
            score,
            items: vec![ItemResult::new("x-0001", score, "feedback")],
        }
    }

    #[test]
    fn overall_is_mean_of_sections() {
        let report = GradeReport::new(
            Some("seed".into()),
            vec![
                outcome(SectionCode::Language, 1.0),
                outcome(SectionCode::Arithmetic, 0.5),
            ],
        );
        assert!((report.overall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_report_scores_zero() {
        let report = GradeReport::new(None, vec![]);
        assert_eq!(report.overall, 0.0);
        assert!(report.seed.is_none());
    }

    #[test]
    fn section_outcome_clamps_score() {
        let outcome = SectionOutcome::new(SectionCode::Science, 1.2, vec![]);
        assert_eq!(outcome.score, 1.0);
    }

    #[test]
    fn json_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = GradeReport::new(Some("persist".into()), vec![outcome(SectionCode::GridReasoning, 0.8)]);
        report.save_json(&path).unwrap();
        let loaded = GradeReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.seed.as_deref(), Some("persist"));
        assert_eq!(loaded.sections.len(), 1);
        assert!((loaded.overall - report.overall).abs() < 1e-12);
    }

    #[test]
    fn load_missing_file_errors_with_path() {
        let err = GradeReport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.json"));
    }

    #[test]
    fn markdown_lists_every_section() {
        let report = GradeReport::new(
            Some("md".into()),
            vec![
                outcome(SectionCode::Language, 1.0),
                outcome(SectionCode::Generative, 0.25),
            ],
        );
        let markdown = report.to_markdown();
        assert!(markdown.contains("# Grade Report"));
        assert!(markdown.contains("| A | 100.0% | 1 |"));
        assert!(markdown.contains("## Section F"));
        assert!(markdown.contains("hsl("));
    }

    #[test]
    fn seed_color_is_stable_and_bounded() {
        assert_eq!(seed_to_color("authority"), seed_to_color("authority"));
        for seed in ["a", "zebra", "Ω-seed", ""] {
            let color = seed_to_color(seed);
            let hue: u32 = color
                .strip_prefix("hsl(")
                .and_then(|s| s.split(' ').next())
                .unwrap()
                .parse()
                .unwrap();
            assert!(hue < 360, "{color}");
        }
    }
}
