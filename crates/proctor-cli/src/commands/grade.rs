//! The `proctor grade` command.
//!
//! Dispatch from plan sections to their typed graders lives here: the
//! engine's graders are `(Section, Responses) -> Score` pairs and never
//! switch on section codes themselves.

use std::path::PathBuf;

use anyhow::Result;

use proctor_engine::plan::{Section, TestPlan};
use proctor_engine::report::{GradeReport, SectionOutcome};
use proctor_engine::sections::arithmetic::grade_arithmetic_section;
use proctor_engine::sections::generative::grade_generative_section;
use proctor_engine::sections::grid::grade_grid_section;
use proctor_engine::sections::language::grade_language_section;
use proctor_engine::sections::perception::grade_perception_section;
use proctor_engine::sections::science::grade_science_section;

use crate::submission::Submission;

pub fn execute(
    plan_path: PathBuf,
    responses_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let plan = TestPlan::load_json(&plan_path)?;
    let submission = Submission::load_json(&responses_path)?;

    if let Some(submitted_seed) = &submission.seed {
        if *submitted_seed != plan.seed {
            tracing::warn!(
                plan_seed = %plan.seed,
                submitted_seed = %submitted_seed,
                "submission seed does not match plan seed"
            );
        }
    }

    let sections: Vec<SectionOutcome> = plan
        .sections
        .iter()
        .map(|section| grade_section(section, &submission))
        .collect();
    let report = GradeReport::new(Some(plan.seed.clone()), sections);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_summary(&report),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn grade_section(section: &Section, submission: &Submission) -> SectionOutcome {
    match section {
        Section::Language(s) => SectionOutcome::from(&grade_language_section(s, submission.language())),
        Section::Arithmetic(s) => {
            SectionOutcome::from(&grade_arithmetic_section(s, submission.arithmetic()))
        }
        Section::GridReasoning(s) => SectionOutcome::from(&grade_grid_section(s, submission.grid())),
        Section::Perception(s) => {
            SectionOutcome::from(&grade_perception_section(s, submission.perception()))
        }
        Section::Science(s) => SectionOutcome::from(&grade_science_section(s, submission.science())),
        Section::Generative(s) => {
            SectionOutcome::from(&grade_generative_section(s, submission.generative()))
        }
    }
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Section", "Score", "Items"]);
    for section in &report.sections {
        table.add_row(vec![
            Cell::new(section.code),
            Cell::new(format!("{:.1}%", section.score * 100.0)),
            Cell::new(section.items.len()),
        ]);
    }
    println!("{table}");
    println!("Overall: {:.1}%", report.overall * 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_engine::plan::{generate_test_plan, PlanOptions};

    #[test]
    fn empty_submission_grades_every_section_to_zero() {
        let plan = generate_test_plan("grade-cmd", &PlanOptions::default());
        let submission = Submission::default();
        let report = GradeReport::new(
            Some(plan.seed.clone()),
            plan.sections
                .iter()
                .map(|section| grade_section(section, &submission))
                .collect(),
        );
        assert_eq!(report.sections.len(), 6);
        assert_eq!(report.overall, 0.0);
        assert!(report
            .sections
            .iter()
            .all(|s| s.items.iter().all(|i| i.correctness == 0.0)));
    }
}
