//! The `proctor plan` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use proctor_engine::model::SectionCode;
use proctor_engine::plan::{generate_test_plan, PlanOptions, TestPlan};

use crate::config::load_config_from;

pub fn execute(
    seed: String,
    sections: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let list = sections.unwrap_or_else(|| config.default_sections.join(","));
    let include = parse_sections(&list)?;

    let plan = generate_test_plan(
        &seed,
        &PlanOptions {
            include_sections: Some(include),
        },
    );

    print_summary(&plan);

    match output {
        Some(path) => {
            plan.save_json(&path)?;
            eprintln!("Wrote plan to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Parse a comma-separated code list like "A,C,F".
fn parse_sections(list: &str) -> Result<Vec<SectionCode>> {
    let mut codes = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let code: SectionCode = part
            .parse()
            .with_context(|| format!("invalid section list {list:?}"))?;
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        anyhow::bail!("section list {list:?} selects nothing");
    }
    Ok(codes)
}

fn print_summary(plan: &TestPlan) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Code", "Label", "Items", "Duration"]);
    for section in &plan.sections {
        table.add_row(vec![
            Cell::new(section.code()),
            Cell::new(section.label()),
            Cell::new(section.item_count()),
            Cell::new(format!("{}s", section.duration_seconds())),
        ]);
    }
    eprintln!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        let codes = parse_sections("a, C ,f").unwrap();
        assert_eq!(
            codes,
            vec![
                SectionCode::Language,
                SectionCode::GridReasoning,
                SectionCode::Generative
            ]
        );
    }

    #[test]
    fn duplicate_codes_collapse() {
        let codes = parse_sections("B,B,B").unwrap();
        assert_eq!(codes, vec![SectionCode::Arithmetic]);
    }

    #[test]
    fn rejects_unknown_and_empty_lists() {
        assert!(parse_sections("A,G").is_err());
        assert!(parse_sections(" , ").is_err());
    }
}
