//! The `proctor inspect` command.

use std::path::PathBuf;

use anyhow::Result;

use proctor_engine::plan::TestPlan;
use proctor_engine::report::seed_to_color;

pub fn execute(plan_path: PathBuf) -> Result<()> {
    use comfy_table::{Cell, Table};

    let plan = TestPlan::load_json(&plan_path)?;

    println!("Seed: {} ({})", plan.seed, seed_to_color(&plan.seed));

    let mut table = Table::new();
    table.set_header(vec!["Code", "Label", "Items", "Duration"]);
    let mut total_items = 0;
    let mut total_duration = 0;
    for section in &plan.sections {
        total_items += section.item_count();
        total_duration += section.duration_seconds();
        table.add_row(vec![
            Cell::new(section.code()),
            Cell::new(section.label()),
            Cell::new(section.item_count()),
            Cell::new(format!("{}s", section.duration_seconds())),
        ]);
    }
    println!("{table}");
    println!(
        "{} sections, {} items, {}s total",
        plan.sections.len(),
        total_items,
        total_duration
    );

    Ok(())
}
