//! The `proctor init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("proctor.toml").exists() {
        println!("proctor.toml already exists, skipping.");
    } else {
        std::fs::write("proctor.toml", SAMPLE_CONFIG)?;
        println!("Created proctor.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust proctor.toml if you want a partial battery by default");
    println!("  2. Run: proctor plan --seed my-seed --output plan.json");
    println!("  3. Run: proctor grade --plan plan.json --responses submission.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# proctor configuration

# Section codes generated when --sections is not given.
default_sections = ["A", "B", "C", "D", "E", "F"]

# Directory where reports land by default.
output_dir = "./proctor-results"
"#;
