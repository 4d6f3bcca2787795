//! The `quadrix init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quadrix.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("answers.example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: quadrix register --first-name Ada --last-name Lovelace --login ada");
    println!("  2. Run: quadrix new --user <USER_ID>");
    println!("  3. Fill in answers.example.toml and run: quadrix score --set <SET_ID> --answers answers.example.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quadrix configuration

default_count = 10
min_count = 1
max_count = 100
# seed = 42

[store]
type = "json"
path = "./quadrix-store.json"
"#;

const EXAMPLE_ANSWERS: &str = r#"# Answers for one equation set.
# `equation` is the number shown by `quadrix list`; root order does not matter.

[[answers]]
equation = 1
root1 = 3.0
root2 = -5.0

[[answers]]
equation = 2
root1 = 0.5
root2 = 0.5
"#;
