//! The `quadrix register` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(
    config_path: Option<PathBuf>,
    first_name: String,
    last_name: String,
    login: String,
) -> Result<()> {
    let (_, engine) = super::open_engine(config_path.as_deref())?;
    let id = engine.register(&first_name, &last_name, &login).await?;

    // Bare id on stdout so scripts can capture it.
    println!("{id}");
    Ok(())
}
