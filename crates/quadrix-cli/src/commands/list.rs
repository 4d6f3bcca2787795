//! The `quadrix list` command.

use std::path::PathBuf;

use anyhow::Result;

use quadrix_core::model::UserId;

pub async fn execute(config_path: Option<PathBuf>, user: String, format: String) -> Result<()> {
    super::check_listing_format(&format)?;
    let (_, engine) = super::open_engine(config_path.as_deref())?;
    let owner: UserId = super::parse_id("user", &user)?;

    let listing = engine.latest_set(owner).await?;
    super::print_listing(&listing, &format)
}
