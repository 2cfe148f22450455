use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use storekit_core::Storage;

#[derive(Args)]
pub struct MkdirArgs {
    /// Directory name
    name: String,

    /// Parent path, relative to the storage root
    #[arg(long, default_value = "")]
    parent: String,
}

pub async fn run(storage: Arc<dyn Storage>, args: MkdirArgs) -> Result<()> {
    storage
        .make_dir(&args.name, &args.parent)
        .await
        .with_context(|| format!("failed to create directory {}", args.name))?;
    Ok(())
}
