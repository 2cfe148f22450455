use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;
use tracing::info;

use storekit_core::Storage;

use crate::progress;

#[derive(Args)]
pub struct RmArgs {
    /// Key to delete
    key: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn run(storage: Arc<dyn Storage>, args: RmArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} from {}?", args.key, storage.location()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let pb = progress::request_spinner(storage.location(), &format!("Deleting {}", args.key));
    let result = storage.delete(&args.key).await;
    pb.finish_and_clear();
    result.with_context(|| format!("failed to delete {}", args.key))?;

    info!(key = %args.key, "deleted");
    Ok(())
}
