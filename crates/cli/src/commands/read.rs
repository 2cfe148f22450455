use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::AsyncWriteExt;

use storekit_core::Storage;

#[derive(Args)]
pub struct ReadArgs {
    /// Key to read
    key: String,
}

pub async fn run(storage: Arc<dyn Storage>, args: ReadArgs) -> Result<()> {
    let mut handle = storage
        .read(&args.key)
        .await
        .with_context(|| format!("failed to read {}", args.key))?;
    let mut stdout = tokio::io::stdout();
    tokio::io::copy(&mut handle, &mut stdout)
        .await
        .with_context(|| format!("failed to stream {}", args.key))?;
    stdout.flush().await?;
    Ok(())
}
