use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use storekit_core::Storage;

use crate::progress;

#[derive(Args)]
pub struct WriteArgs {
    /// Key to write
    key: String,

    /// Content to store
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    content: Option<String>,

    /// Read the content from a local file instead
    #[arg(long)]
    file: Option<PathBuf>,
}

pub async fn run(storage: Arc<dyn Storage>, args: WriteArgs) -> Result<()> {
    let content = match (&args.content, &args.file) {
        (Some(content), _) => content.clone().into_bytes(),
        (None, Some(file)) => tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?,
        (None, None) => anyhow::bail!("either <CONTENT> or --file is required"),
    };

    let pb = progress::request_spinner(storage.location(), &format!("Writing {}", args.key));
    let result = storage.write(&args.key, &content).await;
    pb.finish_and_clear();
    result.with_context(|| format!("failed to write {}", args.key))?;

    info!(key = %args.key, bytes = content.len(), "written");
    Ok(())
}
