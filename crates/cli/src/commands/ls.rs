use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use storekit_core::{DirEntry, Storage};

use crate::progress;

#[derive(Args)]
pub struct LsArgs {
    /// Directory (local) or prefix (s3); defaults to the root
    #[arg(default_value = "")]
    key: String,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EntryView<'a> {
    name: &'a str,
    is_dir: bool,
}

impl<'a> From<&'a DirEntry> for EntryView<'a> {
    fn from(entry: &'a DirEntry) -> Self {
        Self {
            name: entry.name(),
            is_dir: entry.is_dir(),
        }
    }
}

pub async fn run(storage: Arc<dyn Storage>, args: LsArgs) -> Result<()> {
    let pb = progress::request_spinner(storage.location(), &format!("Listing {}", args.key));
    let entries = storage.list_dir(&args.key).await;
    pb.finish_and_clear();
    let entries = entries.with_context(|| format!("failed to list {}", args.key))?;

    if args.json {
        let views: Vec<EntryView> = entries.iter().map(EntryView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }
    for entry in &entries {
        if entry.is_dir() {
            println!("{}", style(entry.name()).blue().bold());
        } else {
            println!("{}", entry.name());
        }
    }
    Ok(())
}
