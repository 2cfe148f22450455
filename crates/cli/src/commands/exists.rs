use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use storekit_core::Storage;

#[derive(Args)]
pub struct ExistsArgs {
    /// Key to check
    key: String,
}

/// Prints `true` or `false` and returns whether the key was found, so `main`
/// can exit non-zero when it is absent.
pub async fn run(storage: Arc<dyn Storage>, args: ExistsArgs) -> Result<bool> {
    let found = storage
        .exists(&args.key)
        .await
        .with_context(|| format!("failed to check {}", args.key))?;
    if found {
        println!("{}", style("true").green());
    } else {
        println!("{}", style("false").red());
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use storekit_core::create_storage;

    use super::*;

    #[tokio::test]
    async fn reports_presence_as_bool() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("here.txt"), b"x").unwrap();
        let storage = create_storage("local", dir.path().to_str().unwrap()).unwrap();

        let found = run(storage.clone(), ExistsArgs { key: "here.txt".to_string() })
            .await
            .unwrap();
        assert!(found);

        let found = run(storage, ExistsArgs { key: "gone.txt".to_string() })
            .await
            .unwrap();
        assert!(!found);
    }
}
