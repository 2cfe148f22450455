use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::{AppConfig, BackendConfig};

#[derive(Args)]
pub struct InitArgs {
    /// S3 region (defaults to AWS_S3_REGION / AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// S3 endpoint URL for S3-compatible stores
    #[arg(long)]
    endpoint: Option<String>,

    /// S3 access key
    #[arg(long, requires = "secret_key")]
    access_key: Option<String>,

    /// S3 secret key
    #[arg(long, requires = "access_key")]
    secret_key: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    path_style: bool,
}

/// Build the config `init` would save from `--backend`/`--root` and the
/// S3 options.
pub fn backend_config(
    backend: Option<&str>,
    root: Option<&str>,
    args: InitArgs,
) -> Result<BackendConfig> {
    let backend = backend.ok_or_else(|| anyhow::anyhow!("--backend required for init"))?;
    let root = root
        .ok_or_else(|| anyhow::anyhow!("--root required for init"))?
        .to_string();
    let config = match backend {
        "local" => BackendConfig::Local { path: root },
        "s3" => BackendConfig::S3 {
            bucket: root,
            region: args.region,
            endpoint: args.endpoint,
            access_key: args.access_key,
            secret_key: args.secret_key,
            path_style: args.path_style,
        },
        other => anyhow::bail!("unknown backend: {other} (supported: local, s3)"),
    };
    Ok(config)
}

pub fn run(backend: Option<&str>, root: Option<&str>, args: InitArgs) -> Result<()> {
    let config = AppConfig {
        storage: backend_config(backend, root, args)?,
    };
    // Fail early on settings the factory would reject.
    config.open_storage()?;
    config.save()?;

    info!(
        config_path = %AppConfig::config_path().display(),
        backend = config.storage.tag(),
        "Config saved."
    );
    println!("Config: {}", AppConfig::config_path().display());
    Ok(())
}
