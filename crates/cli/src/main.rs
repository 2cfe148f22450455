mod commands;
mod config;
mod progress;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "storekit",
    version,
    about = "File-like access to local and S3-compatible storage"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Backend type: local or s3 (overrides the config file)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Directory (local) or bucket name (s3)
    #[arg(long, global = true)]
    root: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let open = || config::open_storage(cli.backend.as_deref(), cli.root.as_deref());
    match cli.command {
        commands::Command::Init(args) => {
            commands::init::run(cli.backend.as_deref(), cli.root.as_deref(), args)?
        }
        commands::Command::Mkdir(args) => commands::mkdir::run(open()?, args).await?,
        commands::Command::Write(args) => commands::write::run(open()?, args).await?,
        commands::Command::Read(args) => commands::read::run(open()?, args).await?,
        commands::Command::Ls(args) => commands::ls::run(open()?, args).await?,
        commands::Command::Rm(args) => commands::rm::run(open()?, args).await?,
        commands::Command::Exists(args) => {
            if !commands::exists::run(open()?, args).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
