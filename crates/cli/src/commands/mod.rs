pub mod exists;
pub mod init;
pub mod ls;
pub mod mkdir;
pub mod read;
pub mod rm;
pub mod write;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Save the default storage backend to the config file
    Init(init::InitArgs),
    /// Create a directory (no-op on object stores)
    Mkdir(mkdir::MkdirArgs),
    /// Write content to a key
    Write(write::WriteArgs),
    /// Print the content stored at a key
    Read(read::ReadArgs),
    /// List the entries under a directory or prefix
    Ls(ls::LsArgs),
    /// Delete a key
    Rm(rm::RmArgs),
    /// Check whether a key exists
    Exists(exists::ExistsArgs),
}
