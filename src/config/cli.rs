use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the Masthead binary.
#[derive(Debug, Parser)]
#[command(name = "masthead", version, about = "Masthead blog board server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "MASTHEAD_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the blog over HTTP.
    Serve(Box<ServeArgs>),
    /// Write an empty post dataset.
    Init(InitArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct StorageOverride {
    /// Override the path of the JSON post dataset.
    #[arg(long = "storage-path", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub storage_path: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub storage: StorageOverride,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the title shown in the page header.
    #[arg(long = "site-title", value_name = "TITLE")]
    pub site_title: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct InitArgs {
    #[command(flatten)]
    pub storage: StorageOverride,

    /// Replace an existing dataset with an empty one.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub force: bool,
}
