use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "petfriends-negative")]
#[command(author, version, about = "Negative API test suite for the PetFriends service")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "PETFRIENDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, env = "PETFRIENDS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available scenarios
    List,

    /// Run scenarios against the configured service
    Run(RunArgs),

    /// Inspect or edit the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,

    /// Show the effective settings (password masked)
    Show,

    /// Store settings in the config file
    Set(ConfigSetArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ConfigSetArgs {
    /// Service base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Email of the account the suite treats as valid
    #[arg(long)]
    pub email: Option<String>,

    /// Password of that account
    #[arg(long)]
    pub password: Option<String>,

    /// Directory holding the scenario photos
    #[arg(long)]
    pub images_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Scenario names to run (all when omitted)
    pub scenarios: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Display as JSON
    Json,
}
