use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Stagehand - deploy serverless component instances
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to use colored output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the project and redeploy on every change, with live log streaming
    Dev {
        /// Project directory containing serverless.yml
        #[arg(short = 'C', long, default_value = ".")]
        dir: PathBuf,

        /// Widen the activity filter (`app` = every instance in the application)
        #[arg(long, value_enum)]
        filter: Option<FilterWhen>,
    },

    /// Deploy once with remote debugging disabled
    ///
    /// Also removes a dev-mode agent left behind by a cancelled `stagehand dev`.
    Deploy {
        /// Project directory containing serverless.yml
        #[arg(short = 'C', long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterWhen {
    App,
}
