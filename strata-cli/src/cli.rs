//! CLI argument parsing definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Setting definitions file (YAML or JSON) listing the legal keys
    #[arg(long, value_name = "PATH", global = true)]
    pub definitions: Option<PathBuf>,

    /// Settings document with global and extruder scopes
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings given directly on the command line
#[derive(clap::Args, Debug, Default, Clone)]
pub struct SettingArgs {
    /// Global setting as key=value (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,

    /// Extruder setting as N:key=value (repeatable)
    #[arg(short = 'x', long = "extruder-setting", value_name = "N:KEY=VALUE")]
    pub extruder_pairs: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a setting and print its typed value
    Get {
        /// Setting key
        key: String,

        /// Type to convert the setting text to
        #[arg(long = "as", value_enum, default_value = "string")]
        kind: ValueKind,

        /// Query the scope of this extruder instead of the global scope
        #[arg(short, long, value_name = "N")]
        extruder: Option<usize>,

        /// Follow the setting's extruder limit, if it has one
        #[arg(long)]
        limited: bool,

        #[command(flatten)]
        inputs: SettingArgs,
    },

    /// Print the global settings as command-line arguments for a child process
    Args {
        #[command(flatten)]
        inputs: SettingArgs,
    },
}

/// Value types a setting can be printed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    Coord,
    Degrees,
    Radians,
    Ratio,
    Velocity,
    Duration,
    Temperature,
    Layer,
    DraftShield,
    FlowTemp,
    Matrix,
    Flavor,
    Extruder,
}
