//! Command-line interface for untangle.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use untangle::config::Config;

#[derive(Parser)]
#[command(name = "untangle")]
#[command(about = "Best-effort JavaScript deobfuscator", long_about = None)]
pub struct Cli {
    /// Log rule activity (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deobfuscate JavaScript files
    Run(RunArgs),
    /// List the available rules
    Rules {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input JavaScript files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file, or directory for `<stem>.out.js` files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only run these rules (`name` or `prefix/*`)
    #[arg(long, env = "UNTANGLE_INCLUDE", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Never run these rules
    #[arg(long, env = "UNTANGLE_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Also run these default-disabled rules
    #[arg(long, value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Run these rules first, in this order
    #[arg(long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// Maximum number of passes
    #[arg(long, env = "UNTANGLE_MAX_PASSES")]
    pub max_passes: Option<usize>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the program after every rule with edits into this directory
    #[arg(long, env = "UNTANGLE_SNAPSHOT_DIR")]
    pub snapshot_dir: Option<PathBuf>,

    /// Print the rule trace as JSON on stderr
    #[arg(long)]
    pub trace: bool,
}

impl RunArgs {
    /// Layer the flags over `config`; only flags that were given replace
    /// file values.
    pub fn apply_to(&self, config: &mut Config) {
        let selection = &mut config.selection;
        if !self.include.is_empty() {
            selection.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            selection.exclude = self.exclude.clone();
        }
        if !self.enable.is_empty() {
            selection.enable = self.enable.clone();
        }
        if !self.order.is_empty() {
            selection.order = Some(self.order.clone());
        }
        if let Some(max_passes) = self.max_passes {
            selection.max_passes = max_passes;
        }
    }
}
