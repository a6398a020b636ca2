//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Composite trees, double-dispatch evaluators and directional cursors
#[derive(Parser, Debug)]
#[command(name = "treekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Directory holding .treekit.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through composite, evaluator and iterator
    Demo,

    /// Inspect a tree expression, e.g. "Branch(Leaf+Leaf)"
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },

    /// Walk a collection with a directional cursor
    Iter {
        /// Items in insertion order (default: from config)
        items: Vec<String>,
        /// Iterate from the last item to the first
        #[arg(short, long)]
        reverse: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    /// Print the composed label
    Op {
        /// Tree expression (default: from config)
        expr: Option<String>,
    },

    /// Show the tree indented
    Show {
        /// Tree expression (default: from config)
        expr: Option<String>,
    },

    /// Show depth and node counts
    Stats {
        /// Tree expression (default: from config)
        expr: Option<String>,
    },

    /// Run a labeling evaluator over every node, pre-order
    Visit {
        /// Tree expression (default: from config)
        expr: Option<String>,
        /// Evaluator label
        #[arg(short, long, default_value = "KindLabeler")]
        label: String,
    },

    /// List leaf names, left to right
    Leaves {
        /// Tree expression (default: from config)
        expr: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config template
    Template,
    /// Show config file locations
    Path,
}
