//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// AI Config Sync - project a single source of truth into per-tool configs
#[derive(Parser, Debug)]
#[command(name = "aisync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize tool configurations from the .ai/ tree
    ///
    /// Examples:
    ///   aisync sync              # Sync every registered target
    ///   aisync sync gemini       # Sync one target
    ///   aisync sync claude cursor
    Sync {
        /// Targets to sync ("all" or one or more target names)
        #[arg(default_value = "all")]
        targets: Vec<String>,

        /// Pre-create output directories without writing any file
        #[arg(long)]
        init_dirs: bool,
    },

    /// List the registered sync targets
    Targets,

    /// Render the declared output templates of a command
    ///
    /// Examples:
    ///   aisync render van
    ///   aisync render plan --type status --data context.json
    Render {
        /// Command whose outputs to generate
        command: String,

        /// Generate only one output type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// JSON file merged into the render context
        #[arg(short, long)]
        data: Option<String>,

        /// Tool identity exposed to templates as {{ ai_tool }}
        #[arg(long, env = "AI_TOOL", default_value = "claude")]
        tool: String,

        /// Create the declared output directories without rendering
        #[arg(long)]
        init: bool,
    },
}
