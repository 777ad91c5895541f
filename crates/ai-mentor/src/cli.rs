//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI Mentor - analyze, fix, and chat about code with a deterministic fallback
#[derive(Parser, Debug)]
#[command(name = "ai-mentor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Map the verbosity count to a tracing level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a source file and print the structured result
    Analyze {
        /// Path to the source file
        #[arg(required = true)]
        file: PathBuf,

        /// Language tag (inferred from the file extension if omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Print the result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Generate code from a description
    Generate {
        /// What the code should do
        #[arg(required = true)]
        description: String,

        /// Target language
        #[arg(short, long, default_value = "javascript")]
        language: String,
    },

    /// Ask a one-shot question, optionally scoped to a source file
    Ask {
        /// The question
        #[arg(required = true)]
        message: String,

        /// Source file to scope the question to
        #[arg(short, long)]
        code: Option<PathBuf>,

        /// Language tag (inferred from the file extension if omitted)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Fix a described issue in a source file
    Fix {
        /// Path to the source file
        #[arg(required = true)]
        file: PathBuf,

        /// Description of the issue to fix
        #[arg(required = true)]
        issue: String,

        /// Language tag (inferred from the file extension if omitted)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Enhance and optimize a source file
    Enhance {
        /// Path to the source file
        #[arg(required = true)]
        file: PathBuf,

        /// Language tag (inferred from the file extension if omitted)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check that the inference endpoint is reachable
    Health,
}

/// Infer a language tag from a file extension.
pub fn infer_language(path: &std::path::Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "js" | "jsx" | "mjs" => Some("javascript"),
        "ts" | "tsx" => Some("typescript"),
        "py" => Some("python"),
        "java" => Some("java"),
        "rs" => Some("rust"),
        "go" => Some("go"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "hpp" => Some("cpp"),
        _ => None,
    }
}
