//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tutor",
    version,
    about = "Classify answers and play lessons with the tutor engine",
    long_about = "Validate lesson content, classify a single answer against a state, \
                  or play a lesson through with a scripted list of answers.\n\n\
                  Content files are YAML (.yaml, .yml) or JSON (.json)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity (-v for debug, -vv for trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered interactions and their rules.
    Info,

    /// Validate that a lesson loads and every rule resolves.
    Check {
        /// Lesson content file.
        #[arg(value_name = "CONTENT")]
        content: PathBuf,
    },

    /// Classify one answer against one state's interaction.
    Classify(ClassifyArgs),

    /// Play a lesson from its initial state with scripted answers.
    Play {
        /// Lesson content file.
        #[arg(value_name = "CONTENT")]
        content: PathBuf,

        /// File holding a list of answers, in the content file syntax.
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
    },
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Lesson content file.
    #[arg(value_name = "CONTENT")]
    pub content: PathBuf,

    /// Name of the state whose interaction grades the answer.
    #[arg(long, value_name = "STATE")]
    pub state: String,

    /// The answer as JSON, e.g. '{"real": 2.5}'.
    #[arg(long, value_name = "JSON")]
    pub answer: String,

    /// Print every rule evaluated.
    #[arg(long)]
    pub trace: bool,
}
