//! Command-line argument parsing
//!
//! Clap-based CLI with subcommands for asking questions and maintaining
//! the knowledge corpus.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// unibot - campus assistant over a curated knowledge corpus
#[derive(Parser, Debug)]
#[command(name = "unibot")]
#[command(version)]
#[command(about = "Ask questions about campus; get text answers or map cards", long_about = None)]
pub struct Args {
    /// Corpus snapshot path (overrides config)
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question and print the answer
    Ask {
        /// The question to ask
        question: String,

        /// Topic category: campus-navigation, admissions, courses, general
        #[arg(short, long, default_value = "general")]
        category: String,
    },

    /// Show ranked knowledge matches for a query
    Search {
        /// The query to rank against
        query: String,

        /// Maximum results to show
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Bulk-add documents from a JSON file (array of {content, metadata})
    Load {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Empty the corpus and delete the persisted snapshot
    Clear,

    /// Display current configuration
    Config,
}
