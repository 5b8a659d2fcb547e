//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::RangedU64ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser, Debug)]
#[command(
    name = "pdf-summarizer",
    version,
    about = "Extract text from PDFs and pick their most representative sentences",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Settings file to use instead of the discovered .pdf-summarizer/settings.toml
    #[arg(short, long, global = true, env = "PDFSUM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Extract and summarize a local PDF, printing the JSON the service would return
    Summarize {
        /// Path to the PDF document
        file: PathBuf,

        /// Number of sentences to pick (overrides semantic_search.top_k)
        #[arg(short = 'k', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        top_k: Option<usize>,
    },

    /// Create .pdf-summarizer/settings.toml with default values
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Config,
}
