//! Command-line arguments

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args, Parser, Subcommand};
use domain::{AnalysisMode, DocumentSource};

/// Clausewise CLI
#[derive(Debug, Parser)]
#[command(name = "clausewise")]
#[command(author, version, about = "Risk analysis for Terms of Service and other legal documents", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./clausewise.toml when present)
    #[arg(short, long, global = true, env = "CLAUSEWISE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a document and print the risk report
    ///
    /// Reads the document from --text, --file, --url or standard input.
    /// Example: clausewise analyze --url https://example.com/terms --mode deep
    Analyze(AnalyzeArgs),

    /// Print the request configuration used for a mode
    Schema {
        /// Analysis mode
        #[arg(short, long, default_value = "deep")]
        mode: AnalysisMode,
    },

    /// Print the effective configuration with secrets redacted
    Config,
}

/// Arguments of the `analyze` command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").args(["text", "file", "url"]).multiple(false)))]
pub struct AnalyzeArgs {
    /// Document text
    #[arg(long)]
    pub text: Option<String>,

    /// Read the document from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Fetch the document from a web page
    #[arg(short, long)]
    pub url: Option<String>,

    /// Analysis mode: quick or deep
    #[arg(short, long, default_value = "deep")]
    pub mode: AnalysisMode,

    /// Print the raw JSON result instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Narrate the summary into a WAV file
    #[arg(long, value_name = "PATH")]
    pub wav_out: Option<PathBuf>,

    /// Retry transient network failures up to N times
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,
}

impl AnalyzeArgs {
    /// Resolve the document source, falling back to `stdin`
    pub fn document_source(&self, stdin: &mut dyn Read) -> Result<DocumentSource> {
        if let Some(text) = &self.text {
            return Ok(DocumentSource::text(text.clone()));
        }

        if let Some(url) = &self.url {
            return Ok(DocumentSource::url(url.clone()));
        }

        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("Failed to read document from stdin")?;
                text
            },
        };

        if text.trim().is_empty() {
            bail!("No document text provided");
        }

        Ok(DocumentSource::text(text))
    }
}
