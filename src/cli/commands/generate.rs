//! Generate Command
//!
//! The main flow: pass the access gate, collect the topic and style,
//! run one submission, render the song cards, optionally export a PDF.

use console::Term;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::ai::provider::create_provider;
use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::export::PdfExporter;
use crate::gate::AccessGate;
use crate::session::GeneratorSession;
use crate::types::{GenerationRequest, Result};

/// Options for the generate command
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// What the songs are about (prompted for when absent)
    pub topic: Option<String>,
    /// Rhythm/style target (prompted for when absent)
    pub style: Option<String>,
    /// Write a PDF of the result to this path
    pub pdf: Option<PathBuf>,
    /// Model override
    pub model: Option<String>,
    /// Gate passphrase (prompted for when the gate is closed and this is absent)
    pub passphrase: Option<String>,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let output = Output::new();
    let config = ConfigLoader::load()?;
    let term = Term::stdout();

    // Access gate first; nothing else happens until it opens.
    let gate = AccessGate::new(config.access.passphrase.clone());
    if !gate.is_open() {
        let input = match options.passphrase {
            Some(ref passphrase) => passphrase.clone(),
            None => prompt_secure(&term, "Passphrase")?,
        };
        gate.unlock(&input)?;
        debug!("Access gate unlocked");
    }

    let topic = match options.topic {
        Some(topic) => topic,
        None => prompt_required(&term, &output, "What are the songs about?")?,
    };
    let style = match options.style {
        Some(style) => style,
        None => prompt_required(&term, &output, "Rhythm / style target?")?,
    };

    let request = GenerationRequest::new(topic, style);
    request.validate()?;

    let mut provider_config = config.provider_config();
    if options.model.is_some() {
        provider_config.model = options.model;
    }
    let provider = create_provider(&provider_config)?;

    let mut session = GeneratorSession::new(provider, config.llm.temperature);

    output.info("Generating 10 songs... this can take a minute.");
    let runtime = Runtime::new()?;
    let songs = runtime.block_on(session.submit(&request))?;

    output.song_set(&songs);

    if let Some(path) = options.pdf {
        PdfExporter::new().export(&request, &songs, &path)?;
        output.success(&format!("PDF written to {}", path.display()));
    }

    Ok(())
}

fn prompt_secure(term: &Term, label: &str) -> Result<String> {
    term.write_str(&format!("{}: ", label))?;
    Ok(term.read_secure_line()?)
}

/// Ask until the answer is non-blank; a blank submit is inert, not an error.
fn prompt_required(term: &Term, output: &Output, label: &str) -> Result<String> {
    loop {
        term.write_str(&format!("{} ", label))?;
        let answer = term.read_line()?;
        if !answer.trim().is_empty() {
            return Ok(answer);
        }
        output.warning("A value is required.");
    }
}
