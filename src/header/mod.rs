// Header module - blob to C header emission
//
// Flow: read blob -> pad -> derive symbols -> render text -> atomic write.
// Everything before the write is pure, so a failing run never touches the
// output directory.

pub mod blob;
pub mod naming;
pub mod output;
pub mod render;

pub use blob::SourceBlob;
pub use naming::Symbols;
pub use render::{HeaderText, RenderOptions};

use crate::config::EmitConfig;
use crate::error::EmitError;
use std::path::PathBuf;

/// One invocation's worth of work
#[derive(Debug, Clone)]
pub struct HeaderJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub prefix: Option<String>,
}

/// What was written, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSummary {
    pub symbols: Symbols,
    pub input_len: usize,
    /// Value of the emitted size constant
    pub emitted_len: usize,
}

/// Build the header text for `job` without touching the output path
pub fn render_job(job: &HeaderJob, config: &EmitConfig) -> Result<(String, EmitSummary), EmitError> {
    let blob = SourceBlob::read(&job.input, config.allow_empty)?;
    if blob.padding() > 0 {
        log::warn!(
            "{:?} is {} bytes, not a multiple of 4; padding with {} zero byte(s)",
            blob.path(),
            blob.original_len(),
            blob.padding()
        );
    }

    let symbols = Symbols::derive(
        &job.output,
        job.prefix.as_deref(),
        &config.array_suffix,
        &config.size_suffix,
    )?;
    log::debug!("Symbols for {:?}: {:?}", job.output, symbols);

    let options = RenderOptions {
        encoding: config.encoding,
        linkage: config.linkage,
    };
    let text = HeaderText::new(&blob, &symbols, options).to_string();

    let summary = EmitSummary {
        input_len: blob.original_len(),
        emitted_len: blob.bytes().len(),
        symbols,
    };
    Ok((text, summary))
}

/// Render and write the header for `job`
pub fn emit(job: &HeaderJob, config: &EmitConfig) -> Result<EmitSummary, EmitError> {
    let (text, summary) = render_job(job, config)?;
    output::write_atomically(&job.output, text.as_bytes())?;

    log::info!(
        "Embedded {:?} ({} bytes) as {} ({} bytes) in {:?}",
        job.input,
        summary.input_len,
        summary.symbols.array,
        summary.emitted_len,
        job.output
    );
    Ok(summary)
}
