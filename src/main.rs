// =============================================================================
// SPV2H - Embed a compiled SPIR-V blob in a C header
// =============================================================================
//
// Build-time helper: turns `shader.spv` into `shader.h` declaring the blob as
// a static array plus a size constant, so native code can compile the shader
// straight into the binary.
//
// FLOW:
// 1. Parse arguments (clap exits with status 2 on bad usage)
// 2. Load spv2h.toml (emission policy + log level)
// 3. Read input, pad to a 4-byte boundary
// 4. Derive guard / array / size identifiers
// 5. Render header text in memory
// 6. Write via temp file + rename
//
// =============================================================================

mod config;
mod error;
mod header;

use clap::Parser;
use config::Config;
use error::EmitError;
use header::HeaderJob;
use std::path::PathBuf;
use std::process::ExitCode;

// =============================================================================
// COMMAND LINE
// =============================================================================

/// Embed a SPIR-V (or any binary) blob in a C header as a static array
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Compiled shader blob to embed
    input: PathBuf,
    /// Header to write; parent directories are created as needed
    output: PathBuf,
    /// Array symbol; derived from the output file name when omitted
    prefix: Option<String>,
    /// Configuration file (default: ./spv2h.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::from(&error)
        }
    }
}

fn run(cli: Cli) -> Result<(), EmitError> {
    let Cli {
        input,
        output,
        prefix,
        config,
    } = cli;

    let config = Config::load(config.as_deref()).map_err(|error| EmitError::Config { error })?;
    init_logging(&config);
    log::debug!("Config: {:?}", config);

    let job = HeaderJob {
        input,
        output,
        prefix,
    };
    header::emit(&job, &config.emit)?;
    Ok(())
}

/// Initialize logging; `RUST_LOG` overrides the configured level
fn init_logging(config: &Config) {
    use env_logger::Builder;
    use log::LevelFilter;

    // Validated during config load
    let level = config.log_level().unwrap_or(LevelFilter::Warn);

    let mut builder = Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.init();
}
