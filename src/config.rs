// =============================================================================
// CONFIGURATION - Load emission policy from spv2h.toml
// =============================================================================
//
// This module handles loading and parsing configuration from spv2h.toml.
// Every key has a default, so a missing file means the stock policy:
// word encoding, static linkage, `_spv` / `_size` suffixes, empty input rejected.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "spv2h.toml";

/// Root configuration structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub emit: EmitConfig,
    pub logging: LoggingConfig,
}

/// How the array literal is laid out
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Little-endian `uint32_t` words, 8 per line
    #[default]
    Words,
    /// `uint8_t` bytes, 16 per line
    Bytes,
}

/// Linkage of the emitted array and size constant
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// `static const`, safe to include from any number of translation units
    #[default]
    Static,
    /// External definitions; exactly one translation unit may include the header
    Extern,
}

/// Header emission settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    pub encoding: Encoding,
    pub linkage: Linkage,
    /// Appended to the output file stem when no symbol prefix is given
    pub array_suffix: String,
    /// Appended to the array symbol to name the size constant
    pub size_suffix: String,
    /// Emit a degenerate header for zero-length input instead of failing
    pub allow_empty: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Words,
            linkage: Linkage::Static,
            array_suffix: "_spv".to_string(),
            size_suffix: "_size".to_string(),
            allow_empty: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Base level; `RUST_LOG` still takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration for this invocation.
    ///
    /// An explicit path must exist. Without one, `spv2h.toml` in the working
    /// directory is used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_path(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, suffix) in [
            ("emit.array_suffix", &self.emit.array_suffix),
            ("emit.size_suffix", &self.emit.size_suffix),
        ] {
            if !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                anyhow::bail!("{} must contain only [A-Za-z0-9_], got {:?}", key, suffix);
            }
        }
        if self.emit.size_suffix.is_empty() {
            anyhow::bail!("emit.size_suffix must not be empty");
        }
        self.log_level()?;
        Ok(())
    }

    /// Get the configured base log level
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", self.logging.level))
    }
}
