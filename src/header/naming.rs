// Identifier derivation: include guard, array symbol, size symbol

use crate::error::EmitError;
use std::path::Path;

/// Identifiers used in one emitted header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    pub guard: String,
    pub array: String,
    pub size: String,
}

impl Symbols {
    /// Derive all identifiers for a header written to `output`.
    ///
    /// A caller-supplied `prefix` becomes the array symbol verbatim and must
    /// already be a valid C identifier.
    pub fn derive(
        output: &Path,
        prefix: Option<&str>,
        array_suffix: &str,
        size_suffix: &str,
    ) -> Result<Self, EmitError> {
        let array = match prefix {
            Some(prefix) => {
                if !is_c_identifier(prefix) {
                    return Err(EmitError::Usage {
                        message: format!("symbol prefix {:?} is not a valid C identifier", prefix),
                    });
                }
                prefix.to_string()
            }
            None => default_array_symbol(output, array_suffix)?,
        };

        Ok(Self {
            guard: header_guard(output)?,
            size: format!("{}{}", array, size_suffix),
            array,
        })
    }
}

/// `bc4-shader.h` -> `BC4_SHADER_H_`
///
/// Names that differ only in punctuation (`a-b.h`, `a.b.h`) share a guard.
pub fn header_guard(output: &Path) -> Result<String, EmitError> {
    let name = file_name(output)?;
    let mut guard = sanitize(name);
    guard.make_ascii_uppercase();
    guard.push('_');
    Ok(guard)
}

/// `shaders/bc4.h` -> `bc4_spv`; `bc4_spv.h` stays `bc4_spv`
pub fn default_array_symbol(output: &Path, array_suffix: &str) -> Result<String, EmitError> {
    // Validates that there is a file name at all
    file_name(output)?;
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    let mut symbol = sanitize(&stem);
    if !symbol.ends_with(array_suffix) {
        symbol.push_str(array_suffix);
    }
    Ok(symbol)
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Map every byte outside `[A-Za-z0-9]` to `_`, and keep the result from starting with a digit
fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn file_name(output: &Path) -> Result<&str, EmitError> {
    output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| EmitError::Usage {
            message: format!(
                "output path {} has no UTF-8 file name",
                output.display()
            ),
        })
}
