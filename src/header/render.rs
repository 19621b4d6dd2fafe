// Header text rendering
//
// Output must be byte-for-byte stable for a fixed blob, symbol set and
// policy: build systems cache on the content hash. No timestamps, no
// absolute paths, `\n` line endings everywhere.

use super::blob::SourceBlob;
use super::naming::Symbols;
use crate::config::{Encoding, Linkage};
use std::fmt;

/// Literal elements per line in word mode
pub const WORDS_PER_LINE: usize = 8;
/// Literal elements per line in byte mode
pub const BYTES_PER_LINE: usize = 16;

const INDENT: &str = "    ";

/// Emission policy applied to one header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub encoding: Encoding,
    pub linkage: Linkage,
}

/// A fully described header, rendered through [`fmt::Display`]
pub struct HeaderText<'a> {
    pub blob: &'a SourceBlob,
    pub symbols: &'a Symbols,
    pub options: RenderOptions,
}

impl<'a> HeaderText<'a> {
    pub fn new(blob: &'a SourceBlob, symbols: &'a Symbols, options: RenderOptions) -> Self {
        Self {
            blob,
            symbols,
            options,
        }
    }

    fn element_type(&self) -> &'static str {
        match self.options.encoding {
            Encoding::Words => "uint32_t",
            Encoding::Bytes => "uint8_t",
        }
    }

    /// One string per emitted literal element
    fn literals(&self) -> Vec<String> {
        let literals: Vec<String> = match self.options.encoding {
            Encoding::Words => self.blob.words().map(|w| format!("0x{:08x}u", w)).collect(),
            Encoding::Bytes => self.blob.bytes().iter().map(|b| format!("0x{:02x}u", b)).collect(),
        };
        if literals.is_empty() {
            // C forbids an empty initializer list; size constant still reports 0
            return vec![match self.options.encoding {
                Encoding::Words => "0x00000000u".to_string(),
                Encoding::Bytes => "0x00u".to_string(),
            }];
        }
        literals
    }

    fn per_line(&self) -> usize {
        match self.options.encoding {
            Encoding::Words => WORDS_PER_LINE,
            Encoding::Bytes => BYTES_PER_LINE,
        }
    }

    fn write_array(&self, f: &mut fmt::Formatter<'_>, qualifier: &str) -> fmt::Result {
        let Symbols { array, size, .. } = self.symbols;

        writeln!(f, "{}const {} {}[] = {{", qualifier, self.element_type(), array)?;
        let literals = self.literals();
        let mut lines = literals.chunks(self.per_line()).peekable();
        while let Some(line) = lines.next() {
            let separator = if lines.peek().is_some() { "," } else { "" };
            writeln!(f, "{}{}{}", INDENT, line.join(", "), separator)?;
        }
        writeln!(f, "}};")?;
        writeln!(f)?;

        if self.blob.is_empty() {
            writeln!(f, "{}const size_t {} = 0;", qualifier, size)?;
        } else {
            writeln!(f, "{}const size_t {} = sizeof({});", qualifier, size, array)?;
        }
        Ok(())
    }
}

impl fmt::Display for HeaderText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Symbols { guard, array, size } = self.symbols;
        let source = self
            .blob
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().replace("*/", "* /"))
            .unwrap_or_default();

        writeln!(f, "/* Generated by spv2h from {}. Do not edit by hand. */", source)?;
        writeln!(f)?;
        writeln!(f, "#ifndef {}", guard)?;
        writeln!(f, "#define {}", guard)?;
        writeln!(f)?;
        writeln!(f, "#include <stddef.h>")?;
        writeln!(f, "#include <stdint.h>")?;
        writeln!(f)?;
        writeln!(f, "#ifdef __cplusplus")?;
        writeln!(f, "extern \"C\" {{")?;
        writeln!(f, "#endif")?;
        writeln!(f)?;

        match self.options.linkage {
            Linkage::Static => self.write_array(f, "static ")?,
            Linkage::Extern => {
                // Prior extern declarations give the const definitions external linkage in C++ too
                writeln!(f, "extern const {} {}[];", self.element_type(), array)?;
                writeln!(f, "extern const size_t {};", size)?;
                writeln!(f)?;
                self.write_array(f, "")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "#ifdef __cplusplus")?;
        writeln!(f, "}}")?;
        writeln!(f, "#endif")?;
        writeln!(f)?;
        writeln!(f, "#endif /* {} */", guard)
    }
}
