use std::fs;
use std::path::Path;

use miette::{bail, IntoDiagnostic, Result, SourceSpan};

use crate::error;
use crate::runtime::MEMORY_MAX;

/// Program image: the bytes copied into memory from address 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Read `.ls8` text or a raw `.bin` image, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Program> {
        let Some(ext) = path.extension() else {
            bail!("File has no extension. Exiting...");
        };
        match ext.to_str() {
            Some("ls8") => {
                let src = fs::read_to_string(path).into_diagnostic()?;
                Program::parse(&src)
            }
            Some("bin") => Program::from_raw(fs::read(path).into_diagnostic()?),
            _ => bail!("File has unknown extension. Exiting..."),
        }
    }

    pub fn from_raw(bytes: Vec<u8>) -> Result<Program> {
        if bytes.len() > MEMORY_MAX {
            return Err(error::load_too_large(bytes.len()));
        }
        Ok(Program { bytes })
    }

    /// Parse `.ls8` source: one binary literal per line. Anything after `#`
    /// is a comment, and lines left empty are skipped.
    pub fn parse(src: &str) -> Result<Program> {
        let mut bytes = Vec::new();
        let mut offs = 0;
        for line in src.split_inclusive('\n') {
            let line_start = offs;
            offs += line.len();

            let code = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            };
            let literal = code.trim();
            if literal.is_empty() {
                continue;
            }
            let start = line_start + (code.len() - code.trim_start().len());
            bytes.push(parse_literal(literal, start, src)?);
        }
        Program::from_raw(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn parse_literal(literal: &str, start: usize, src: &str) -> Result<u8> {
    if let Some((i, ch)) = literal
        .char_indices()
        .find(|(_, ch)| !matches!(ch, '0' | '1'))
    {
        let span = span_at(start + i, ch.len_utf8());
        return Err(error::load_bad_digit(span, src));
    }
    let span = span_at(start, literal.len());
    if literal.len() > 8 {
        return Err(error::load_too_wide(span, src));
    }
    u8::from_str_radix(literal, 2).map_err(|_| error::load_too_wide(span, src))
}

fn span_at(start: usize, len: usize) -> SourceSpan {
    (start, len).into()
}
