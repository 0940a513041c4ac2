#![forbid(unsafe_code)]
//! Mdroff converts Markdown man page sources into roff manpages.
//!
//! # Example
//!
//! ```no_run
//! let markdown = "# mytool 1 \"January 2026\" mytool\n\n## SYNOPSIS\n\nExample.";
//! let roff = mdroff::convert_markdown_to_roff(markdown)?;
//! # Ok::<(), mdroff::MdroffError>(())
//! ```

mod converter;
mod document;
mod glyphs;
mod parser;

pub use converter::Converter;
pub use document::{Document, Element, ElementKind, SmartQuote, TypographicSym};
pub use glyphs::{GLYPHS, escape};
pub use parser::parse_markdown;

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MdroffError {
    Markdown(String),
}

impl fmt::Display for MdroffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MdroffError::Markdown(msg) => write!(f, "markdown parse error: {msg}"),
        }
    }
}

impl Error for MdroffError {}

pub type Result<T> = std::result::Result<T, MdroffError>;

/// Parses `markdown` and converts it into roff man page source.
pub fn convert_markdown_to_roff(markdown: &str) -> Result<String> {
    let document = parse_markdown(markdown)?;
    Ok(Converter::new().convert(&document))
}
