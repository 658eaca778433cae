//! RTF to HTML conversion.
//!
//! Lexing and parsing of the RTF control-word grammar are delegated to the
//! `rtf-parser` crate; this module renders the parsed document into an
//! in-memory HTML tree and serializes it.

pub mod html;
pub mod options;
mod render;

pub use html::{HtmlDocument, HtmlElement, HtmlNode};
pub use options::{ConversionOptions, FontSizeUnit, DEFAULT_STYLE_SHEET};

use rtf_parser::lexer::Lexer;
use rtf_parser::parser::Parser;
use service_core::error::AppError;

pub trait Converter: Send + Sync {
    /// Convert raw RTF bytes into an in-memory HTML document.
    ///
    /// The returned document stays mutable until serialized, so callers can
    /// run post-processing steps (such as [`append_file_footer`]) before
    /// rendering the final text.
    fn convert(&self, rtf: &[u8], options: &ConversionOptions) -> Result<HtmlDocument, AppError>;
}

/// Converter backed by the `rtf-parser` crate.
pub struct RtfConverter;

impl RtfConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RtfConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for RtfConverter {
    fn convert(&self, rtf: &[u8], options: &ConversionOptions) -> Result<HtmlDocument, AppError> {
        // Top-level RTF is 7-bit ASCII; bytes outside that range should have
        // been escaped by the producer, so lossy decoding is safe here.
        let source = String::from_utf8_lossy(rtf);

        let tokens = Lexer::scan(&source)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("RTF lexing failed: {}", e)))?;
        let parsed = Parser::new(tokens)
            .parse()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("RTF parsing failed: {}", e)))?;

        Ok(render::render_document(&parsed, options))
    }
}

/// Append a footer element naming the converted file and its size to the
/// document body. Runs after conversion and before serialization.
pub fn append_file_footer(document: &mut HtmlDocument, filename: &str, size_bytes: usize) {
    let footer = HtmlElement::new("footer").with_text(&format!(
        "Converted from: {} (size: {} KB)",
        filename,
        size_bytes / 1024
    ));
    document.body_mut().push(HtmlNode::Element(footer));
}
