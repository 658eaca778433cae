//! Converter configuration.
//!
//! One fixed set of flags is compiled in as the default; the handler only
//! fills in the per-request metadata (the description naming the uploaded
//! file). Flags whose constructs the parsing backend does not currently
//! surface (pictures, tables, footnotes, bookmarks, paragraph borders) stay
//! part of the contract so the call shape matches the documented converter
//! configuration.

/// Stylesheet embedded in the document head when `style_sheet` is left at
/// its default.
pub const DEFAULT_STYLE_SHEET: &str = "\
body,p {
  margin: 0;
}
td {
  vertical-align: top;
  border: 1px solid #D3D3D3;
}
table {
  border-collapse: collapse;
}
";

/// Unit used for font sizes emitted in inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeUnit {
    Point,
    /// Relative to a 12pt base font.
    Em,
}

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Wrap the output in a full document (doctype, html, head, body)
    /// instead of returning a body fragment.
    pub add_outer_html: bool,
    /// Value for the `lang` attribute of the html element, if any.
    pub default_language: Option<String>,
    pub meta_author: Option<String>,
    pub meta_description: Option<String>,
    /// CSS embedded as a `<style>` element in the head.
    pub style_sheet: Option<String>,
    /// Emit a base font rule for the body.
    pub include_default_font_style: bool,
    pub font_size_unit: FontSizeUnit,
    pub convert_indent: bool,
    /// Accepted for contract parity; the parsing backend does not surface
    /// paragraph borders, so this flag is currently inert.
    pub convert_paragraph_borders: bool,
    /// Accepted for contract parity; the parsing backend does not surface
    /// bookmarks, so this flag is currently inert.
    pub convert_bookmarks: bool,
    pub convert_empty_paragraphs: bool,
    /// Accepted for contract parity; the parsing backend does not surface
    /// footnotes, so this flag is currently inert.
    pub convert_footnotes: bool,
    pub convert_hyperlinks: bool,
    /// Accepted for contract parity; the parsing backend does not surface
    /// embedded pictures, so this flag is currently inert.
    pub convert_pictures: bool,
    /// Accepted for contract parity; the parsing backend does not surface
    /// tables, so this flag is currently inert.
    pub convert_tables: bool,
    /// Pictures at or below this many KB are inlined as data URIs. Inert
    /// until the parsing backend surfaces embedded pictures.
    pub inline_picture_limit_kb: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            add_outer_html: true,
            default_language: None,
            meta_author: Some(concat!("convert-service ", env!("CARGO_PKG_VERSION")).to_string()),
            meta_description: None,
            style_sheet: Some(DEFAULT_STYLE_SHEET.to_string()),
            include_default_font_style: true,
            font_size_unit: FontSizeUnit::Point,
            convert_indent: true,
            convert_paragraph_borders: true,
            convert_bookmarks: true,
            convert_empty_paragraphs: true,
            convert_footnotes: true,
            convert_hyperlinks: true,
            convert_pictures: true,
            convert_tables: true,
            inline_picture_limit_kb: 256,
        }
    }
}
