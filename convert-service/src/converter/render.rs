//! Renders parsed RTF style blocks into the HTML document tree.

use rtf_parser::document::RtfDocument;
use rtf_parser::paragraph::Alignment;
use rtf_parser::parser::{Painter, StyleBlock};

use super::html::{HtmlDocument, HtmlElement, HtmlNode};
use super::options::{ConversionOptions, FontSizeUnit};

/// A contiguous stretch of identically painted text within one paragraph.
struct Run {
    painter: Painter,
    text: String,
}

struct ParagraphBuild {
    alignment: Alignment,
    runs: Vec<Run>,
}

pub(super) fn render_document(document: &RtfDocument, options: &ConversionOptions) -> HtmlDocument {
    let mut out = HtmlDocument::new(options.add_outer_html);

    if let Some(language) = &options.default_language {
        if !language.is_empty() {
            out.set_language(language);
        }
    }

    build_head(&mut out, options);

    for paragraph in split_paragraphs(&document.body) {
        if let Some(element) = render_paragraph(&paragraph, options) {
            out.body_mut().push(HtmlNode::Element(element));
        }
    }

    out
}

fn build_head(out: &mut HtmlDocument, options: &ConversionOptions) {
    let head = out.head_mut();

    head.push(HtmlNode::Element(
        HtmlElement::new("meta").with_attribute("charset", "utf-8"),
    ));

    if let Some(author) = &options.meta_author {
        head.push(HtmlNode::Element(
            HtmlElement::new("meta")
                .with_attribute("name", "author")
                .with_attribute("content", author),
        ));
    }

    if let Some(description) = &options.meta_description {
        head.push(HtmlNode::Element(
            HtmlElement::new("meta")
                .with_attribute("name", "description")
                .with_attribute("content", description),
        ));
    }

    let mut css = String::new();
    if options.include_default_font_style {
        css.push_str("body {\n  font-family: serif;\n  font-size: 12pt;\n}\n");
    }
    if let Some(style_sheet) = &options.style_sheet {
        css.push_str(style_sheet);
    }
    if !css.is_empty() {
        let mut style = HtmlElement::new("style");
        style.push(HtmlNode::Raw(format!("\n{}", css)));
        head.push(HtmlNode::Element(style));
    }
}

/// Regroup the flat run list into paragraphs. A newline inside a block's
/// text closes the current paragraph; the remainder starts the next one.
fn split_paragraphs(blocks: &[StyleBlock]) -> Vec<ParagraphBuild> {
    let mut paragraphs = Vec::new();
    let mut current = ParagraphBuild {
        alignment: Alignment::LeftAligned,
        runs: Vec::new(),
    };

    for block in blocks {
        current.alignment = block.paragraph.alignment.clone();
        let mut rest = block.text.as_str();
        while let Some(newline) = rest.find('\n') {
            let (line, tail) = rest.split_at(newline);
            if !line.is_empty() {
                current.runs.push(Run {
                    painter: block.painter.clone(),
                    text: line.to_string(),
                });
            }
            paragraphs.push(std::mem::replace(
                &mut current,
                ParagraphBuild {
                    alignment: block.paragraph.alignment.clone(),
                    runs: Vec::new(),
                },
            ));
            rest = &tail[1..];
        }
        if !rest.is_empty() {
            current.runs.push(Run {
                painter: block.painter.clone(),
                text: rest.to_string(),
            });
        }
    }

    if !current.runs.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn render_paragraph(paragraph: &ParagraphBuild, options: &ConversionOptions) -> Option<HtmlElement> {
    let mut style = String::new();
    match paragraph.alignment {
        Alignment::Center => style.push_str("text-align:center;"),
        Alignment::RightAligned => style.push_str("text-align:right;"),
        Alignment::Justify => style.push_str("text-align:justify;"),
        Alignment::LeftAligned => {}
    }

    let mut element = HtmlElement::new("p");
    let mut children: Vec<HtmlNode> = Vec::new();

    for (index, run) in paragraph.runs.iter().enumerate() {
        let mut text = run.text.as_str();
        if index == 0 && options.convert_indent {
            // Leading tabs become a first-line indent.
            let stripped = text.trim_start_matches('\t');
            let tabs = text.len() - stripped.len();
            if tabs > 0 {
                style.push_str(&format!("text-indent:{}em;", 2 * tabs));
                text = stripped;
            }
        }
        children.extend(render_run(text, &run.painter, options));
    }

    if children.is_empty() {
        if !options.convert_empty_paragraphs {
            return None;
        }
    } else {
        for child in children {
            element.push(child);
        }
    }

    if !style.is_empty() {
        element = element.with_attribute("style", &style);
    }
    Some(element)
}

fn render_run(text: &str, painter: &Painter, options: &ConversionOptions) -> Vec<HtmlNode> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut nodes = if options.convert_hyperlinks {
        link_urls(text)
    } else {
        vec![HtmlNode::Text(text.to_string())]
    };

    if painter.smallcaps {
        nodes = wrap_with_style("span", "font-variant:small-caps;", nodes);
    }
    if painter.subscript {
        nodes = wrap("sub", nodes);
    }
    if painter.superscript {
        nodes = wrap("sup", nodes);
    }
    if painter.strike {
        nodes = wrap("s", nodes);
    }
    if painter.underline {
        nodes = wrap("u", nodes);
    }
    if painter.italic {
        nodes = wrap("i", nodes);
    }
    if painter.bold {
        nodes = wrap("b", nodes);
    }
    if painter.font_size > 0 {
        nodes = wrap_with_style("span", &font_size_style(painter.font_size, options), nodes);
    }

    nodes
}

fn wrap(tag: &str, children: Vec<HtmlNode>) -> Vec<HtmlNode> {
    let mut element = HtmlElement::new(tag);
    for child in children {
        element.push(child);
    }
    vec![HtmlNode::Element(element)]
}

fn wrap_with_style(tag: &str, style: &str, children: Vec<HtmlNode>) -> Vec<HtmlNode> {
    let mut element = HtmlElement::new(tag).with_attribute("style", style);
    for child in children {
        element.push(child);
    }
    vec![HtmlNode::Element(element)]
}

/// RTF stores font sizes in half-points.
fn font_size_style(half_points: u16, options: &ConversionOptions) -> String {
    let points = f32::from(half_points) / 2.0;
    match options.font_size_unit {
        FontSizeUnit::Point => {
            if points == points.trunc() {
                format!("font-size:{}pt;", points as u16)
            } else {
                format!("font-size:{}pt;", points)
            }
        }
        FontSizeUnit::Em => format!("font-size:{}em;", points / 12.0),
    }
}

/// Split plain text into text and anchor nodes, turning bare http(s) URLs
/// into links.
fn link_urls(text: &str) -> Vec<HtmlNode> {
    let mut nodes = Vec::new();
    let mut rest = text;

    while let Some(start) = find_url_start(rest) {
        let (before, from) = rest.split_at(start);
        if !before.is_empty() {
            nodes.push(HtmlNode::Text(before.to_string()));
        }

        let end = from
            .find(|c: char| c.is_whitespace())
            .unwrap_or(from.len());
        let (candidate, tail) = from.split_at(end);
        let url = candidate.trim_end_matches(['.', ',', ';', ':', ')', '\'', '"']);

        if url.len() > "https://".len() {
            nodes.push(HtmlNode::Element(
                HtmlElement::new("a")
                    .with_attribute("href", url)
                    .with_text(url),
            ));
            if url.len() < candidate.len() {
                nodes.push(HtmlNode::Text(candidate[url.len()..].to_string()));
            }
        } else {
            // A bare scheme with nothing behind it is not a link.
            nodes.push(HtmlNode::Text(candidate.to_string()));
        }
        rest = tail;
    }

    if !rest.is_empty() {
        nodes.push(HtmlNode::Text(rest.to_string()));
    }
    nodes
}

fn find_url_start(text: &str) -> Option<usize> {
    let mut best: Option<usize> = None;
    for prefix in ["https://", "http://"] {
        let mut offset = 0;
        while let Some(found) = text[offset..].find(prefix) {
            let position = offset + found;
            let at_boundary = position == 0
                || text[..position]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_whitespace() || c == '(');
            if at_boundary {
                best = Some(best.map_or(position, |b| b.min(position)));
                break;
            }
            offset = position + prefix.len();
        }
    }
    best
}
