//! Mutable HTML document tree produced by the converter.
//!
//! The tree stays editable between conversion and serialization so callers
//! can run post-processing steps (such as appending a footer element)
//! before rendering the final text.

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "img", "link", "meta"];

#[derive(Debug, Clone)]
pub enum HtmlNode {
    Element(HtmlElement),
    /// Escaped on serialization.
    Text(String),
    /// Written verbatim; used for embedded CSS.
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct HtmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(HtmlNode::Text(text.to_string()));
        self
    }

    pub fn push(&mut self, node: HtmlNode) {
        self.children.push(node);
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl HtmlNode {
    fn write_to(&self, out: &mut String) {
        match self {
            HtmlNode::Element(element) => element.write_to(out),
            HtmlNode::Text(text) => out.push_str(&escape_text(text)),
            HtmlNode::Raw(raw) => out.push_str(raw),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlDocument {
    wrap_document: bool,
    language: Option<String>,
    head: HtmlElement,
    body: HtmlElement,
}

impl HtmlDocument {
    pub fn new(wrap_document: bool) -> Self {
        Self {
            wrap_document,
            language: None,
            head: HtmlElement::new("head"),
            body: HtmlElement::new("body"),
        }
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
    }

    pub fn head_mut(&mut self) -> &mut HtmlElement {
        &mut self.head
    }

    pub fn body_mut(&mut self) -> &mut HtmlElement {
        &mut self.body
    }

    /// Serialize the document to its final text form.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.wrap_document {
            out.push_str("<!DOCTYPE html>\n");
            match &self.language {
                Some(language) => {
                    out.push_str("<html lang=\"");
                    out.push_str(&escape_attribute(language));
                    out.push_str("\">");
                }
                None => out.push_str("<html>"),
            }
            self.head.write_to(&mut out);
            self.body.write_to(&mut out);
            out.push_str("</html>\n");
        } else {
            // Fragment form: only the body content, without the body tag.
            for child in &self.body.children {
                child.write_to(&mut out);
            }
        }
        out
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_children() {
        let element = HtmlElement::new("p").with_text("a < b & c");
        let mut out = String::new();
        element.write_to(&mut out);
        assert_eq!(out, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_escapes_attribute_values() {
        let element = HtmlElement::new("a").with_attribute("href", "x\"y");
        let mut out = String::new();
        element.write_to(&mut out);
        assert_eq!(out, "<a href=\"x&quot;y\"></a>");
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let element = HtmlElement::new("meta").with_attribute("charset", "utf-8");
        let mut out = String::new();
        element.write_to(&mut out);
        assert_eq!(out, "<meta charset=\"utf-8\">");
    }

    #[test]
    fn test_wrapped_document_has_outer_structure() {
        let mut document = HtmlDocument::new(true);
        document.body_mut().push(HtmlNode::Element(
            HtmlElement::new("p").with_text("hello"),
        ));
        let html = document.render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<head></head>"));
        assert!(html.contains("<body><p>hello</p></body>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_fragment_document_has_no_outer_structure() {
        let mut document = HtmlDocument::new(false);
        document.body_mut().push(HtmlNode::Element(
            HtmlElement::new("p").with_text("hello"),
        ));
        assert_eq!(document.render(), "<p>hello</p>");
    }

    #[test]
    fn test_language_attribute() {
        let mut document = HtmlDocument::new(true);
        document.set_language("en");
        assert!(document.render().contains("<html lang=\"en\">"));
    }
}
