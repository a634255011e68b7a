//! Tolerant HTML tokenization, tree building, and serialization.
//!
//! The parser never fails: arbitrary byte content produces some tree.
//! Mismatched end tags, unterminated comments, and stray `<` characters are
//! recovered from in the way lenient browsers do.

/// A parsed HTML document with a synthetic `document` root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub root: HtmlElement,
}

/// One element: lower-cased tag name, attributes in source order, children
/// in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

/// Tree node: element or decoded text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
}

pub const DOCUMENT_ROOT_TAG: &str = "document";

impl HtmlDocument {
    /// Parses raw HTML. Tolerant of malformed markup; never fails.
    pub fn parse(source: &str) -> Self {
        let tokens = Scanner::new(source).run();
        Self {
            root: assemble_tree(tokens),
        }
    }

    /// First non-empty `<title>` text, whitespace-collapsed.
    pub fn title(&self) -> Option<String> {
        first_title_text(&self.root.children)
    }
}

impl HtmlElement {
    fn synthetic_root() -> Self {
        Self {
            tag: DOCUMENT_ROOT_TAG.to_owned(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_document_root(&self) -> bool {
        self.tag == DOCUMENT_ROOT_TAG
    }
}

#[derive(Debug)]
enum Token {
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close {
        name: String,
    },
    Text(String),
}

/// Byte cursor over the source with tokenizer state.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while !self.at_end() {
            if self.looking_at(b"<!--") {
                self.skip_past(b"-->", 4);
            } else if self.looking_at(b"<?") {
                self.skip_past(b"?>", 2);
            } else if self.looking_at(b"<!") {
                self.skip_to_byte(b'>');
            } else if self.looking_at(b"</") {
                self.scan_close_tag();
            } else if self.peek() == Some(b'<') {
                self.scan_open_tag();
            } else {
                self.scan_text();
            }
        }
        self.tokens
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn looking_at(&self, pattern: &[u8]) -> bool {
        let end = self.pos.saturating_add(pattern.len());
        end <= self.bytes.len() && &self.bytes[self.pos..end] == pattern
    }

    fn bump(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Advances past the next occurrence of `terminator`, or to the end of
    /// input if it never appears (unterminated construct).
    fn skip_past(&mut self, terminator: &[u8], opener_len: usize) {
        self.pos = self.pos.saturating_add(opener_len);
        while self.pos < self.bytes.len() {
            if self.looking_at(terminator) {
                self.pos += terminator.len();
                return;
            }
            self.bump();
        }
    }

    fn skip_to_byte(&mut self, target: u8) {
        while let Some(byte) = self.peek() {
            self.bump();
            if byte == target {
                return;
            }
        }
    }

    fn take_name(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.bump();
        }
        if self.pos == start {
            return None;
        }
        Some(String::from_utf8_lossy(&self.bytes[start..self.pos]).to_ascii_lowercase())
    }

    fn scan_text(&mut self) {
        let start = self.pos;
        while self.peek().is_some_and(|byte| byte != b'<') {
            self.bump();
        }
        let raw = String::from_utf8_lossy(&self.bytes[start..self.pos]);
        if !raw.is_empty() {
            self.tokens.push(Token::Text(decode_entities(&raw)));
        }
    }

    fn scan_close_tag(&mut self) {
        let restart = self.pos;
        self.pos += 2;
        self.skip_whitespace();
        let Some(name) = self.take_name() else {
            // `</` without a tag name: treat as literal text.
            self.pos = restart;
            self.tokens.push(Token::Text("<".to_owned()));
            self.pos = restart.saturating_add(1);
            return;
        };
        self.skip_to_byte(b'>');
        self.tokens.push(Token::Close { name });
    }

    fn scan_open_tag(&mut self) {
        let restart = self.pos;
        self.bump();
        self.skip_whitespace();
        let Some(name) = self.take_name() else {
            // Lone `<`: emit it as text and keep scanning.
            self.pos = restart;
            self.tokens.push(Token::Text("<".to_owned()));
            self.pos = restart.saturating_add(1);
            return;
        };

        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b'>') => {
                    self.bump();
                    break;
                }
                Some(b'/') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(b'>') {
                        self_closing = true;
                        self.bump();
                        break;
                    }
                }
                Some(_) => {
                    let Some(attr_name) = self.take_name() else {
                        // Garbage inside the tag: skip to the closing angle.
                        self.skip_to_byte(b'>');
                        break;
                    };
                    let value = self.take_attr_value();
                    attrs.push((attr_name, decode_entities(&value)));
                }
            }
        }

        let raw_text = !self_closing && is_raw_text_tag(&name);
        self.tokens.push(Token::Open {
            name: name.clone(),
            attrs,
            self_closing,
        });

        if raw_text {
            self.scan_raw_text(&name);
        }
    }

    fn take_attr_value(&mut self) -> String {
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return String::new();
        }
        self.bump();
        self.skip_whitespace();

        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.bump();
                let start = self.pos;
                while self.peek().is_some_and(|byte| byte != quote) {
                    self.bump();
                }
                let value = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
                if self.peek() == Some(quote) {
                    self.bump();
                }
                value
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|byte| !byte.is_ascii_whitespace() && byte != b'>' && byte != b'/')
                {
                    self.bump();
                }
                String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
            }
        }
    }

    /// Consumes everything up to the matching end tag of a raw-text element
    /// (`script`/`style`), emitting the body as a single undecoded text run.
    fn scan_raw_text(&mut self, tag: &str) {
        let tag_bytes = tag.as_bytes();
        let start = self.pos;

        while self.pos < self.bytes.len() {
            if self.looking_at(b"</") && self.close_tag_matches(tag_bytes) {
                let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
                if !text.is_empty() {
                    self.tokens.push(Token::Text(text));
                }
                self.pos += 2;
                self.skip_whitespace();
                let _ = self.take_name();
                self.skip_to_byte(b'>');
                self.tokens.push(Token::Close {
                    name: tag.to_owned(),
                });
                return;
            }
            self.bump();
        }

        let text = String::from_utf8_lossy(&self.bytes[start..]).into_owned();
        if !text.is_empty() {
            self.tokens.push(Token::Text(text));
        }
    }

    fn close_tag_matches(&self, tag_bytes: &[u8]) -> bool {
        let name_start = self.pos + 2;
        let name_end = name_start.saturating_add(tag_bytes.len());
        if name_end > self.bytes.len() {
            return false;
        }
        let candidate = &self.bytes[name_start..name_end];
        if !candidate.eq_ignore_ascii_case(tag_bytes) {
            return false;
        }
        match self.bytes.get(name_end).copied() {
            None => true,
            Some(byte) => byte.is_ascii_whitespace() || byte == b'>',
        }
    }
}

/// Stack-based tree assembly over the token stream. Unclosed elements are
/// folded into their parents at end of input; an end tag with no matching
/// open element on the stack closes everything up to the nearest match.
fn assemble_tree(tokens: Vec<Token>) -> HtmlElement {
    let mut stack = vec![HtmlElement::synthetic_root()];

    for token in tokens {
        match token {
            Token::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.children.push(HtmlNode::Text(text));
                }
            }
            Token::Open {
                name,
                attrs,
                self_closing,
            } => {
                let element = HtmlElement {
                    tag: name.clone(),
                    attrs,
                    children: Vec::new(),
                };
                if self_closing || is_void_tag(&name) {
                    if let Some(current) = stack.last_mut() {
                        current.children.push(HtmlNode::Element(element));
                    }
                } else {
                    stack.push(element);
                }
            }
            Token::Close { name } => {
                if !stack.iter().skip(1).any(|open| open.tag == name) {
                    // Stray end tag: nothing to close, drop it.
                    continue;
                }
                while stack.len() > 1 {
                    let Some(finished) = stack.pop() else {
                        break;
                    };
                    let matched = finished.tag == name;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(HtmlNode::Element(finished));
                    }
                    if matched {
                        break;
                    }
                }
            }
        }
    }

    while stack.len() > 1 {
        let Some(finished) = stack.pop() else {
            break;
        };
        if let Some(parent) = stack.last_mut() {
            parent.children.push(HtmlNode::Element(finished));
        }
    }

    stack.pop().unwrap_or_else(HtmlElement::synthetic_root)
}

/// Reconstructs markup for an element and its subtree.
///
/// The synthetic document root serializes as its children only. Raw-text
/// element bodies are written verbatim; other text runs and attribute
/// values are entity-escaped.
pub fn serialize(element: &HtmlElement) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &HtmlElement, out: &mut String) {
    if element.is_document_root() {
        for child in &element.children {
            write_node(child, false, out);
        }
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push('>');

    if is_void_tag(&element.tag) && element.children.is_empty() {
        return;
    }

    let raw = is_raw_text_tag(&element.tag);
    for child in &element.children {
        write_node(child, raw, out);
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn write_node(node: &HtmlNode, raw: bool, out: &mut String) {
    match node {
        HtmlNode::Element(element) => write_element(element, out),
        HtmlNode::Text(text) => {
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn first_title_text(nodes: &[HtmlNode]) -> Option<String> {
    for node in nodes {
        let HtmlNode::Element(element) = node else {
            continue;
        };
        if element.tag == "title" {
            let text = collapse_whitespace(&gather_text(&element.children));
            if !text.is_empty() {
                return Some(text);
            }
        }
        if let Some(found) = first_title_text(&element.children) {
            return Some(found);
        }
    }
    None
}

fn gather_text(nodes: &[HtmlNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element(element) => out.push_str(&gather_text(&element.children)),
        }
    }
    out
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::new();
    let mut in_whitespace = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out.trim().to_owned()
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0_usize;

    while let Some(offset) = input[cursor..].find('&') {
        let amp = cursor + offset;
        out.push_str(&input[cursor..amp]);

        let rest = &input[amp + 1..];
        let Some(semi_offset) = rest.find(';') else {
            out.push('&');
            cursor = amp + 1;
            continue;
        };

        let semi = amp + 1 + semi_offset;
        match decode_entity(&input[amp + 1..semi]) {
            Some(decoded) => {
                out.push_str(&decoded);
                cursor = semi + 1;
            }
            None => {
                out.push('&');
                cursor = amp + 1;
            }
        }
    }

    out.push_str(&input[cursor..]);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    match entity {
        "nbsp" => Some(" ".to_owned()),
        "amp" => Some("&".to_owned()),
        "lt" => Some("<".to_owned()),
        "gt" => Some(">".to_owned()),
        "quot" => Some("\"".to_owned()),
        "apos" => Some("'".to_owned()),
        _ => {
            if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                let value = u32::from_str_radix(hex, 16).ok()?;
                char::from_u32(value).map(|ch| ch.to_string())
            } else if let Some(dec) = entity.strip_prefix('#') {
                let value = dec.parse::<u32>().ok()?;
                char::from_u32(value).map(|ch| ch.to_string())
            } else {
                None
            }
        }
    }
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':')
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::{HtmlDocument, HtmlNode, collapse_whitespace, serialize};

    fn element_tags(nodes: &[HtmlNode]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(|node| match node {
                HtmlNode::Element(element) => Some(element.tag.as_str()),
                HtmlNode::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn parses_nested_elements_in_document_order() {
        let doc = HtmlDocument::parse("<div id=\"x\"><p>hi</p><span class=\"y\">bye</span></div>");
        assert_eq!(element_tags(&doc.root.children), vec!["div"]);

        let HtmlNode::Element(div) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(div.attrs, vec![("id".to_owned(), "x".to_owned())]);
        assert_eq!(element_tags(&div.children), vec!["p", "span"]);
    }

    #[test]
    fn lowercases_tag_and_attribute_names() {
        let doc = HtmlDocument::parse("<DIV CLASS='Box'>x</DIV>");
        let HtmlNode::Element(div) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(div.tag, "div");
        assert_eq!(div.attrs, vec![("class".to_owned(), "Box".to_owned())]);
    }

    #[test]
    fn finds_first_title() {
        let doc = HtmlDocument::parse(
            "<html><head><title>  Element   Eye </title></head><body>Hi</body></html>",
        );
        assert_eq!(doc.title().as_deref(), Some("Element Eye"));
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = HtmlDocument::parse("<div><br><p>after</p></div>");
        let HtmlNode::Element(div) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(element_tags(&div.children), vec!["br", "p"]);
    }

    #[test]
    fn recovers_from_mismatched_end_tags() {
        let doc = HtmlDocument::parse("<div><span>text</div>");
        let HtmlNode::Element(div) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(element_tags(&div.children), vec!["span"]);
    }

    #[test]
    fn ignores_stray_end_tags() {
        let doc = HtmlDocument::parse("</p><div>ok</div>");
        assert_eq!(element_tags(&doc.root.children), vec!["div"]);
    }

    #[test]
    fn script_body_is_raw_text() {
        let doc = HtmlDocument::parse("<script>if (a < b) { go(); }</script><p>x</p>");
        let HtmlNode::Element(script) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(script.tag, "script");
        assert_eq!(
            script.children,
            vec![HtmlNode::Text("if (a < b) { go(); }".to_owned())]
        );
        assert_eq!(element_tags(&doc.root.children), vec!["script", "p"]);
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let doc = HtmlDocument::parse("<a title=\"a &amp; b\">x &lt; y &#65;</a>");
        let HtmlNode::Element(anchor) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(anchor.attrs, vec![("title".to_owned(), "a & b".to_owned())]);
        assert_eq!(anchor.children, vec![HtmlNode::Text("x < y A".to_owned())]);
    }

    #[test]
    fn skips_comments_and_doctype() {
        let doc = HtmlDocument::parse("<!DOCTYPE html><!-- hidden --><p>shown</p>");
        assert_eq!(element_tags(&doc.root.children), vec!["p"]);
    }

    #[test]
    fn unterminated_comment_consumes_rest_of_input() {
        let doc = HtmlDocument::parse("<p>a</p><!-- open forever <div>");
        assert_eq!(element_tags(&doc.root.children), vec!["p"]);
    }

    #[test]
    fn plain_text_survives_lone_angle_bracket() {
        let doc = HtmlDocument::parse("2 < 3 and that is fine");
        let text: String = doc
            .root
            .children
            .iter()
            .filter_map(|node| match node {
                HtmlNode::Text(text) => Some(text.as_str()),
                HtmlNode::Element(_) => None,
            })
            .collect();
        assert_eq!(text, "2 < 3 and that is fine");
    }

    #[test]
    fn serializes_element_with_attributes_and_children() {
        let doc = HtmlDocument::parse("<div id=\"x\"><p>hi</p><br></div>");
        let HtmlNode::Element(div) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(serialize(div), "<div id=\"x\"><p>hi</p><br></div>");
    }

    #[test]
    fn serializer_escapes_text_and_attribute_values() {
        let doc = HtmlDocument::parse("<a title=\"a &amp; b\">x &lt; y</a>");
        let HtmlNode::Element(anchor) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(serialize(anchor), "<a title=\"a &amp; b\">x &lt; y</a>");
    }

    #[test]
    fn serializer_keeps_script_bodies_verbatim() {
        let doc = HtmlDocument::parse("<script>a < b && c</script>");
        let HtmlNode::Element(script) = &doc.root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(serialize(script), "<script>a < b && c</script>");
    }

    #[test]
    fn collapses_ws() {
        assert_eq!(collapse_whitespace("  a \t\n b  "), "a b");
    }
}
