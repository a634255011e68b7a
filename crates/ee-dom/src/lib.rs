//! Element tree model built from parsed HTML, plus the tree filter.
//!
//! The tree keeps elements only. Text runs from the parse are dropped here;
//! they are still visible through each node's captured source markup.

use ee_html::HtmlDocument;
use ee_html::HtmlElement;
use ee_html::HtmlNode;
use ee_html::serialize;

/// One element in the inspector tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Lower-cased tag name.
    pub tag: String,
    /// Attributes in source order, first occurrence wins on duplicate names.
    pub attrs: Vec<(String, String)>,
    /// Markup of this element and its subtree, captured once at build time.
    pub source_text: String,
    pub children: Vec<ElementNode>,
    /// Whether the current filter keeps this node visible.
    pub visible: bool,
}

impl ElementNode {
    /// `tag#id.class` style label shown in the tree view.
    pub fn display_label(&self) -> String {
        let mut label = self.tag.clone();
        if let Some(id) = self.attr("id") {
            if !id.is_empty() {
                label.push('#');
                label.push_str(id);
            }
        }
        if let Some(classes) = self.attr("class") {
            for class in classes.split_whitespace() {
                label.push('.');
                label.push_str(class);
            }
        }
        label
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes rendered as `name="value"` pairs joined by spaces.
    pub fn attribute_summary(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.attrs {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out
    }

    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Builds the inspector tree for a parsed document.
///
/// The synthetic document root is skipped: if it holds exactly one element
/// child that element becomes the root, otherwise the root keeps the
/// document tag so multiple top-level elements stay reachable.
pub fn build_document(document: &HtmlDocument) -> Option<ElementNode> {
    let mut roots: Vec<ElementNode> = document
        .root
        .children
        .iter()
        .filter_map(|node| match node {
            HtmlNode::Element(element) => Some(build(element)),
            HtmlNode::Text(_) => None,
        })
        .collect();

    match roots.len() {
        0 => None,
        1 => roots.pop(),
        _ => Some(ElementNode {
            tag: document.root.tag.clone(),
            attrs: Vec::new(),
            source_text: serialize(&document.root),
            children: roots,
            visible: true,
        }),
    }
}

/// Builds one tree node from an element, recursing into element children.
pub fn build(element: &HtmlElement) -> ElementNode {
    let mut attrs: Vec<(String, String)> = Vec::with_capacity(element.attrs.len());
    for (name, value) in &element.attrs {
        if !attrs.iter().any(|(seen, _)| seen == name) {
            attrs.push((name.clone(), value.clone()));
        }
    }

    let children = element
        .children
        .iter()
        .filter_map(|node| match node {
            HtmlNode::Element(child) => Some(build(child)),
            HtmlNode::Text(_) => None,
        })
        .collect();

    ElementNode {
        tag: element.tag.clone(),
        attrs,
        source_text: serialize(element),
        children,
        visible: true,
    }
}

/// Recomputes visibility for the whole tree against `query`.
///
/// A node is visible when it matches the query itself or any descendant
/// does, so matching nodes keep their ancestor chain expanded. An empty or
/// whitespace-only query makes everything visible. Returns the root's
/// resulting visibility.
pub fn apply_filter(node: &mut ElementNode, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        mark_all_visible(node);
        return true;
    }
    apply_needle(node, &needle)
}

fn apply_needle(node: &mut ElementNode, needle: &str) -> bool {
    let mut any_child = false;
    for child in &mut node.children {
        if apply_needle(child, needle) {
            any_child = true;
        }
    }
    node.visible = any_child || node_matches(node, needle);
    node.visible
}

fn node_matches(node: &ElementNode, needle: &str) -> bool {
    if node.tag.to_lowercase().contains(needle) {
        return true;
    }
    node.attribute_summary().to_lowercase().contains(needle)
}

fn mark_all_visible(node: &mut ElementNode) {
    node.visible = true;
    for child in &mut node.children {
        mark_all_visible(child);
    }
}

#[cfg(test)]
mod tests {
    use super::ElementNode;
    use super::apply_filter;
    use super::build_document;
    use ee_html::HtmlDocument;

    fn tree_for(html: &str) -> ElementNode {
        let document = HtmlDocument::parse(html);
        match build_document(&document) {
            Some(root) => root,
            None => panic!("expected at least one element"),
        }
    }

    #[test]
    fn single_top_level_element_becomes_root() {
        let root = tree_for("<div id=\"x\"><p>hi</p><span class=\"y\">bye</span></div>");
        assert_eq!(root.tag, "div");
        assert_eq!(root.attrs, vec![("id".to_owned(), "x".to_owned())]);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].tag, "p");
        assert_eq!(root.children[1].tag, "span");
    }

    #[test]
    fn building_twice_yields_equal_trees() {
        let document =
            HtmlDocument::parse("<div id=\"x\"><p>hi</p><span class=\"y\">bye</span></div>");
        assert_eq!(build_document(&document), build_document(&document));
    }

    #[test]
    fn text_only_input_yields_no_tree() {
        let document = HtmlDocument::parse("just words, no markup");
        assert!(build_document(&document).is_none());
    }

    #[test]
    fn multiple_top_level_elements_share_synthetic_root() {
        let root = tree_for("<p>a</p><p>b</p>");
        assert_eq!(root.tag, "document");
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn duplicate_attributes_keep_first_occurrence() {
        let root = tree_for("<div class=\"a\" class=\"b\">x</div>");
        assert_eq!(root.attrs, vec![("class".to_owned(), "a".to_owned())]);
    }

    #[test]
    fn source_text_round_trips_markup() {
        let root = tree_for("<div id=\"x\"><p>hi</p></div>");
        assert_eq!(root.source_text, "<div id=\"x\"><p>hi</p></div>");
        assert_eq!(root.children[0].source_text, "<p>hi</p>");
    }

    #[test]
    fn display_label_includes_id_and_classes() {
        let root = tree_for("<div id=\"main\" class=\"box wide\">x</div>");
        assert_eq!(root.display_label(), "div#main.box.wide");
    }

    #[test]
    fn attribute_summary_joins_pairs_with_spaces() {
        let root = tree_for("<a href=\"/x\" target=\"_blank\">x</a>");
        assert_eq!(root.attribute_summary(), "href=\"/x\" target=\"_blank\"");
    }

    #[test]
    fn filter_matches_tag_name_case_insensitively() {
        let mut root = tree_for("<div><p>hi</p><span>bye</span></div>");
        assert!(apply_filter(&mut root, "SPAN"));
        assert!(root.visible);
        assert!(!root.children[0].visible);
        assert!(root.children[1].visible);
    }

    #[test]
    fn filter_matches_attribute_summary() {
        let mut root = tree_for("<div id=\"x\"><p>hi</p><span class=\"y\">bye</span></div>");
        assert!(apply_filter(&mut root, "class=\"y\""));
        assert!(root.visible);
        assert!(!root.children[0].visible);
        assert!(root.children[1].visible);
    }

    #[test]
    fn bare_attribute_value_query_matches() {
        let mut root = tree_for("<div id=\"x\"><p>hi</p><span class=\"y\">bye</span></div>");
        assert!(apply_filter(&mut root, "y"));
        assert!(root.visible);
        assert!(!root.children[0].visible);
        assert!(root.children[1].visible);
    }

    #[test]
    fn matching_descendant_keeps_ancestors_visible() {
        let mut root = tree_for("<div><section><span id=\"deep\">x</span></section></div>");
        assert!(apply_filter(&mut root, "deep"));
        assert!(root.visible);
        assert!(root.children[0].visible);
        assert!(root.children[0].children[0].visible);
    }

    #[test]
    fn no_match_hides_everything() {
        let mut root = tree_for("<div><p>hi</p></div>");
        assert!(!apply_filter(&mut root, "nothing-here"));
        assert!(!root.visible);
        assert!(!root.children[0].visible);
    }

    #[test]
    fn empty_query_restores_full_visibility() {
        let mut root = tree_for("<div><p>hi</p></div>");
        assert!(!apply_filter(&mut root, "zzz"));
        assert!(apply_filter(&mut root, "   "));
        assert!(root.visible);
        assert!(root.children[0].visible);
    }

    #[test]
    fn descendant_count_covers_whole_subtree() {
        let root = tree_for("<div><p>a</p><section><span>b</span></section></div>");
        assert_eq!(root.descendant_count(), 3);
    }
}
