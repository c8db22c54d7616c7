//! Table-of-contents tree built from document outlines.

use docnav_mdx::Heading;
use serde::Serialize;

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocNode {
    /// Unique key: document name followed by the anchor
    pub key: String,
    /// Heading text
    pub title: String,
    /// Full link, including the anchor
    pub href: String,
    /// Anchor including the leading `#`, empty for a whole-page node
    pub hash: String,
    /// Name of the document this node belongs to
    pub page_name: String,
    /// Nesting depth, starting at 1
    pub depth: usize,
    /// Child nodes in heading order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Whether the node has child nodes.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Build the root nodes of one document.
///
/// Each heading becomes a node keyed `name + hash`. A document without
/// headings gets a single leaf node for the whole page, keyed by its name.
pub fn document_roots(name: &str, page_href: &str, title: &str, outline: &[Heading]) -> Vec<TocNode> {
    if outline.is_empty() {
        return vec![TocNode {
            key: name.to_string(),
            title: title.to_string(),
            href: page_href.to_string(),
            hash: String::new(),
            page_name: name.to_string(),
            depth: 1,
            children: Vec::new(),
        }];
    }

    build_nodes(name, page_href, outline, 1)
}

fn build_nodes(name: &str, page_href: &str, headings: &[Heading], depth: usize) -> Vec<TocNode> {
    headings
        .iter()
        .map(|heading| TocNode {
            key: format!("{}{}", name, heading.hash),
            title: heading.title.clone(),
            href: format!("{}{}", page_href, heading.hash),
            hash: heading.hash.clone(),
            page_name: name.to_string(),
            depth,
            children: build_nodes(name, page_href, &heading.children, depth + 1),
        })
        .collect()
}

/// Pre-order traversal over a forest of nodes.
pub struct Walk<'a> {
    stack: Vec<&'a TocNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TocNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Visit every node in document order.
pub fn walk(roots: &[TocNode]) -> Walk<'_> {
    Walk {
        stack: roots.iter().rev().collect(),
    }
}

/// Find a node by key.
pub fn find<'a>(roots: &'a [TocNode], key: &str) -> Option<&'a TocNode> {
    walk(roots).find(|node| node.key == key)
}

/// The chain of nodes from a root down to `key`, inclusive.
pub fn path_to<'a>(roots: &'a [TocNode], key: &str) -> Option<Vec<&'a TocNode>> {
    for node in roots {
        if node.key == key {
            return Some(vec![node]);
        }
        if let Some(mut path) = path_to(&node.children, key) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}
