//! Content indexer: orders documents, links neighbours, builds the ToC forest.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::document::{ContentDocument, IndexedDocument};
use crate::order::{OrderedIndex, ROOT_CATEGORY};
use crate::tree::{self, TocNode};

/// Label given to the first entry of the root category.
pub const HOME_LABEL: &str = "Home";

/// A run of top-level ToC nodes rendered under one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSection {
    /// Group label; `None` renders the nodes ungrouped
    pub label: Option<String>,
    /// Top-level nodes of the section's documents
    pub nodes: Vec<TocNode>,
}

/// Documents in navigation order with their table of contents.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    config: SiteConfig,
    documents: Vec<IndexedDocument>,
    positions: HashMap<String, usize>,
    roots: Vec<TocNode>,
    root_ranges: Vec<Range<usize>>,
    unlisted: Vec<ContentDocument>,
}

impl ContentIndex {
    /// Build the index.
    ///
    /// Only documents listed in `order` and present in `documents` are
    /// indexed, in `order`'s sequence. Listed names without a document are
    /// skipped. Documents the order does not mention are kept aside as
    /// unlisted.
    pub fn build(documents: Vec<ContentDocument>, order: &OrderedIndex, config: SiteConfig) -> Self {
        let mut by_name: HashMap<String, ContentDocument> = HashMap::new();
        for doc in documents {
            if by_name.contains_key(&doc.name) {
                tracing::warn!("Duplicate document name '{}', keeping the first", doc.name);
                continue;
            }
            by_name.insert(doc.name.clone(), doc);
        }

        let mut listed: Vec<(Option<String>, ContentDocument)> = Vec::new();
        let mut seen = HashSet::new();
        for (category, name) in order.entries() {
            if !seen.insert(name) {
                tracing::debug!("'{}' is listed more than once in the index", name);
                continue;
            }
            match by_name.remove(name) {
                Some(doc) => listed.push((category.map(str::to_string), doc)),
                None => tracing::debug!("Skipping '{}': listed in the index but not found", name),
            }
        }

        let names: Vec<String> = listed.iter().map(|(_, d)| d.name.clone()).collect();
        let mut indexed = Vec::with_capacity(listed.len());
        let mut positions = HashMap::with_capacity(listed.len());
        let mut roots = Vec::new();
        let mut root_ranges = Vec::with_capacity(listed.len());

        for (position, (category, document)) in listed.into_iter().enumerate() {
            let href = config.href_for(&document.name);
            let edit_href = config.edit_href_for(&document.name);

            let start = roots.len();
            roots.extend(tree::document_roots(
                &document.name,
                &href,
                document.page_title(),
                &document.outline,
            ));
            root_ranges.push(start..roots.len());

            positions.insert(document.name.clone(), position);
            indexed.push(IndexedDocument {
                href,
                edit_href,
                position,
                category,
                prev_name: position.checked_sub(1).map(|p| names[p].clone()),
                next_name: names.get(position + 1).cloned(),
                document,
            });
        }

        let mut unlisted: Vec<ContentDocument> = by_name.into_values().collect();
        unlisted.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(
            "Indexed {} documents ({} unlisted)",
            indexed.len(),
            unlisted.len()
        );

        Self {
            config,
            documents: indexed,
            positions,
            roots,
            root_ranges,
            unlisted,
        }
    }

    /// Site settings the index was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Indexed documents in navigation order.
    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    /// Whether no document made it into the index.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents present in the content set but absent from the order.
    pub fn unlisted(&self) -> &[ContentDocument] {
        &self.unlisted
    }

    /// Look up an indexed document by name.
    pub fn document(&self, name: &str) -> Option<&IndexedDocument> {
        self.positions.get(name).map(|&p| &self.documents[p])
    }

    /// The document before `name` in navigation order.
    pub fn prev_of(&self, name: &str) -> Option<&IndexedDocument> {
        self.document(name)?
            .prev_name
            .as_deref()
            .and_then(|prev| self.document(prev))
    }

    /// The document after `name` in navigation order.
    pub fn next_of(&self, name: &str) -> Option<&IndexedDocument> {
        self.document(name)?
            .next_name
            .as_deref()
            .and_then(|next| self.document(next))
    }

    /// Top-level ToC nodes of every document, in order.
    pub fn roots(&self) -> &[TocNode] {
        &self.roots
    }

    /// Top-level ToC nodes of one document.
    pub fn roots_of(&self, name: &str) -> &[TocNode] {
        match self.positions.get(name) {
            Some(&p) => &self.roots[self.root_ranges[p].clone()],
            None => &[],
        }
    }

    /// The first ToC node, if any document is indexed.
    pub fn first_node(&self) -> Option<&TocNode> {
        self.roots.first()
    }

    /// Find a ToC node by key.
    pub fn node(&self, key: &str) -> Option<&TocNode> {
        tree::find(&self.roots, key)
    }

    /// Group the ToC for rendering.
    ///
    /// A flat index yields one unlabelled section. A grouped index yields one
    /// section per run of documents sharing a category; the root category is
    /// unlabelled and its very first node is shown as "Home".
    pub fn sections(&self) -> Vec<TocSection> {
        let mut sections: Vec<(Option<&str>, TocSection)> = Vec::new();

        for (document, range) in self.documents.iter().zip(&self.root_ranges) {
            let category = document.category.as_deref();
            let nodes = &self.roots[range.clone()];

            match sections.last_mut() {
                Some((last, section)) if *last == category => {
                    section.nodes.extend(nodes.iter().cloned());
                }
                _ => {
                    let label = category.filter(|c| *c != ROOT_CATEGORY).map(str::to_string);
                    sections.push((
                        category,
                        TocSection {
                            label,
                            nodes: nodes.to_vec(),
                        },
                    ));
                }
            }
        }

        let mut sections: Vec<TocSection> = sections.into_iter().map(|(_, s)| s).collect();

        let starts_with_root = self
            .documents
            .first()
            .is_some_and(|d| d.category.as_deref() == Some(ROOT_CATEGORY));
        if starts_with_root {
            if let Some(first) = sections.first_mut().and_then(|s| s.nodes.first_mut()) {
                first.title = HOME_LABEL.to_string();
            }
        }

        sections
    }
}
