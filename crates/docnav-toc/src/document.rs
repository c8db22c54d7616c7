//! Content documents and their indexed, annotated form.

use std::path::PathBuf;

use docnav_mdx::{Heading, ParsedDoc};
use serde::Serialize;

/// A unit of documentation content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    /// Unique document name (slug), e.g. `server-basics`
    pub name: String,

    /// Title declared in frontmatter
    pub title: Option<String>,

    /// Nested heading outline
    pub outline: Vec<Heading>,

    /// Where the document was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl ContentDocument {
    /// Create a document from its name and outline.
    pub fn new(name: impl Into<String>, outline: Vec<Heading>) -> Self {
        Self {
            name: name.into(),
            title: None,
            outline,
            source_path: None,
        }
    }

    /// Create a document from a parsed MDX file.
    ///
    /// The frontmatter `name` overrides `default_name` (normally the file stem).
    pub fn from_parsed(default_name: &str, doc: &ParsedDoc, source_path: PathBuf) -> Self {
        let name = doc
            .frontmatter
            .as_ref()
            .and_then(|f| f.name.clone())
            .unwrap_or_else(|| default_name.to_string());

        Self {
            name,
            title: doc.declared_title().map(str::to_string),
            outline: doc.outline.clone(),
            source_path: Some(source_path),
        }
    }

    /// Title shown for the page: first heading, then declared title, then the name.
    pub fn page_title(&self) -> &str {
        self.outline
            .first()
            .map(|h| h.title.as_str())
            .or(self.title.as_deref())
            .unwrap_or(&self.name)
    }
}

/// A document annotated with its place in the navigation order.
///
/// Neighbours are referenced by name and resolved through the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedDocument {
    /// The underlying document
    #[serde(flatten)]
    pub document: ContentDocument,

    /// Page URL
    pub href: String,

    /// "Edit this page" link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_href: Option<String>,

    /// Position in navigation order
    pub position: usize,

    /// Category from a grouped index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Name of the previous document
    pub prev_name: Option<String>,

    /// Name of the next document
    pub next_name: Option<String>,
}

impl IndexedDocument {
    /// Document name.
    pub fn name(&self) -> &str {
        &self.document.name
    }

    /// Title shown for the page.
    pub fn page_title(&self) -> &str {
        self.document.page_title()
    }
}
