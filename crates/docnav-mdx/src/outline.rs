//! Heading outline: flat heading entries nested into a tree.

use std::collections::HashMap;

use serde::Serialize;

/// A heading as it appears in the document, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID (unique within the document)
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A node of the nested heading outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading text
    pub title: String,
    /// Anchor including the leading `#`
    pub hash: String,
    /// Headings nested under this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Heading>,
}

impl Heading {
    /// Create a heading without children.
    pub fn new(title: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hash: hash.into(),
            children: Vec::new(),
        }
    }

    /// Attach child headings.
    pub fn with_children(mut self, children: Vec<Heading>) -> Self {
        self.children = children;
        self
    }
}

/// Nest flat entries by level.
///
/// Every entry owns the entries that follow it until the next entry of the
/// same or a shallower level. Skipped levels (an `h1` followed by an `h3`)
/// nest directly.
pub fn build_outline(entries: &[TocEntry]) -> Vec<Heading> {
    let mut outline = Vec::new();
    let mut i = 0;

    while i < entries.len() {
        let entry = &entries[i];
        let end = entries[i + 1..]
            .iter()
            .position(|next| next.level <= entry.level)
            .map_or(entries.len(), |offset| i + 1 + offset);

        outline.push(Heading {
            title: entry.title.clone(),
            hash: format!("#{}", entry.id),
            children: build_outline(&entries[i + 1..end]),
        });

        i = end;
    }

    outline
}

/// Base of generated IDs for headings whose text has no usable characters.
const FALLBACK_SLUG: &str = "heading";

/// Generates unique anchor IDs for the headings of one document.
///
/// Repeated slugs get a numeric suffix (`usage`, `usage-1`, `usage-2`).
/// Explicit IDs are kept as written; reserve them before generating slugs
/// so generated ones step around them.
#[derive(Debug, Default)]
pub struct Slugger {
    /// Taken IDs, each with the last suffix tried for it as a base
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Create an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, unique among the IDs taken so far.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let base = if base.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            base
        };

        let Some(&last) = self.seen.get(&base) else {
            self.seen.insert(base.clone(), 0);
            return base;
        };

        let mut count = last;
        let candidate = loop {
            count += 1;
            let candidate = format!("{}-{}", base, count);
            if !self.seen.contains_key(&candidate) {
                break candidate;
            }
        };
        self.seen.insert(base, count);
        self.seen.insert(candidate.clone(), 0);
        candidate
    }

    /// Mark an explicit ID as taken and return it unchanged.
    pub fn reserve(&mut self, id: &str) -> String {
        self.seen.entry(id.to_string()).or_insert(0);
        id.to_string()
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(title: &str, level: u8) -> TocEntry {
        TocEntry {
            title: title.to_string(),
            id: slugify(title),
            level,
        }
    }

    #[test]
    fn nests_by_level() {
        let entries = vec![
            entry("Server", 1),
            entry("Ports", 2),
            entry("TLS", 3),
            entry("Services", 2),
        ];

        let outline = build_outline(&entries);

        assert_eq!(
            outline,
            vec![Heading::new("Server", "#server").with_children(vec![
                Heading::new("Ports", "#ports")
                    .with_children(vec![Heading::new("TLS", "#tls")]),
                Heading::new("Services", "#services"),
            ])]
        );
    }

    #[test]
    fn keeps_sibling_roots() {
        let entries = vec![entry("One", 2), entry("Two", 2), entry("Three", 1)];

        let outline = build_outline(&entries);

        assert_eq!(outline.len(), 3);
        assert!(outline.iter().all(|h| h.children.is_empty()));
    }

    #[test]
    fn nests_skipped_levels() {
        let entries = vec![entry("Top", 1), entry("Deep", 4)];

        let outline = build_outline(&entries);

        assert_eq!(outline[0].children, vec![Heading::new("Deep", "#deep")]);
    }

    #[test]
    fn empty_entries_yield_empty_outline() {
        assert!(build_outline(&[]).is_empty());
    }

    #[test]
    fn slugger_dedupes() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-1");
        assert_eq!(slugger.slug("usage"), "usage-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn slugger_steps_around_reserved_ids() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.reserve("usage-1"), "usage-1");
        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-2");
    }

    #[test]
    fn slugger_falls_back_for_symbol_only_text() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("???"), "heading");
        assert_eq!(slugger.slug("!!!"), "heading-1");
        assert_eq!(slugger.slug(""), "heading-2");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Server (Basics)"), "server-basics");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
