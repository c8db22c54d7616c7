//! Active-node resolution from the current URL.

use crate::config::SiteConfig;
use crate::indexer::ContentIndex;
use crate::tree::{self, TocNode};

/// The parts of a URL navigation cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path, without query or fragment
    pub path: String,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
}

impl Location {
    /// Create a location from a path and a hash.
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
        }
    }

    /// Split a URL path such as `/docs/server?x=1#ports`.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(pos) => (&url[..pos], &url[pos..]),
            None => (url, ""),
        };
        let path = rest.split('?').next().unwrap_or(rest);

        // A lone `#` selects nothing.
        let hash = if hash == "#" { "" } else { hash };

        Self::new(path, hash)
    }
}

/// Document name addressed by a URL path.
///
/// The path segment right after the documentation prefix names the page.
/// Paths outside the prefix, and the bare prefix with or without a trailing
/// slash, address the fallback page.
pub fn page_name_for(path: &str, config: &SiteConfig) -> String {
    let prefix = config.normalized_prefix();
    let fallback = || config.fallback_page.clone();

    let rest = if prefix.is_empty() {
        path
    } else {
        match path.find(prefix) {
            Some(pos) => &path[pos + prefix.len()..],
            None => return fallback(),
        }
    };

    // `/docsfoo` is not under `/docs`.
    let Some(rest) = rest.strip_prefix('/') else {
        return fallback();
    };

    match rest.split('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback(),
    }
}

/// Resolve the ToC node a location points at.
///
/// Within the addressed page, a node whose anchor equals the location's hash
/// wins, searching each top-level node before its descendants; without a
/// match (or without a hash) the page's first node is used. An unknown page
/// resolves to the first node of the index. Returns `None` only for an empty
/// index.
pub fn resolve_active<'a>(index: &'a ContentIndex, location: &Location) -> Option<&'a TocNode> {
    let page = page_name_for(&location.path, index.config());
    let roots = index.roots_of(&page);

    let Some(first) = roots.first() else {
        tracing::debug!("No document named '{}', using the first page", page);
        return index.first_node();
    };

    if location.hash.is_empty() {
        return Some(first);
    }

    for root in roots {
        if root.hash == location.hash {
            return Some(root);
        }
        if let Some(found) = tree::walk(&root.children).find(|n| n.hash == location.hash) {
            return Some(found);
        }
    }

    tracing::debug!("No heading '{}' in '{}'", location.hash, page);
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentDocument;
    use crate::order::OrderedIndex;
    use docnav_mdx::Heading;

    fn index() -> ContentIndex {
        let docs = vec![
            ContentDocument::new("index", vec![Heading::new("Welcome", "#welcome")]),
            ContentDocument::new(
                "server",
                vec![
                    Heading::new("Server", "#server").with_children(vec![
                        Heading::new("Ports", "#ports")
                            .with_children(vec![Heading::new("TLS", "#tls")]),
                    ]),
                    Heading::new("Appendix", "#appendix"),
                ],
            ),
            ContentDocument::new("faq", vec![]),
        ];
        let order = OrderedIndex::Flat(vec![
            "index".to_string(),
            "server".to_string(),
            "faq".to_string(),
        ]);
        ContentIndex::build(docs, &order, SiteConfig::default())
    }

    fn active(url: &str) -> String {
        let index = index();
        resolve_active(&index, &Location::parse(url)).unwrap().key.clone()
    }

    #[test]
    fn parses_locations() {
        assert_eq!(Location::parse("/docs/server#ports"), Location::new("/docs/server", "#ports"));
        assert_eq!(Location::parse("/docs/server?a=b#x"), Location::new("/docs/server", "#x"));
        assert_eq!(Location::parse("/docs/"), Location::new("/docs/", ""));
        assert_eq!(Location::parse("/docs#"), Location::new("/docs", ""));
    }

    #[test]
    fn page_names() {
        let config = SiteConfig::default();

        assert_eq!(page_name_for("/docs", &config), "index");
        assert_eq!(page_name_for("/docs/", &config), "index");
        assert_eq!(page_name_for("/docs/server", &config), "server");
        assert_eq!(page_name_for("/docs/server/", &config), "server");
        assert_eq!(page_name_for("/docs/server/extra", &config), "server");
        assert_eq!(page_name_for("/site/docs/server", &config), "server");
        assert_eq!(page_name_for("/news", &config), "index");
        assert_eq!(page_name_for("/docsfoo", &config), "index");
    }

    #[test]
    fn page_names_under_root_prefix() {
        let config = SiteConfig {
            prefix: "/".to_string(),
            ..Default::default()
        };

        assert_eq!(page_name_for("/", &config), "index");
        assert_eq!(page_name_for("/setup/", &config), "setup");
    }

    #[test]
    fn empty_remainder_resolves_fallback() {
        assert_eq!(active("/docs"), "index#welcome");
        assert_eq!(active("/docs/"), "index#welcome");
    }

    #[test]
    fn hash_selects_heading() {
        assert_eq!(active("/docs/server#server"), "server#server");
        assert_eq!(active("/docs/server#tls"), "server#tls");
        assert_eq!(active("/docs/server#appendix"), "server#appendix");
    }

    #[test]
    fn falls_back_to_first_node_of_page() {
        assert_eq!(active("/docs/server"), "server#server");
        assert_eq!(active("/docs/server#nope"), "server#server");
        assert_eq!(active("/docs/faq"), "faq");
    }

    #[test]
    fn unknown_page_resolves_first_document() {
        assert_eq!(active("/docs/missing"), "index#welcome");
        assert_eq!(active("/docs/missing#tls"), "index#welcome");
    }

    #[test]
    fn resolution_is_total() {
        let index = index();
        let urls = ["", "/", "#", "/docs/faq#x", "/docs//", "/other/page", "/docs/server/#ports"];

        for url in urls {
            assert!(resolve_active(&index, &Location::parse(url)).is_some(), "{url}");
        }
    }

    #[test]
    fn empty_index_resolves_nothing() {
        let index = ContentIndex::build(vec![], &OrderedIndex::Flat(vec![]), SiteConfig::default());

        assert!(resolve_active(&index, &Location::parse("/docs")).is_none());
    }
}
