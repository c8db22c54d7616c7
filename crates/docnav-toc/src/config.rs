//! Site-level settings shared by the indexer and the navigation session.

use serde::Deserialize;

/// How documents map to URLs and source links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// URL prefix of the documentation section (e.g. `/docs`)
    pub prefix: String,

    /// Document shown for the bare prefix
    pub fallback_page: String,

    /// Base URL for "edit this page" links; `None` disables them
    pub edit_base_url: Option<String>,

    /// Source file extension used in edit links
    pub source_ext: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            prefix: "/docs".to_string(),
            fallback_page: "index".to_string(),
            edit_base_url: None,
            source_ext: "mdx".to_string(),
        }
    }
}

impl SiteConfig {
    /// Prefix without a trailing slash; empty for a site-root prefix.
    pub fn normalized_prefix(&self) -> &str {
        self.prefix.trim_end_matches('/')
    }

    /// Page URL for a document name.
    pub fn href_for(&self, name: &str) -> String {
        let prefix = self.normalized_prefix();
        if name == self.fallback_page {
            if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            }
        } else {
            format!("{}/{}", prefix, name)
        }
    }

    /// Source link for a document name, if edit links are enabled.
    pub fn edit_href_for(&self, name: &str) -> Option<String> {
        self.edit_base_url.as_ref().map(|base| {
            format!(
                "{}/{}.{}",
                base.trim_end_matches('/'),
                name,
                self.source_ext
            )
        })
    }
}

/// Which nodes start out expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionPolicy {
    /// Every node with at least one child
    #[default]
    All,
    /// Only the active node and its ancestors
    Active,
}

/// Which keys a search query collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Matching nodes only; a match hides its subtree from further matching
    #[default]
    Matches,
    /// Matching nodes plus all of their descendants
    Descendants,
}

impl SearchMode {
    /// Name as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matches => "matches",
            Self::Descendants => "descendants",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_page_maps_to_prefix() {
        let config = SiteConfig::default();

        assert_eq!(config.href_for("index"), "/docs");
        assert_eq!(config.href_for("server"), "/docs/server");
    }

    #[test]
    fn trailing_slash_prefix_is_normalized() {
        let config = SiteConfig {
            prefix: "/docs/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.href_for("index"), "/docs");
        assert_eq!(config.href_for("client"), "/docs/client");
    }

    #[test]
    fn root_prefix() {
        let config = SiteConfig {
            prefix: "/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.href_for("index"), "/");
        assert_eq!(config.href_for("setup"), "/setup");
    }

    #[test]
    fn search_mode_names() {
        assert_eq!(SearchMode::Matches.as_str(), "matches");
        assert_eq!(SearchMode::Descendants.as_str(), "descendants");
    }

    #[test]
    fn edit_links() {
        let config = SiteConfig {
            edit_base_url: Some("https://github.com/org/repo/tree/main/docs/".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.edit_href_for("server").as_deref(),
            Some("https://github.com/org/repo/tree/main/docs/server.mdx")
        );
        assert_eq!(SiteConfig::default().edit_href_for("server"), None);
    }
}
