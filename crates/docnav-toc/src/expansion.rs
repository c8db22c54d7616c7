//! Expanded-node sets: initial policy, search filtering, parent expansion.

use std::collections::HashSet;

use crate::config::{ExpansionPolicy, SearchMode};
use crate::tree::{self, TocNode};

/// Keys expanded when the ToC is first shown.
pub fn initial_expanded_keys(roots: &[TocNode], policy: ExpansionPolicy, active_key: &str) -> Vec<String> {
    match policy {
        ExpansionPolicy::All => tree::walk(roots)
            .filter(|node| node.has_children())
            .map(|node| node.key.clone())
            .collect(),
        ExpansionPolicy::Active => match tree::path_to(roots, active_key) {
            Some(path) => path.into_iter().map(|node| node.key.clone()).collect(),
            None => vec![active_key.to_string()],
        },
    }
}

/// Trim and lowercase a search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Keys of the nodes whose title contains `query` (already normalized).
///
/// In [`SearchMode::Matches`] a matching node's subtree is not searched
/// further. In [`SearchMode::Descendants`] every descendant of a match is
/// collected as well.
pub fn search_keys(roots: &[TocNode], query: &str, mode: SearchMode) -> Vec<String> {
    let mut keys = Vec::new();
    collect_matches(roots, query, mode, &mut keys);
    keys
}

fn collect_matches(nodes: &[TocNode], query: &str, mode: SearchMode, keys: &mut Vec<String>) {
    for node in nodes {
        if node.title.to_lowercase().contains(query) {
            match mode {
                SearchMode::Matches => keys.push(node.key.clone()),
                SearchMode::Descendants => {
                    keys.extend(tree::walk(std::slice::from_ref(node)).map(|n| n.key.clone()));
                }
            }
        } else {
            collect_matches(&node.children, query, mode, keys);
        }
    }
}

/// `keys` plus every ancestor of each key, in tree order.
///
/// Unknown keys are dropped.
pub fn with_ancestors(roots: &[TocNode], keys: &[String]) -> Vec<String> {
    let mut visible = HashSet::new();
    for key in keys {
        if let Some(path) = tree::path_to(roots, key) {
            visible.extend(path.into_iter().map(|node| node.key.as_str()));
        }
    }

    tree::walk(roots)
        .filter(|node| visible.contains(node.key.as_str()))
        .map(|node| node.key.clone())
        .collect()
}
