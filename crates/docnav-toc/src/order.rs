//! The curated ordering file (`index.json`).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// Category whose entries render ungrouped.
pub const ROOT_CATEGORY: &str = "root";

/// A named group of document names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    /// Category label
    pub category: String,
    /// Document names in navigation order
    pub names: Vec<String>,
}

/// Navigation order of the documentation pages.
///
/// Either a flat JSON array of names or a JSON object mapping category
/// labels to arrays of names. Group order follows the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderedIndex {
    /// `["index", "concept", "server"]`
    Flat(Vec<String>),
    /// `{"root": ["index"], "Server": ["server-basics"]}`
    Grouped(Vec<IndexGroup>),
}

impl OrderedIndex {
    /// Parse an ordering file from JSON text.
    pub fn from_json(source: &str) -> Result<Self, IndexError> {
        serde_json::from_str(source).map_err(|e| IndexError::Invalid(e.to_string()))
    }

    /// Read and parse an ordering file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = fs::read_to_string(path)
            .map_err(|e| IndexError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// All names with their category, in navigation order.
    pub fn entries(&self) -> Vec<(Option<&str>, &str)> {
        match self {
            Self::Flat(names) => names.iter().map(|n| (None, n.as_str())).collect(),
            Self::Grouped(groups) => groups
                .iter()
                .flat_map(|g| {
                    g.names
                        .iter()
                        .map(move |n| (Some(g.category.as_str()), n.as_str()))
                })
                .collect(),
        }
    }

    /// Whether the index lists no names at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(names) => names.is_empty(),
            Self::Grouped(groups) => groups.iter().all(|g| g.names.is_empty()),
        }
    }
}

/// Errors that can occur when reading the ordering file.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Failed to read index file: {0}")]
    Read(String),

    #[error("Invalid index file: {0}")]
    Invalid(String),
}

impl<'de> Deserialize<'de> for OrderedIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OrderedIndexVisitor)
    }
}

struct OrderedIndexVisitor;

impl<'de> Visitor<'de> for OrderedIndexVisitor {
    type Value = OrderedIndex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of page names or a map of category to page names")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut names = Vec::new();
        while let Some(name) = seq.next_element::<String>()? {
            names.push(name);
        }
        Ok(OrderedIndex::Flat(names))
    }

    // Visiting the map directly keeps the category order of the file.
    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut groups: Vec<IndexGroup> = Vec::new();
        while let Some((category, names)) = map.next_entry::<String, Vec<String>>()? {
            if groups.iter().any(|g| g.category == category) {
                return Err(de::Error::custom(format!(
                    "duplicate category `{}`",
                    category
                )));
            }
            groups.push(IndexGroup { category, names });
        }
        Ok(OrderedIndex::Grouped(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_flat_index() {
        let index = OrderedIndex::from_json(r#"["index", "concept", "server"]"#).unwrap();

        assert_eq!(
            index,
            OrderedIndex::Flat(vec![
                "index".to_string(),
                "concept".to_string(),
                "server".to_string()
            ])
        );
        assert_eq!(
            index.entries(),
            vec![(None, "index"), (None, "concept"), (None, "server")]
        );
    }

    #[test]
    fn parses_grouped_index_in_file_order() {
        let source = r#"{
            "root": ["index", "setup"],
            "Server": ["server-basics", "server-grpc"],
            "Client": ["client-http"]
        }"#;

        let index = OrderedIndex::from_json(source).unwrap();

        let OrderedIndex::Grouped(groups) = &index else {
            panic!("expected grouped index");
        };
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["root", "Server", "Client"]);
        assert_eq!(index.entries()[2], (Some("Server"), "server-basics"));
        assert_eq!(index.entries().len(), 5);
    }

    #[test]
    fn rejects_duplicate_categories() {
        let result = OrderedIndex::from_json(r#"{"A": ["x"], "A": ["y"]}"#);

        assert!(matches!(result, Err(IndexError::Invalid(_))));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(OrderedIndex::from_json(r#""index""#).is_err());
        assert!(OrderedIndex::from_json(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn empty_index() {
        assert!(OrderedIndex::from_json("[]").unwrap().is_empty());
        assert!(OrderedIndex::from_json(r#"{"root": []}"#).unwrap().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("index.json");
        fs::write(&path, r#"["index"]"#).unwrap();

        let index = OrderedIndex::load(&path).unwrap();
        assert_eq!(index, OrderedIndex::Flat(vec!["index".to_string()]));

        let missing = OrderedIndex::load(&temp.path().join("missing.json"));
        assert!(matches!(missing, Err(IndexError::Read(_))));
    }
}
