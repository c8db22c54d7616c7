//! YAML frontmatter at the top of a document.

use serde::Deserialize;

const DELIMITER: &str = "---";

/// Metadata declared between `---` lines.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title, used when the document has no top-level heading
    pub title: Option<String>,

    /// Page description for SEO
    pub description: Option<String>,

    /// Document name override (defaults to the file stem)
    pub name: Option<String>,

    /// Layout the page is rendered with (`docs` by default)
    pub layout: Option<String>,
}

/// Split a document into its frontmatter and body.
///
/// The block must open on the first non-blank line and close with a line
/// holding only `---`. Without an opening delimiter the whole source is body.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(block) = source.trim_start().strip_prefix(DELIMITER) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    let mut closing = None;
    for line in block.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == DELIMITER {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let (yaml_end, body_start) = closing.ok_or(FrontmatterError::Unclosed)?;
    let yaml = block[..yaml_end].trim();
    let body = block[body_start..].trim_start();

    let frontmatter = if yaml.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), body))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
