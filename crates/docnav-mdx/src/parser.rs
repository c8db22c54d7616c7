//! MDX document parser.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::outline::{build_outline, Heading, Slugger, TocEntry};

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Headings in source order, with their anchor IDs
    pub headings: Vec<TocEntry>,

    /// Headings nested into the document outline
    pub outline: Vec<Heading>,
}

impl ParsedDoc {
    /// Title from frontmatter, if one was declared.
    pub fn declared_title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for every document.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse an MDX document.
///
/// Extracts frontmatter and the heading outline. Headings with an explicit
/// `{#id}` attribute keep it wherever they appear; the others get a slug of
/// their text that avoids every explicit ID in the document.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    // (level, explicit id, text)
    let mut raw: Vec<(u8, Option<String>, String)> = Vec::new();
    let mut in_heading = false;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                raw.push((level as u8, id.map(|i| i.to_string()), String::new()));
                in_heading = true;
            }

            Event::Text(text) | Event::Code(text) if in_heading => {
                if let Some((_, _, heading_text)) = raw.last_mut() {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => in_heading = false,

            _ => {}
        }
    }

    let mut slugger = Slugger::new();
    for id in raw.iter().filter_map(|(_, id, _)| id.as_deref()) {
        slugger.reserve(id);
    }

    let headings: Vec<TocEntry> = raw
        .into_iter()
        .map(|(level, explicit_id, title)| {
            let id = explicit_id.unwrap_or_else(|| slugger.slug(&title));
            TocEntry { title, id, level }
        })
        .collect();

    let outline = build_outline(&headings);

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        headings,
        outline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_mdx() {
        let source = r#"---
title: Server basics
description: Your first server
---

# Server basics

Some text.

## Listening on ports

```java
Server.builder().http(8080);
```

## Adding services

### Annotated `@Get` services
"#;

        let doc = parse_mdx(source).unwrap();

        let fm = doc.frontmatter.clone().unwrap();
        assert_eq!(fm.description.as_deref(), Some("Your first server"));
        assert_eq!(doc.declared_title(), Some("Server basics"));

        assert_eq!(doc.headings.len(), 4);
        assert_eq!(doc.headings[0].id, "server-basics");
        assert_eq!(doc.headings[3].title, "Annotated @Get services");
        assert_eq!(doc.headings[3].level, 3);

        assert_eq!(
            doc.outline,
            vec![Heading::new("Server basics", "#server-basics").with_children(vec![
                Heading::new("Listening on ports", "#listening-on-ports"),
                Heading::new("Adding services", "#adding-services").with_children(vec![
                    Heading::new("Annotated @Get services", "#annotated-get-services"),
                ]),
            ])]
        );
    }

    #[test]
    fn parses_without_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter.";

        let doc = parse_mdx(source).unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.declared_title(), None);
        assert_eq!(doc.headings.len(), 1);
        assert_eq!(doc.outline[0].title, "Just Markdown");
    }

    #[test]
    fn ignores_code_block_text() {
        let source = "# Title\n\n```\n# not a heading\n```\n";

        let doc = parse_mdx(source).unwrap();

        assert_eq!(doc.headings.len(), 1);
        assert_eq!(doc.headings[0].title, "Title");
    }

    #[test]
    fn keeps_explicit_ids_and_dedupes() {
        let source = "# Usage {#custom}\n\n## Usage\n\n## Usage\n";

        let doc = parse_mdx(source).unwrap();

        let ids: Vec<_> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["custom", "usage", "usage-1"]);
    }

    #[test]
    fn explicit_id_after_generated_slug_is_kept() {
        let source = "## Usage\n\n## Usage {#usage}\n";

        let doc = parse_mdx(source).unwrap();

        let ids: Vec<_> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["usage-1", "usage"]);
    }

    #[test]
    fn symbol_only_heading_gets_fallback_id() {
        let doc = parse_mdx("# ???\n\n## !!!\n").unwrap();

        assert_eq!(doc.outline[0].hash, "#heading");
        assert_eq!(doc.outline[0].children[0].hash, "#heading-1");
    }

    #[test]
    fn document_without_headings_has_empty_outline() {
        let doc = parse_mdx("Plain paragraph.").unwrap();

        assert!(doc.outline.is_empty());
    }
}
