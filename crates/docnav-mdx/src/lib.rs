//! MDX parser with frontmatter and heading outline extraction.
//!
//! This crate parses MDX files, extracts YAML frontmatter, and nests the
//! document's headings into the outline the table of contents is built from.

pub mod frontmatter;
pub mod outline;
pub mod parser;

pub use frontmatter::Frontmatter;
pub use outline::{slugify, Heading, Slugger, TocEntry};
pub use parser::{markdown_options, parse_mdx, ParseError, ParsedDoc};
