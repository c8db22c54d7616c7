//! Static site builder.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pulldown_cmark::{html, CowStr, Event, Parser, Tag};
use rayon::prelude::*;
use walkdir::WalkDir;

use docnav_mdx::{markdown_options, parse_mdx, ParsedDoc, TocEntry};
use docnav_toc::{
    ContentDocument, ContentIndex, IndexedDocument, Location, NavigationOptions, NavigationSession, OrderedIndex,
    SiteConfig, TocNode,
};

use crate::assets::AssetPipeline;
use crate::templates::{Context, PageLink, TemplateEngine, TocGroup, TocItem};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Ordering file (`index.json`)
    pub index_file: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// URL and source-link settings
    pub site: SiteConfig,

    /// Expansion, search and layout behaviour of the ToC
    pub navigation: NavigationOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            index_file: PathBuf::from("docs/index.json"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
            site: SiteConfig::default(),
            navigation: NavigationOptions::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of pages not listed in the ordering file
    pub unlisted: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse MDX: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to load index: {0}")]
    IndexError(#[from] docnav_toc::IndexError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Parsed document
    doc: ParsedDoc,
}

impl PageInfo {
    fn name(&self) -> String {
        self.content_document().name
    }

    fn content_document(&self) -> ContentDocument {
        let stem = self
            .source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        ContentDocument::from_parsed(stem, &self.doc, self.source_path.clone())
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let templates =
            TemplateEngine::new().map_err(|e| BuildError::TemplateError(e.to_string()))?;
        Ok(Self { config, templates })
    }

    /// Discover the docs and index them without writing any output.
    pub fn index(&self) -> Result<ContentIndex, BuildError> {
        let pages = self.discover_pages()?;
        self.load_index(&pages)
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        let index = self.load_index(&pages)?;

        if index.is_empty() && !pages.is_empty() {
            tracing::warn!(
                "No document listed in {} was found",
                self.config.index_file.display()
            );
        }
        for doc in index.unlisted() {
            tracing::info!("'{}' is not in the index; building it as a standalone page", doc.name);
        }

        let results: Vec<Result<(), BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &index))
            .collect();

        for result in results {
            result?;
        }

        self.generate_assets()?;
        self.generate_toc_json(&index)?;
        self.generate_search_index(&pages, &index)?;
        self.generate_sitemap(&index)?;

        Ok(BuildResult {
            pages: pages.len(),
            unlisted: index.unlisted().len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all MDX pages in the docs directory.
    ///
    /// Files are visited in sorted order. A file whose page name was already
    /// taken is skipped.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_mdx(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            // Pages declaring another layout are not part of the docs section.
            let layout = doc.frontmatter.as_ref().and_then(|f| f.layout.as_deref());
            if layout.is_some_and(|l| l != "docs") {
                tracing::debug!("Skipping {}: layout {:?}", path.display(), layout);
                continue;
            }

            let page = PageInfo {
                source_path: path.to_path_buf(),
                doc,
            };

            // The first file with a name wins.
            let name = page.name();
            if let Some(kept) = seen.get(&name) {
                tracing::warn!(
                    "Skipping {}: page name '{}' is already used by {}",
                    path.display(),
                    name,
                    kept.display()
                );
                continue;
            }
            seen.insert(name, page.source_path.clone());

            pages.push(page);
        }

        Ok(pages)
    }

    /// Read the ordering file and index the discovered pages.
    fn load_index(&self, pages: &[PageInfo]) -> Result<ContentIndex, BuildError> {
        let order = OrderedIndex::load(&self.config.index_file)?;
        if order.is_empty() {
            tracing::warn!("{} lists no pages", self.config.index_file.display());
        }
        let documents = pages.iter().map(PageInfo::content_document).collect();

        Ok(ContentIndex::build(documents, &order, self.config.site.clone()))
    }

    /// Output file for a page URL.
    fn output_path(&self, href: &str) -> PathBuf {
        let relative = href.trim_matches('/');
        if relative.is_empty() {
            self.config.output_dir.join("index.html")
        } else {
            self.config.output_dir.join(relative).join("index.html")
        }
    }

    /// Public URL for a site-relative href.
    fn link(&self, href: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), href)
    }

    /// Build a single page.
    fn build_page(&self, page: &PageInfo, index: &ContentIndex) -> Result<(), BuildError> {
        let name = page.name();
        let indexed = index.document(&name);

        let href = match indexed {
            Some(doc) => doc.href.clone(),
            None => index.config().href_for(&name),
        };

        // Unlisted pages have no place in the ToC, so nothing is highlighted.
        let session = match indexed {
            Some(_) => NavigationSession::new(index, self.config.navigation, &Location::new(href.as_str(), "")),
            None => None,
        };

        let content_html = render_markdown(&page.doc.content, &page.doc.headings);

        let title = match indexed {
            Some(doc) => doc.page_title().to_string(),
            None => page.content_document().page_title().to_string(),
        };

        let page_link = |doc: Option<&IndexedDocument>| {
            doc.map(|doc| PageLink {
                title: doc.page_title().to_string(),
                href: self.link(&doc.href),
            })
        };

        let context = Context {
            title,
            site_title: self.config.title.clone(),
            description: page
                .doc
                .frontmatter
                .as_ref()
                .and_then(|f| f.description.clone()),
            page: name.clone(),
            content: content_html,
            toc: self.toc_groups(index, session.as_ref()),
            prev: page_link(index.prev_of(&name)),
            next: page_link(index.next_of(&name)),
            edit_href: index.config().edit_href_for(&name),
            base_url: self.config.base_url.clone(),
            breakpoint: self.config.navigation.layout.breakpoint,
            search_mode: self.config.navigation.search.as_str().to_string(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| {
                    let filename = Path::new(s)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", self.config.base_url, filename)
                })
                .collect(),
        };

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let output_path = self.output_path(&href);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("Wrote {}", output_path.display());

        Ok(())
    }

    /// Render the ToC view model for a page.
    fn toc_groups(&self, index: &ContentIndex, session: Option<&NavigationSession>) -> Vec<TocGroup> {
        let state = match session {
            Some(session) => TreeState {
                active: Some(session.active_node().key.as_str()),
                selected: session.selected_keys().iter().map(String::as_str).collect(),
                expanded: session.visible_expanded_keys().into_iter().collect(),
            },
            None => TreeState::default(),
        };

        index
            .sections()
            .into_iter()
            .map(|section| TocGroup {
                label: section.label,
                items: self.toc_items(&section.nodes, &state),
            })
            .collect()
    }

    fn toc_items(&self, nodes: &[TocNode], state: &TreeState) -> Vec<TocItem> {
        nodes
            .iter()
            .map(|node| TocItem {
                key: node.key.clone(),
                title: node.title.clone(),
                href: self.link(&node.href),
                hash: node.hash.clone(),
                page: node.page_name.clone(),
                depth: node.depth,
                active: state.active == Some(node.key.as_str()),
                selected: state.selected.contains(node.key.as_str()),
                expanded: state.expanded.contains(&node.key),
                children: self.toc_items(&node.children, state),
            })
            .collect()
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css(self.config.navigation.layout);
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let js = AssetPipeline::generate_js();
        fs::write(assets_dir.join("main.js"), js)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Write the grouped ToC for client-side consumers.
    fn generate_toc_json(&self, index: &ContentIndex) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(&index.sections())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("toc.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[PageInfo], index: &ContentIndex) -> Result<(), BuildError> {
        let entries: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                let document = page.content_document();
                let href = index
                    .document(&document.name)
                    .map(|d| d.href.clone())
                    .unwrap_or_else(|| index.config().href_for(&document.name));

                let description = page
                    .doc
                    .frontmatter
                    .as_ref()
                    .and_then(|f| f.description.clone())
                    .unwrap_or_default();

                let headings: Vec<&str> =
                    page.doc.headings.iter().map(|h| h.title.as_str()).collect();

                serde_json::json!({
                    "name": document.name,
                    "title": document.page_title(),
                    "description": description,
                    "url": self.link(&href),
                    "headings": headings,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, index: &ContentIndex) -> Result<(), BuildError> {
        let urls: Vec<String> = index
            .documents()
            .iter()
            .map(|doc| format!("  <url>\n    <loc>{}</loc>\n  </url>", self.link(&doc.href)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Per-page highlighting of the ToC.
#[derive(Default)]
struct TreeState<'a> {
    active: Option<&'a str>,
    selected: HashSet<&'a str>,
    expanded: HashSet<String>,
}

/// Render markdown to HTML, giving headings the anchor IDs of the outline.
fn render_markdown(content: &str, headings: &[TocEntry]) -> String {
    let mut ids = headings.iter().map(|h| h.id.clone());

    let parser = Parser::new_ext(content, markdown_options()).map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => Event::Start(Tag::Heading {
            level,
            id: ids.next().map(CowStr::from).or(id),
            classes,
            attrs,
        }),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
