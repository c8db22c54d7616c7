//! Configuration file (`docs.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use docnav_static::BuildConfig;
use docnav_toc::{ExpansionPolicy, Layout, NavigationOptions, SearchMode, SiteConfig};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub toc: TocConfig,
    #[serde(default)]
    pub edit: EditConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// URL prefix of the documentation section
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Ordering file, relative to the working directory
    #[serde(default)]
    pub index: Option<String>,
    /// Document shown for the bare prefix
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Paths to CSS stylesheets to include
    pub styles: Option<Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            prefix: default_prefix(),
            index: None,
            fallback: default_fallback(),
            styles: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TocConfig {
    #[serde(default)]
    pub expansion: ExpansionPolicy,
    #[serde(default)]
    pub search: SearchMode,
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            expansion: ExpansionPolicy::default(),
            search: SearchMode::default(),
            breakpoint: default_breakpoint(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditConfig {
    /// Base URL of the documentation sources; no edit links when unset
    pub base_url: Option<String>,
    #[serde(default = "default_ext")]
    pub ext: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            ext: default_ext(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_prefix() -> String {
    "/docs".to_string()
}
fn default_fallback() -> String {
    "index".to_string()
}
fn default_breakpoint() -> u32 {
    docnav_toc::viewport::DEFAULT_BREAKPOINT
}
fn default_ext() -> String {
    "mdx".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Ordering file path.
    pub fn index_file(&self) -> PathBuf {
        match &self.docs.index {
            Some(index) => PathBuf::from(index),
            None => Path::new(&self.docs.dir).join("index.json"),
        }
    }

    /// URL and source-link settings.
    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            prefix: self.docs.prefix.clone(),
            fallback_page: self.docs.fallback.clone(),
            edit_base_url: self.edit.base_url.clone(),
            source_ext: self.edit.ext.clone(),
        }
    }

    /// ToC behaviour.
    pub fn navigation(&self) -> NavigationOptions {
        NavigationOptions {
            expansion: self.toc.expansion,
            search: self.toc.search,
            layout: Layout {
                breakpoint: self.toc.breakpoint,
            },
        }
    }

    /// Static build settings, with command-line overrides.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            docs_dir: PathBuf::from(&self.docs.dir),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.docs.output)),
            index_file: self.index_file(),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.docs.base_url.clone(),
            title: self.docs.title.clone(),
            styles: self.docs.styles.clone().unwrap_or_default(),
            site: self.site(),
            navigation: self.navigation(),
        }
    }
}
