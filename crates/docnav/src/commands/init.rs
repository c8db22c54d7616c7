//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in the current directory.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing docnav...");

    if scaffold(Path::new("."), yes)? {
        tracing::info!("Initialization complete!");
        tracing::info!("Run 'docnav build' to generate the site.");
    }

    Ok(())
}

/// Write the starter files under `root`.
///
/// Returns `false` when `docs/` already exists and `yes` is not set.
fn scaffold(root: &Path, yes: bool) -> Result<bool> {
    let docs_dir = root.join("docs");

    if docs_dir.exists() {
        if !yes {
            tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
            return Ok(false);
        }
    } else {
        fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;
    }

    let files = [
        (root.join("docs.toml"), DEFAULT_CONFIG),
        (docs_dir.join("index.json"), DEFAULT_ORDER),
        (docs_dir.join("index.mdx"), DEFAULT_INDEX),
        (docs_dir.join("getting-started.mdx"), DEFAULT_GETTING_STARTED),
    ];

    for (path, content) in files {
        if path.exists() && !yes {
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(true)
}

const DEFAULT_CONFIG: &str = r#"# docnav configuration

[docs]
# Source directory for documentation
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

# URL prefix of the documentation pages
prefix = "/docs"

# Page shown for the bare prefix
fallback = "index"

[toc]
# "all" expands every node with children, "active" only the path to the current page
expansion = "all"

# "matches" selects matching nodes, "descendants" also their children
search = "matches"

# Viewport width at which the table of contents moves inline
breakpoint = 768

[edit]
# Uncomment to show "Edit this page" links
# base_url = "https://github.com/you/project/tree/main/docs"
ext = "mdx"

[build]
# Enable minification
minify = true
"#;

const DEFAULT_ORDER: &str = r#"{
  "root": ["index"],
  "Guides": ["getting-started"]
}
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
---

# Welcome

This is your documentation site, built with **docnav**.

## Next Steps

Read the [Getting Started](/docs/getting-started) guide.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
description: Writing and ordering pages
---

# Getting Started

## Writing Pages

Create `.mdx` files in the `docs/` directory. Every heading becomes an entry
in the table of contents.

## Ordering Pages

List page names in `docs/index.json`. Use an array for a flat list, or an
object mapping categories to page names for a grouped one:

```json
{
  "root": ["index"],
  "Guides": ["getting-started"]
}
```

Pages missing from the index are still built but do not appear in the table
of contents.

## Building

```bash
docnav build
```
"#;
