//! Template engine for rendering documentation pages.

use minijinja::{context, Environment};

/// A ToC tree node as rendered into a page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TocItem {
    /// Unique node key
    pub key: String,
    /// Display title
    pub title: String,
    /// Link target
    pub href: String,
    /// Anchor, empty for a whole-page node
    pub hash: String,
    /// Owning document name
    pub page: String,
    /// Nesting depth, starting at 1
    pub depth: usize,
    /// Whether this node is the one being viewed
    pub active: bool,
    /// Whether this node is highlighted
    pub selected: bool,
    /// Whether the node's children are shown
    pub expanded: bool,
    /// Child items
    pub children: Vec<TocItem>,
}

/// A labelled group of top-level ToC items.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TocGroup {
    /// Group label, `None` for ungrouped items
    pub label: Option<String>,
    /// Items of the group
    pub items: Vec<TocItem>,
}

/// A previous/next page link.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageLink {
    /// Target page title
    pub title: String,
    /// Target URL
    pub href: String,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page description for SEO
    pub description: Option<String>,
    /// Name of the document being rendered
    pub page: String,
    /// Rendered content HTML
    pub content: String,
    /// Table of contents
    pub toc: Vec<TocGroup>,
    /// Previous page in navigation order
    pub prev: Option<PageLink>,
    /// Next page in navigation order
    pub next: Option<PageLink>,
    /// "Edit this page" link
    pub edit_href: Option<String>,
    /// Base URL
    pub base_url: String,
    /// Width at and above which the ToC is inline
    pub breakpoint: u32,
    /// What the ToC search collects: `matches` or `descendants`
    pub search_mode: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())?;
        env.add_template_owned("doc.html".to_string(), DOC_TEMPLATE.to_string())?;
        env.add_template_owned("toc.html".to_string(), TOC_TEMPLATE.to_string())?;

        Ok(Self { env })
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            page => &context.page,
            content => &context.content,
            toc => &context.toc,
            prev => &context.prev,
            next => &context.next,
            edit_href => &context.edit_href,
            base_url => &context.base_url,
            breakpoint => context.breakpoint,
            search_mode => &context.search_mode,
            styles => &context.styles,
        })
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} — {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <header class="site-header">
    <a href="{{ base_url }}" class="site-title">{{ site_title }}</a>
  </header>
  <div class="docs" data-breakpoint="{{ breakpoint }}" data-search-mode="{{ search_mode }}" data-page="{{ page }}">
    <div class="toc-button">
      <button type="button" class="toc-toggle" aria-label="Open table of contents">&#9776;</button>
    </div>
    <div class="toc-wrapper" role="directory" data-phase="closed">
      {% include "toc.html" %}
    </div>
    <main class="content" role="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  {{ content | safe }}
</article>
<footer class="doc-footer">
  {% if edit_href %}
  <div class="edit-link"><a href="{{ edit_href }}" rel="noopener">Edit this page</a></div>
  {% endif %}
  <nav class="pager">
    {% if prev %}<a class="prev-button" href="{{ prev.href }}" title="{{ prev.title }}">&larr; Prev</a>{% endif %}
    {% if next %}<a class="next-button" href="{{ next.href }}" title="{{ next.title }}">Next &rarr;</a>{% endif %}
  </nav>
</footer>
{% endblock %}"##;

const TOC_TEMPLATE: &str = r##"<nav class="toc">
  <input type="search" class="toc-search" placeholder="Search table of contents">
  {% for group in toc %}
  <div class="toc-group">
    {% if group.label %}<div class="toc-group-label">{{ group.label }}</div>{% endif %}
    <ul class="toc-tree">
    {% for item in group.items recursive %}
      <li class="toc-node toc-depth-{{ item.depth }}{% if item.active %} active{% endif %}{% if item.selected %} selected{% endif %}{% if item.children %}{% if item.expanded %} expanded{% else %} collapsed{% endif %}{% endif %}"
          data-key="{{ item.key }}" data-page="{{ item.page }}" data-hash="{{ item.hash }}">
        <a href="{{ item.href }}">{{ item.title }}</a>
        {% if item.children %}
        <ul class="toc-children">{{ loop(item.children) }}</ul>
        {% endif %}
      </li>
    {% endfor %}
    </ul>
  </div>
  {% endfor %}
</nav>"##;
