//! Asset pipeline for CSS and JavaScript processing.

use docnav_toc::viewport::MAX_CONTENT_WIDTH;
use docnav_toc::{Layout, Viewport, ANIMATION_DURATION};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file for a layout.
    pub fn generate_css(layout: Layout) -> String {
        let breakpoint = layout.breakpoint;
        let inline_width = layout.content_width(Viewport::new(breakpoint));
        let wide_width = layout.content_width(Viewport::new(MAX_CONTENT_WIDTH.max(breakpoint)));

        DEFAULT_CSS
            .replace("__BREAKPOINT__", &breakpoint.to_string())
            .replace("__WIDE_BREAKPOINT__", &MAX_CONTENT_WIDTH.max(breakpoint).to_string())
            .replace("__CONTENT_WIDTH__", &inline_width.css())
            .replace("__WIDE_CONTENT_WIDTH__", &wide_width.css())
            .replace("__PANEL_BREAKPOINT__", &breakpoint.saturating_sub(1).to_string())
            .replace("__DURATION__", &ANIMATION_DURATION.as_millis().to_string())
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.replace("__DURATION__", &ANIMATION_DURATION.as_millis().to_string())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* docnav default theme */

:root {
  --toc-width: 256px;
  --content-max-width: 1200px;
  --background: #fff;
  --foreground: #1f1f1f;
  --muted: #f5f5f5;
  --muted-foreground: #666;
  --border: #e8e8e8;
  --primary: #1890ff;
  --highlight: rgb(186, 231, 255);
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.site-header {
  height: 64px;
  display: flex;
  align-items: center;
  padding: 0 1.5rem;
  border-bottom: 1px solid var(--border);
}

.site-title {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

/* Table of contents */
.toc {
  padding: 1rem;
}

.toc-search {
  width: 100%;
  padding: 0.375rem 0.5rem;
  margin-bottom: 0.75rem;
  border: 1px solid var(--border);
  border-radius: 4px;
}

.toc-group-label {
  margin: 0.75rem 0 0.25rem;
  font-size: 0.75rem;
  font-weight: 600;
  text-transform: uppercase;
  color: var(--muted-foreground);
}

.toc-tree,
.toc-children {
  list-style: none;
  margin: 0;
  padding: 0;
}

.toc-children {
  padding-left: 0.75rem;
}

.toc-node.collapsed > .toc-children,
.toc-node.filtered-out {
  display: none;
}

.toc-node > a {
  display: block;
  padding: 0.125rem 0.5rem;
  border-radius: 4px;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc-node > a:hover {
  color: var(--foreground);
}

.toc-node.selected > a {
  background: var(--muted);
  color: var(--primary);
}

.toc-depth-1 > a {
  font-weight: 600;
  color: var(--foreground);
}

/* Content */
.content {
  padding: 1rem;
}

.doc h1,
.doc h2,
.doc h3 {
  transition-property: background-color;
  transition-duration: 0.5s;
}

.doc h2 {
  padding-bottom: 0.25rem;
  border-bottom: 1px solid var(--border);
}

.doc pre {
  background: var(--muted);
  padding: 1rem;
  overflow-x: auto;
  border-radius: 4px;
}

.doc table {
  border-collapse: collapse;
}

.doc th,
.doc td {
  border: 1px solid var(--border);
  padding: 0.25rem 0.5rem;
}

.doc-footer {
  margin-top: 3rem;
  padding-top: 1rem;
  border-top: 1px solid var(--border);
}

.pager {
  display: flex;
  justify-content: space-between;
  margin-top: 1rem;
}

.next-button {
  margin-left: auto;
}

/* Wide viewports: the ToC sits beside the content */
@media (min-width: __BREAKPOINT__px) {
  .docs {
    display: flex;
    align-items: stretch;
    margin: 16px auto;
    max-width: var(--content-max-width);
  }

  .toc-button {
    display: none;
  }

  .toc-wrapper {
    flex: 0 0 var(--toc-width);
  }

  .toc-wrapper .toc {
    position: sticky;
    top: 0;
  }

  .content {
    flex-grow: 1;
    margin-left: 16px;
    max-width: __CONTENT_WIDTH__;
  }
}

@media (min-width: __WIDE_BREAKPOINT__px) {
  .content {
    max-width: __WIDE_CONTENT_WIDTH__;
  }
}

/* Narrow viewports: the ToC is a panel over the content */
@media (max-width: __PANEL_BREAKPOINT__px) {
  .docs {
    position: relative;
  }

  .toc-button {
    position: absolute;
    z-index: 200;
    top: 0;
    right: 0;
    margin: 16px;
  }

  .toc-wrapper {
    position: absolute;
    inset: 0;
    z-index: 100;
    background: var(--background);
    box-shadow: 0 6px 16px 0 rgba(0, 0, 0, 0.08);
    transition-property: opacity;
    transition-duration: __DURATION__ms;
    display: none;
    opacity: 0;
  }

  .toc-wrapper[data-phase="opening"],
  .toc-wrapper[data-phase="closing"] {
    display: block;
    opacity: 0;
  }

  .toc-wrapper[data-phase="open"] {
    display: block;
    opacity: 1;
  }
}
"#;

const DEFAULT_JS: &str = r#"// docnav runtime: ToC panel, search and in-page navigation
(function() {
  'use strict';

  var DURATION = __DURATION__;
  var docs = document.querySelector('.docs');
  if (!docs) return;

  var wrapper = docs.querySelector('.toc-wrapper');
  var toggle = docs.querySelector('.toc-toggle');
  var search = docs.querySelector('.toc-search');
  var currentPage = docs.getAttribute('data-page');
  var breakpoint = parseInt(docs.getAttribute('data-breakpoint'), 10) || 768;
  var searchMode = docs.getAttribute('data-search-mode') || 'matches';

  // Panel state machine. Every transition bumps the generation; a deferred
  // transition only commits if the generation and phase are unchanged.
  var panel = { phase: 'closed', generation: 0 };

  function setPhase(phase) {
    panel.phase = phase;
    panel.generation += 1;
    wrapper.setAttribute('data-phase', phase);
    if (toggle) {
      toggle.setAttribute('aria-label', phase === 'open' ? 'Close table of contents' : 'Open table of contents');
    }
  }

  function defer(expected, next, delay) {
    var generation = panel.generation;
    setTimeout(function() {
      if (panel.generation === generation && panel.phase === expected) {
        setPhase(next);
      }
    }, delay);
  }

  function togglePanel() {
    if (panel.phase === 'closed') {
      setPhase('opening');
      defer('opening', 'open', 0);
    } else if (panel.phase === 'open') {
      setPhase('closing');
      defer('closing', 'closed', DURATION);
    }
  }

  function closePanel() {
    if (panel.phase === 'open') {
      setPhase('closing');
      defer('closing', 'closed', DURATION);
    }
  }

  if (toggle) toggle.addEventListener('click', togglePanel);

  // The panel only exists below the breakpoint.
  window.addEventListener('resize', function() {
    if (window.innerWidth >= breakpoint && panel.phase !== 'closed') {
      setPhase('closed');
    }
  });

  var nodes = Array.prototype.slice.call(docs.querySelectorAll('.toc-node'));
  var initiallyExpanded = nodes.filter(function(n) { return n.classList.contains('expanded'); });
  var initiallySelected = nodes.filter(function(n) { return n.classList.contains('selected'); });

  function setExpanded(node, expanded) {
    if (!node.querySelector(':scope > .toc-children')) return;
    node.classList.toggle('expanded', expanded);
    node.classList.toggle('collapsed', !expanded);
  }

  function expandAncestors(node) {
    var parent = node.parentElement && node.parentElement.closest('.toc-node');
    while (parent) {
      setExpanded(parent, true);
      parent = parent.parentElement && parent.parentElement.closest('.toc-node');
    }
  }

  function select(list) {
    nodes.forEach(function(n) { n.classList.remove('selected'); });
    list.forEach(function(n) { n.classList.add('selected'); });
  }

  // A match is not searched further; in 'descendants' mode its whole
  // subtree is collected with it.
  function matches(list, text, out) {
    list.forEach(function(node) {
      var title = node.querySelector(':scope > a').textContent.toLowerCase();
      if (title.indexOf(text) >= 0) {
        out.push(node);
        if (searchMode === 'descendants') {
          node.querySelectorAll('.toc-node').forEach(function(n) { out.push(n); });
        }
      } else {
        var children = node.querySelectorAll(':scope > .toc-children > .toc-node');
        matches(Array.prototype.slice.call(children), text, out);
      }
    });
    return out;
  }

  if (search) {
    search.addEventListener('input', function() {
      var text = search.value.trim().toLowerCase();
      nodes.forEach(function(n) { setExpanded(n, false); });
      if (text.length === 0) {
        initiallyExpanded.forEach(function(n) { setExpanded(n, true); });
        select(initiallySelected);
        return;
      }
      var roots = Array.prototype.slice.call(docs.querySelectorAll('.toc-tree > .toc-node'));
      var found = matches(roots, text, []);
      found.forEach(function(n) { setExpanded(n, true); expandAncestors(n); });
      select(found);
    });
  }

  // Scroll to an anchor, retrying while the element is not rendered yet.
  function jumpToHash(hash) {
    if (!hash || hash.charAt(0) !== '#') {
      window.scroll({ top: 0 });
      return;
    }
    var id = hash.substring(1);
    function tryScroll(attempt) {
      var target = document.getElementById(id);
      if (!target) {
        if (attempt < 50) setTimeout(function() { tryScroll(attempt + 1); }, 20);
        return;
      }
      window.scroll({ top: Math.max(target.offsetTop - 16, 0) });
      if (window.location.hash !== hash) {
        window.history.pushState({}, '', hash);
      }
      var oldBackground = target.style.backgroundColor;
      target.style.backgroundColor = 'var(--highlight)';
      setTimeout(function() { target.style.backgroundColor = oldBackground; }, 500);
    }
    tryScroll(0);
  }

  nodes.forEach(function(node) {
    var link = node.querySelector(':scope > a');
    link.addEventListener('click', function(event) {
      closePanel();
      if (node.getAttribute('data-page') !== currentPage) return;
      event.preventDefault();
      setExpanded(node, true);
      nodes.forEach(function(n) { n.classList.remove('active'); });
      node.classList.add('active');
      select([node]);
      jumpToHash(node.getAttribute('data-hash'));
    });
  });

  if (window.location.hash) jumpToHash(window.location.hash);
})();
"#;
