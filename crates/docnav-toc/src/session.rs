//! Per-page-view navigation state.

use serde::Serialize;

use crate::config::{ExpansionPolicy, SearchMode};
use crate::document::IndexedDocument;
use crate::expansion::{initial_expanded_keys, normalize_query, search_keys, with_ancestors};
use crate::indexer::ContentIndex;
use crate::panel::{Deferred, PanelPhase, PanelState, PanelToken, Visibility};
use crate::resolve::{resolve_active, Location};
use crate::tree::TocNode;
use crate::viewport::{ContentWidth, Layout, LayoutMode, Viewport};

/// Behaviour switches of a navigation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Initially expanded nodes
    pub expansion: ExpansionPolicy,
    /// What a search query collects
    pub search: SearchMode,
    /// Responsive layout rules
    pub layout: Layout,
}

/// Something the host has to carry out after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load another page
    Navigate { href: String },
    /// Scroll to an anchor on the current page; empty means the top
    ScrollTo { hash: String },
    /// Call [`NavigationSession::complete_panel`] after the delay
    Schedule(Deferred),
}

/// Serializable snapshot of the navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationView<'a> {
    pub active_key: &'a str,
    pub page_name: &'a str,
    pub page_title: &'a str,
    pub selected_keys: &'a [String],
    pub expanded_keys: Vec<String>,
    pub search_text: &'a str,
    pub panel: PanelPhase,
    pub layout: LayoutMode,
    pub toc_visibility: Visibility,
    pub shows_toggle: bool,
    pub content_width: ContentWidth,
    pub prev: Option<&'a str>,
    pub next: Option<&'a str>,
}

/// Navigation state of one page view.
#[derive(Debug, Clone)]
pub struct NavigationSession<'a> {
    index: &'a ContentIndex,
    options: NavigationOptions,
    active: &'a TocNode,
    selected_keys: Vec<String>,
    expanded_keys: Vec<String>,
    initial_expanded_keys: Vec<String>,
    auto_expand_parent: bool,
    search_text: String,
    panel: PanelState,
    viewport: Viewport,
}

impl<'a> NavigationSession<'a> {
    /// Start a session at `location`.
    ///
    /// Returns `None` only when the index holds no documents.
    pub fn new(index: &'a ContentIndex, options: NavigationOptions, location: &Location) -> Option<Self> {
        let active = resolve_active(index, location)?;
        let initial = initial_expanded_keys(index.roots(), options.expansion, &active.key);

        Some(Self {
            index,
            options,
            active,
            selected_keys: vec![active.key.clone()],
            expanded_keys: initial.clone(),
            initial_expanded_keys: initial,
            auto_expand_parent: true,
            search_text: String::new(),
            panel: PanelState::new(),
            viewport: Viewport::default(),
        })
    }

    /// The node being viewed.
    pub fn active_node(&self) -> &'a TocNode {
        self.active
    }

    /// The document being viewed.
    pub fn active_document(&self) -> Option<&'a IndexedDocument> {
        self.index.document(&self.active.page_name)
    }

    /// Keys highlighted in the tree.
    pub fn selected_keys(&self) -> &[String] {
        &self.selected_keys
    }

    /// Keys explicitly expanded.
    pub fn expanded_keys(&self) -> &[String] {
        &self.expanded_keys
    }

    /// Keys expanded when the session started or last navigated.
    pub fn initial_expanded_keys(&self) -> &[String] {
        &self.initial_expanded_keys
    }

    /// Keys actually drawn open.
    ///
    /// While parent expansion is automatic, the ancestors of every expanded
    /// key are open too.
    pub fn visible_expanded_keys(&self) -> Vec<String> {
        if self.auto_expand_parent {
            with_ancestors(self.index.roots(), &self.expanded_keys)
        } else {
            self.expanded_keys.clone()
        }
    }

    /// Current (normalized) search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Filter the tree by a search query.
    ///
    /// A non-empty query expands and selects the matching keys. An empty
    /// query restores the initial expansion and selects the active node.
    pub fn search(&mut self, query: &str) {
        self.search_text = normalize_query(query);
        self.auto_expand_parent = true;

        if self.search_text.is_empty() {
            self.expanded_keys = self.initial_expanded_keys.clone();
            self.selected_keys = vec![self.active.key.clone()];
        } else {
            let keys = search_keys(self.index.roots(), &self.search_text, self.options.search);
            tracing::trace!("Search '{}' matched {} nodes", self.search_text, keys.len());
            self.expanded_keys = keys.clone();
            self.selected_keys = keys;
        }
    }

    /// Replace the expanded set after the user opened or closed a node.
    ///
    /// Parent expansion stops being automatic so a collapsed parent stays shut.
    pub fn set_expanded(&mut self, keys: Vec<String>) {
        self.auto_expand_parent = false;
        self.expanded_keys = keys;
    }

    /// Handle a click on a tree node.
    ///
    /// An open panel starts closing. A node on another page navigates there;
    /// a node on the current page becomes active and scrolls into view.
    /// Unknown keys only close the panel.
    pub fn click(&mut self, key: &str) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.panel.phase() == PanelPhase::Open {
            effects.extend(self.panel.close().map(Effect::Schedule));
        }

        let Some(node) = self.index.node(key) else {
            tracing::debug!("Click on unknown node '{}'", key);
            return effects;
        };

        if node.page_name != self.active.page_name {
            effects.push(Effect::Navigate {
                href: node.href.clone(),
            });
            return effects;
        }

        if !self.expanded_keys.iter().any(|k| k == key) {
            self.expanded_keys.push(node.key.clone());
        }
        self.selected_keys = vec![node.key.clone()];
        self.active = node;
        effects.push(Effect::ScrollTo {
            hash: node.hash.clone(),
        });
        effects
    }

    /// Follow a URL change: re-resolve the active node.
    ///
    /// Selection and search reset; the new active node's initial expansion
    /// is merged into the expanded set.
    pub fn navigate(&mut self, location: &Location) {
        let Some(active) = resolve_active(self.index, location) else {
            return;
        };

        self.active = active;
        self.selected_keys = vec![active.key.clone()];
        self.search_text.clear();
        self.auto_expand_parent = true;

        self.initial_expanded_keys =
            initial_expanded_keys(self.index.roots(), self.options.expansion, &active.key);
        for key in &self.initial_expanded_keys {
            if !self.expanded_keys.contains(key) {
                self.expanded_keys.push(key.clone());
            }
        }
    }

    /// Current panel phase.
    pub fn panel_phase(&self) -> PanelPhase {
        self.panel.phase()
    }

    /// Press the panel toggle button.
    pub fn toggle_panel(&mut self) -> Option<Effect> {
        self.panel.toggle().map(Effect::Schedule)
    }

    /// Request the panel open, even mid-animation.
    pub fn open_panel(&mut self) -> Option<Effect> {
        self.panel.open().map(Effect::Schedule)
    }

    /// Apply a scheduled panel transition.
    pub fn complete_panel(&mut self, token: PanelToken) -> bool {
        self.panel.complete(token)
    }

    /// Update the viewport size (the single place it enters the session).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Layout mode for the current viewport.
    pub fn layout_mode(&self) -> LayoutMode {
        self.options.layout.mode(self.viewport)
    }

    /// Whether the ToC is drawn, and how opaque.
    pub fn toc_visibility(&self) -> Visibility {
        self.options
            .layout
            .toc_visibility(self.viewport, self.panel.phase())
    }

    /// Snapshot of the state for rendering or inspection.
    pub fn view(&self) -> NavigationView<'_> {
        let document = self.active_document();

        NavigationView {
            active_key: &self.active.key,
            page_name: &self.active.page_name,
            page_title: document.map_or(self.active.title.as_str(), |d| d.page_title()),
            selected_keys: &self.selected_keys,
            expanded_keys: self.visible_expanded_keys(),
            search_text: &self.search_text,
            panel: self.panel.phase(),
            layout: self.layout_mode(),
            toc_visibility: self.toc_visibility(),
            shows_toggle: self.options.layout.shows_toggle(self.viewport),
            content_width: self.options.layout.content_width(self.viewport),
            prev: document.and_then(|d| d.prev_name.as_deref()),
            next: document.and_then(|d| d.next_name.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::document::ContentDocument;
    use crate::order::OrderedIndex;
    use crate::panel::Delay;
    use docnav_mdx::Heading;
    use pretty_assertions::assert_eq;

    fn index() -> ContentIndex {
        let docs = vec![
            ContentDocument::new(
                "index",
                vec![Heading::new("Welcome", "#welcome")
                    .with_children(vec![Heading::new("Quick start", "#quick-start")])],
            ),
            ContentDocument::new(
                "server",
                vec![Heading::new("Server", "#server").with_children(vec![
                    Heading::new("Ports", "#ports")
                        .with_children(vec![Heading::new("TLS", "#tls")]),
                    Heading::new("Services", "#services"),
                ])],
            ),
            ContentDocument::new("faq", vec![]),
        ];
        let order = OrderedIndex::Flat(vec![
            "index".to_string(),
            "server".to_string(),
            "faq".to_string(),
        ]);
        ContentIndex::build(docs, &order, SiteConfig::default())
    }

    fn session<'a>(index: &'a ContentIndex, url: &str) -> NavigationSession<'a> {
        NavigationSession::new(index, NavigationOptions::default(), &Location::parse(url)).unwrap()
    }

    #[test]
    fn starts_at_resolved_node() {
        let index = index();
        let session = session(&index, "/docs/server#ports");

        assert_eq!(session.active_node().key, "server#ports");
        assert_eq!(session.selected_keys(), ["server#ports"]);
        assert_eq!(
            session.expanded_keys(),
            ["index#welcome", "server#server", "server#ports"]
        );
        assert_eq!(session.active_document().unwrap().name(), "server");
    }

    #[test]
    fn active_policy_expands_path_only() {
        let index = index();
        let options = NavigationOptions {
            expansion: ExpansionPolicy::Active,
            ..Default::default()
        };

        let session = NavigationSession::new(&index, options, &Location::parse("/docs/server#tls")).unwrap();

        assert_eq!(
            session.expanded_keys(),
            ["server#server", "server#ports", "server#tls"]
        );
    }

    #[test]
    fn empty_search_restores_initial_expansion() {
        let index = index();
        let mut session = session(&index, "/docs/server");
        let initial = session.expanded_keys().to_vec();

        session.search("tls");
        assert_eq!(session.expanded_keys(), ["server#tls"]);
        assert_eq!(session.selected_keys(), ["server#tls"]);
        assert_eq!(
            session.visible_expanded_keys(),
            vec!["server#server", "server#ports", "server#tls"]
        );

        session.search("   ");
        assert_eq!(session.expanded_keys(), initial.as_slice());
        assert_eq!(session.selected_keys(), ["server#server"]);
        assert_eq!(session.search_text(), "");
    }

    #[test]
    fn search_without_match_empties_sets() {
        let index = index();
        let mut session = session(&index, "/docs");

        session.search("Nothing Here");

        assert!(session.expanded_keys().is_empty());
        assert!(session.selected_keys().is_empty());
        assert!(session.visible_expanded_keys().is_empty());
    }

    #[test]
    fn manual_expansion_disables_parent_expansion() {
        let index = index();
        let mut session = session(&index, "/docs");

        session.set_expanded(vec!["server#ports".to_string()]);

        assert_eq!(session.visible_expanded_keys(), vec!["server#ports"]);
    }

    #[test]
    fn click_on_other_page_navigates() {
        let index = index();
        let mut session = session(&index, "/docs");

        let effects = session.click("server#services");

        assert_eq!(
            effects,
            vec![Effect::Navigate {
                href: "/docs/server#services".to_string()
            }]
        );
        assert_eq!(session.active_node().key, "index#welcome");
    }

    #[test]
    fn click_on_same_page_scrolls() {
        let index = index();
        let options = NavigationOptions {
            expansion: ExpansionPolicy::Active,
            ..Default::default()
        };
        let mut session = NavigationSession::new(&index, options, &Location::parse("/docs/server")).unwrap();

        let effects = session.click("server#services");

        assert_eq!(
            effects,
            vec![Effect::ScrollTo {
                hash: "#services".to_string()
            }]
        );
        assert_eq!(session.active_node().key, "server#services");
        assert_eq!(session.selected_keys(), ["server#services"]);
        assert!(session.expanded_keys().contains(&"server#services".to_string()));

        // A second click does not duplicate the key.
        session.click("server#services");
        let count = session
            .expanded_keys()
            .iter()
            .filter(|k| *k == "server#services")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn click_on_page_node_scrolls_to_top() {
        let index = index();
        let mut session = session(&index, "/docs/faq");

        assert_eq!(
            session.click("faq"),
            vec![Effect::ScrollTo {
                hash: String::new()
            }]
        );
    }

    #[test]
    fn click_closes_open_panel() {
        let index = index();
        let mut session = session(&index, "/docs");
        session.set_viewport(Viewport::new(400));

        let Some(Effect::Schedule(opening)) = session.toggle_panel() else {
            panic!("expected a scheduled transition");
        };
        assert!(session.complete_panel(opening.token));
        assert_eq!(session.panel_phase(), PanelPhase::Open);

        let effects = session.click("index#quick-start");

        assert_eq!(effects.len(), 2);
        let Effect::Schedule(closing) = &effects[0] else {
            panic!("expected the panel to close first");
        };
        assert!(matches!(closing.delay, Delay::After(_)));
        assert_eq!(session.panel_phase(), PanelPhase::Closing);
        assert!(session.complete_panel(closing.token));
        assert!(!session.toc_visibility().displayed);
    }

    #[test]
    fn unknown_click_is_ignored() {
        let index = index();
        let mut session = session(&index, "/docs");

        assert!(session.click("missing").is_empty());
        assert_eq!(session.active_node().key, "index#welcome");
    }

    #[test]
    fn navigate_re_resolves() {
        let index = index();
        let mut session = session(&index, "/docs");
        session.search("server");

        session.navigate(&Location::parse("/docs/server/#tls"));

        assert_eq!(session.active_node().key, "server#tls");
        assert_eq!(session.selected_keys(), ["server#tls"]);
        assert_eq!(session.search_text(), "");
        assert_eq!(session.active_document().unwrap().prev_name.as_deref(), Some("index"));
    }

    #[test]
    fn reopen_during_close_stays_open() {
        let index = index();
        let mut session = session(&index, "/docs");
        session.set_viewport(Viewport::new(500));

        let Some(Effect::Schedule(opening)) = session.toggle_panel() else {
            panic!("expected opening");
        };
        session.complete_panel(opening.token);
        let Some(Effect::Schedule(closing)) = session.toggle_panel() else {
            panic!("expected closing");
        };

        assert!(session.toggle_panel().is_none());
        assert!(session.open_panel().is_none());
        assert!(!session.complete_panel(closing.token));
        assert_eq!(session.panel_phase(), PanelPhase::Open);
    }

    #[test]
    fn wide_viewport_shows_toc_inline() {
        let index = index();
        let mut session = session(&index, "/docs");

        session.set_viewport(Viewport::new(1280));
        assert_eq!(session.layout_mode(), LayoutMode::Inline);
        assert!(session.toc_visibility().displayed);
        assert!(!session.view().shows_toggle);
        assert_eq!(session.view().content_width, ContentWidth::Fixed(928));

        session.set_viewport(Viewport::new(600));
        assert_eq!(session.layout_mode(), LayoutMode::Panel);
        assert!(!session.toc_visibility().displayed);
        assert!(session.view().shows_toggle);
        assert_eq!(session.view().content_width, ContentWidth::Full);
    }

    #[test]
    fn view_snapshot() {
        let index = index();
        let session = session(&index, "/docs/server");

        let view = session.view();

        assert_eq!(view.page_title, "Server");
        assert_eq!(view.prev, Some("index"));
        assert_eq!(view.next, Some("faq"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["panel"], "closed");
        assert_eq!(json["layout"], "inline");
    }
}
