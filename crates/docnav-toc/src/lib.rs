//! Table-of-contents indexing and navigation state.
//!
//! [`ContentIndex`] orders documents by a curated [`OrderedIndex`], links
//! neighbours by name and builds the ToC forest. [`NavigationSession`] holds
//! the state of one page view: the active node, expanded and selected keys,
//! the search filter and the collapsible panel.

pub mod config;
pub mod document;
pub mod expansion;
pub mod indexer;
pub mod order;
pub mod panel;
pub mod resolve;
pub mod session;
pub mod tree;
pub mod viewport;

pub use config::{ExpansionPolicy, SearchMode, SiteConfig};
pub use document::{ContentDocument, IndexedDocument};
pub use indexer::{ContentIndex, TocSection, HOME_LABEL};
pub use order::{IndexError, IndexGroup, OrderedIndex};
pub use panel::{Deferred, Delay, PanelPhase, PanelState, PanelToken, Visibility, ANIMATION_DURATION};
pub use resolve::{page_name_for, resolve_active, Location};
pub use session::{Effect, NavigationOptions, NavigationSession, NavigationView};
pub use tree::TocNode;
pub use viewport::{ContentWidth, Layout, LayoutMode, Viewport};
