//! Responsive layout derived from the viewport width.

use serde::Serialize;

use crate::panel::{PanelPhase, Visibility};

/// Width at and above which the ToC is shown inline.
pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Maximum width of the page body.
pub const MAX_CONTENT_WIDTH: u32 = 1200;

/// Width the inline ToC takes, including its gutter.
pub const TOC_PANEL_WIDTH: u32 = 256 + 16;

/// Size of the browser viewport, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
}

impl Viewport {
    /// A viewport of the given width.
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MAX_CONTENT_WIDTH)
    }
}

/// How the ToC is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Always visible beside the content; the panel state is ignored
    Inline,
    /// Collapsible overlay driven by the panel state machine
    Panel,
}

/// Width constraint of the content column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentWidth {
    /// Fixed width in pixels
    Fixed(u32),
    /// CSS expression relative to the viewport
    Relative(String),
    /// Full width, no constraint
    Full,
}

impl ContentWidth {
    /// Value for a CSS `max-width` declaration.
    pub fn css(&self) -> String {
        match self {
            Self::Fixed(px) => format!("{}px", px),
            Self::Relative(expr) => expr.clone(),
            Self::Full => "none".to_string(),
        }
    }
}

/// Layout rules for a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width at and above which the ToC is inline
    pub breakpoint: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

impl Layout {
    /// Layout mode for a viewport.
    pub fn mode(&self, viewport: Viewport) -> LayoutMode {
        if viewport.width >= self.breakpoint {
            LayoutMode::Inline
        } else {
            LayoutMode::Panel
        }
    }

    /// ToC visibility for a viewport and panel phase.
    pub fn toc_visibility(&self, viewport: Viewport, phase: PanelPhase) -> Visibility {
        match self.mode(viewport) {
            LayoutMode::Inline => PanelPhase::Open.visibility(),
            LayoutMode::Panel => phase.visibility(),
        }
    }

    /// Whether the panel toggle button is shown.
    pub fn shows_toggle(&self, viewport: Viewport) -> bool {
        self.mode(viewport) == LayoutMode::Panel
    }

    /// Width of the content column.
    pub fn content_width(&self, viewport: Viewport) -> ContentWidth {
        match self.mode(viewport) {
            LayoutMode::Panel => ContentWidth::Full,
            LayoutMode::Inline if viewport.width >= MAX_CONTENT_WIDTH => {
                ContentWidth::Fixed(MAX_CONTENT_WIDTH - TOC_PANEL_WIDTH)
            }
            LayoutMode::Inline => {
                ContentWidth::Relative(format!("calc(100vw - {}px)", TOC_PANEL_WIDTH))
            }
        }
    }
}
