//! Static site generator for docnav documentation.
//!
//! Builds the documentation section from MDX files, rendering each page with
//! its table of contents, previous/next links and an edit link.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
