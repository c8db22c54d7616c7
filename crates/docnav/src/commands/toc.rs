//! Inspect the navigation state of a URL.

use anyhow::{bail, Result};
use serde::Serialize;

use docnav_static::StaticBuilder;
use docnav_toc::{
    ContentIndex, Location, NavigationOptions, NavigationSession, NavigationView, TocSection,
    Viewport,
};

use crate::config::ConfigFile;

/// Arguments of the `toc` command.
#[derive(Debug, Clone)]
pub struct TocRequest {
    pub url: String,
    pub width: Option<u32>,
    pub search: Option<String>,
    pub tree: bool,
}

#[derive(Serialize)]
struct TocReport<'a> {
    url: &'a str,
    #[serde(flatten)]
    state: NavigationView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<TocSection>>,
}

/// Run the toc command.
pub fn run(file_config: &ConfigFile, request: TocRequest) -> Result<()> {
    let config = file_config.build_config(None, None);
    let index = StaticBuilder::new(config)?.index()?;

    println!("{}", report(&index, file_config.navigation(), &request)?);

    Ok(())
}

/// Render the state of `request.url` as pretty JSON.
fn report(index: &ContentIndex, options: NavigationOptions, request: &TocRequest) -> Result<String> {
    let location = Location::parse(&request.url);
    let Some(mut session) = NavigationSession::new(index, options, &location) else {
        bail!("No indexed documents; check the ordering file");
    };

    if let Some(width) = request.width {
        session.set_viewport(Viewport::new(width));
    }
    if let Some(query) = &request.search {
        session.search(query);
    }

    tracing::debug!(
        "{} resolved to {}",
        request.url,
        session.active_node().key
    );

    let report = TocReport {
        url: &request.url,
        state: session.view(),
        sections: request.tree.then(|| index.sections()),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
