//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use docnav_static::StaticBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(file_config: &ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = file_config.build_config(output, minify);
    let result = StaticBuilder::new(config)?.build().await?;

    if result.unlisted > 0 {
        tracing::info!(
            "Built {} pages ({} not in the index) in {}ms",
            result.pages,
            result.unlisted,
            result.duration_ms
        );
    } else {
        tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
