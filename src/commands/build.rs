//! Build the site data object

use anyhow::{Context, Result};
use std::path::Path;

use crate::generator::Generator;
use crate::Site;

/// Compute the post index and emit the site data JSON
///
/// Uses `page_size` when given, otherwise the configured page size. Without an
/// output path the JSON goes to stdout.
pub fn run(site: &Site, page_size: Option<usize>, output: Option<&Path>) -> Result<()> {
    let start = std::time::Instant::now();

    let page_size = page_size.unwrap_or(site.config.page_size);
    let index = site
        .get_posts(page_size)
        .with_context(|| format!("Failed to index posts in {:?}", site.posts_dir))?;

    tracing::info!(
        "Indexed {} posts into {} pages",
        index.total_posts(),
        index.total_pages()
    );

    let generator = Generator::new(site);
    match output {
        Some(path) => generator.write(&index, path)?,
        None => println!("{}", generator.to_json(&index)?),
    }

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}
