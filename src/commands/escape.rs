//! Escape code sections of an exported HTML page

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::helpers::escape_code_blocks;

/// Rewrite `input` into `output` with every `<code>` section escaped
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let html =
        fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;

    fs::write(output, escape_code_blocks(&html))
        .with_context(|| format!("Failed to write {:?}", output))?;

    tracing::debug!("Escaped code sections of {:?}", input);
    Ok(())
}
