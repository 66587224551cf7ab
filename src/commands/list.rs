//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::Taxonomy;
use crate::helpers::{format_date, page_url};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    print!("{}", render(site, content_type)?);
    Ok(())
}

/// Render the listing for a content type
pub fn render(site: &Site, content_type: &str) -> Result<String> {
    let index = site.get_posts(site.config.page_size)?;
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", index.total_posts())?;
            for post in index.posts() {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    format_date(&post.date.with_timezone(&site.tz), &site.config.date_format),
                    post.title,
                    post.source
                )?;
            }
        }
        "page" | "pages" => {
            writeln!(
                out,
                "Pages ({}, {} posts per page):",
                index.total_pages(),
                index.page_size
            )?;
            for page in &index.pages {
                writeln!(
                    out,
                    "  {} - {} posts [{}]",
                    page.page_number,
                    page.len(),
                    page_url(&site.config, page.page_number)
                )?;
            }
        }
        "tag" | "tags" => {
            let taxonomy = Taxonomy::build(site, &index);
            writeln!(out, "Tags ({}):", taxonomy.tags.len())?;
            write_terms(&mut out, taxonomy.tags.iter().map(|t| (&t.name, t.count)))?;
        }
        "category" | "categories" => {
            let taxonomy = Taxonomy::build(site, &index);
            writeln!(out, "Categories ({}):", taxonomy.categories.len())?;
            write_terms(
                &mut out,
                taxonomy.categories.iter().map(|t| (&t.name, t.count)),
            )?;
        }
        "archive" | "archives" => {
            let taxonomy = Taxonomy::build(site, &index);
            writeln!(out, "Archives ({}):", taxonomy.archives.len())?;
            for year in &taxonomy.archives {
                writeln!(out, "  {} ({})", year.year, year.posts.len())?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, category, archive",
                content_type
            );
        }
    }

    if index.is_empty() {
        tracing::debug!("No posts found in {:?}", site.posts_dir);
    }

    Ok(out)
}

/// Terms sorted by post count, most used first
fn write_terms<'a>(
    out: &mut String,
    terms: impl Iterator<Item = (&'a String, usize)>,
) -> std::fmt::Result {
    let mut terms: Vec<_> = terms.collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in terms {
        writeln!(out, "  {} ({})", name, count)?;
    }
    Ok(())
}
