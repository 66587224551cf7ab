//! Generator module - builds the site data object handed to the rendering framework

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::{MarkdownConfig, NavItem, SearchConfig, ServerConfig, SocialLink};
use crate::content::{ArchiveYear, Page, PostIndex, PostMetadata, Taxonomy, Term};
use crate::helpers::{format_date, page_url};
use crate::Site;

/// Site-level configuration object, with the post index embedded in `themeConfig`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub base: String,
    pub clean_urls: bool,
    pub ignore_dead_links: bool,
    pub src_exclude: Vec<String>,
    pub markdown: MarkdownConfig,
    pub server: ServerConfig,
    pub theme_config: ThemeData,
}

/// Theme configuration with the listing data filled in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    pub posts: Vec<PageData>,
    pub total_posts: usize,
    pub page_size: usize,
    pub nav: Vec<NavItem>,
    pub search: SearchConfig,
    pub social_links: Vec<SocialLink>,
    pub tags: Vec<Term>,
    pub categories: Vec<Term>,
    pub archives: Vec<ArchiveYear>,
}

/// Pagination data for templates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub page_number: usize,
    pub total_pages: usize,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    pub posts: Vec<PostData>,
}

/// Post data for templates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(flatten)]
    pub meta: PostMetadata,
    pub display_date: String,
}

/// Builds [`SiteData`] for a site
pub struct Generator<'a> {
    site: &'a Site,
}

impl<'a> Generator<'a> {
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Assemble the site data object around a post index
    pub fn site_data(&self, index: &PostIndex) -> SiteData {
        let config = &self.site.config;
        let taxonomy = Taxonomy::build(self.site, index);

        SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            lang: config.lang.clone(),
            base: config.base.clone(),
            clean_urls: config.clean_urls,
            ignore_dead_links: config.ignore_dead_links,
            src_exclude: config.src_exclude.clone(),
            markdown: config.markdown.clone(),
            server: config.server.clone(),
            theme_config: ThemeData {
                posts: index.pages.iter().map(|p| self.page_data(p)).collect(),
                total_posts: index.total_posts(),
                page_size: index.page_size,
                nav: config.theme_config.nav.clone(),
                search: config.theme_config.search.clone(),
                social_links: config.theme_config.social_links.clone(),
                tags: taxonomy.tags,
                categories: taxonomy.categories,
                archives: taxonomy.archives,
            },
        }
    }

    /// Serialize the site data as pretty JSON
    pub fn to_json(&self, index: &PostIndex) -> Result<String> {
        serde_json::to_string_pretty(&self.site_data(index)).context("Failed to serialize site data")
    }

    /// Write the site data JSON to `path`, creating parent directories
    pub fn write(&self, index: &PostIndex, path: &Path) -> Result<()> {
        let json = self.to_json(index)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Wrote site data to {:?}", path);
        Ok(())
    }

    fn page_data(&self, page: &Page) -> PageData {
        let config = &self.site.config;
        PageData {
            page_number: page.page_number,
            total_pages: page.total_pages,
            path: page_url(config, page.page_number),
            prev_link: page.prev().map(|n| page_url(config, n)),
            next_link: page.next().map(|n| page_url(config, n)),
            posts: page
                .posts
                .iter()
                .map(|post| PostData {
                    meta: post.clone(),
                    display_date: format_date(
                        &post.date.with_timezone(&self.site.tz),
                        &config.date_format,
                    ),
                })
                .collect(),
        }
    }
}
