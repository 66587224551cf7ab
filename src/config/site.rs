//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::theme::ThemeConfig;
use crate::error::{Error, Result};
use crate::helpers::is_valid_date_format;

/// Config file names looked up in a site directory, in order
pub const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub lang: String,

    // URL
    pub base: String,
    pub clean_urls: bool,
    pub ignore_dead_links: bool,

    // Directory
    pub source_dir: String,
    pub posts_dir: String,
    pub src_exclude: Vec<String>,
    pub tag_dir: String,
    pub category_dir: String,

    // Pagination
    pub page_size: usize,
    pub pagination_dir: String,

    // Date / Time
    pub date_format: String,
    pub timezone: String,

    // Writing
    pub metadata_errors: MetadataPolicy,

    // Passed through to the rendering framework
    pub markdown: MarkdownConfig,
    pub server: ServerConfig,
    pub theme_config: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            lang: "en-US".to_string(),

            base: "/".to_string(),
            clean_urls: true,
            ignore_dead_links: false,

            source_dir: ".".to_string(),
            posts_dir: "posts".to_string(),
            src_exclude: vec!["README.md".to_string()],
            tag_dir: "tags".to_string(),
            category_dir: "categories".to_string(),

            page_size: 10,
            pagination_dir: "page".to_string(),

            date_format: "YYYY-MM-DD".to_string(),
            timezone: "UTC".to_string(),

            metadata_errors: MetadataPolicy::default(),

            markdown: MarkdownConfig::default(),
            server: ServerConfig::default(),
            theme_config: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    ///
    /// `.toml` files are read as TOML, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;

        let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
        let config = if is_toml {
            toml::from_str(&content).map_err(|e| {
                Error::Configuration(format!("failed to parse `{}`: {}", path.display(), e))
            })?
        } else if content.trim().is_empty() {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                Error::Configuration(format!("failed to parse `{}`: {}", path.display(), e))
            })?
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Find and load the config file of a site directory, or fall back to defaults
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        match CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.is_file())
        {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file in {:?}, using defaults", base_dir);
                Ok(SiteConfig::default())
            }
        }
    }

    /// Check the values that cannot be expressed through types
    pub fn validate(&self) -> Result<()> {
        validate_page_size(self.page_size)?;

        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(Error::Configuration(format!(
                "base must start and end with `/`, got `{}`",
                self.base
            )));
        }

        self.tz()?;

        if !is_valid_date_format(&self.date_format) {
            return Err(Error::Configuration(format!(
                "invalid date_format `{}`",
                self.date_format
            )));
        }

        for pattern in &self.src_exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::Configuration(format!("invalid src_exclude pattern `{}`: {}", pattern, e))
            })?;
        }

        Ok(())
    }

    /// Timezone used for front-matter dates without an offset
    pub fn tz(&self) -> Result<Tz> {
        if self.timezone.trim().is_empty() {
            return Ok(Tz::UTC);
        }
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| Error::Configuration(format!("unknown timezone `{}`", self.timezone)))
    }
}

/// Reject page sizes that cannot hold a post
pub fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(Error::Configuration(
            "page size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// What to do with a document whose front-matter is unusable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataPolicy {
    /// Fail the build on the first bad document
    #[default]
    Abort,
    /// Log a warning and leave the document out
    Skip,
}

/// Markdown options handed to the renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub math: bool,
}

/// Dev server options handed to the framework
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}
