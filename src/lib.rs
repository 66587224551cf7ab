//! folio: post index and site configuration builder for a personal blog/portfolio
//!
//! The crate reads the front-matter of every post under the site's posts
//! directory, sorts the posts newest first and splits them into listing
//! pages. The resulting [`content::PostIndex`] is embedded, together with the
//! navigation, search and social-link settings, into the site data object
//! handed to the rendering framework.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;

pub use error::{Error, Result};

use chrono_tz::Tz;
use std::path::{Component, Path, PathBuf};

use content::loader::PostLoader;
use content::PostIndex;

/// A site directory together with its validated configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Posts directory (the content source scanned for posts)
    pub posts_dir: PathBuf,
    /// Timezone for front-matter dates without an offset
    pub tz: Tz,
}

impl Site {
    /// Open a site directory, loading its config file if there is one
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config = config::SiteConfig::discover(base_dir.as_ref())?;
        Self::with_config(base_dir, config)
    }

    /// Open a site directory with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        config.validate()?;

        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = join_relative(&base_dir, &config.source_dir);
        let posts_dir = join_relative(&source_dir, &config.posts_dir);
        let tz = config.tz()?;

        Ok(Self {
            config,
            base_dir,
            source_dir,
            posts_dir,
            tz,
        })
    }

    /// Build the post index with `page_size` posts per page
    ///
    /// Reads the posts directory and nothing else. Fails with
    /// [`Error::Configuration`] when `page_size` is 0, [`Error::SourceNotFound`]
    /// when the posts directory is missing and [`Error::Metadata`] for a
    /// document with unusable front-matter.
    pub fn get_posts(&self, page_size: usize) -> Result<PostIndex> {
        config::validate_page_size(page_size)?;
        let posts = PostLoader::new(self)?.load_posts()?;
        content::paginate(posts, page_size)
    }
}

/// Join a configured directory onto `base`, dropping `.` components
fn join_relative(base: &Path, dir: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(dir.trim()).components() {
        if component != Component::CurDir {
            path.push(component);
        }
    }
    path
}
