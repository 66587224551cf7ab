//! Content loader - reads post metadata from the posts directory

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::{split_excerpt, FrontMatter, PostMetadata};
use crate::config::MetadataPolicy;
use crate::error::{Error, Result};
use crate::helpers::post_url;
use crate::Site;

/// Loads post metadata from the posts directory of a site
pub struct PostLoader<'a> {
    site: &'a Site,
    excludes: Vec<glob::Pattern>,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(site: &'a Site) -> Result<Self> {
        let excludes = site
            .config
            .src_exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    Error::Configuration(format!("invalid src_exclude pattern `{}`: {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { site, excludes })
    }

    /// Load the metadata of every post, in traversal order
    pub fn load_posts(&self) -> Result<Vec<PostMetadata>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.is_dir() {
            return Err(Error::SourceNotFound(posts_dir.clone()));
        }

        let policy = self.site.config.metadata_errors;
        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_entry(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| posts_dir.clone());
                Error::Io(path, e.into())
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }
            if self.is_excluded(path) {
                tracing::debug!("Excluded {:?}", path);
                continue;
            }

            let post = match self.load_post(path) {
                Ok(Some(post)) => post,
                Ok(None) => {
                    tracing::debug!("Skipping draft {:?}", path);
                    continue;
                }
                Err(err @ Error::Metadata { .. }) if policy == MetadataPolicy::Skip => {
                    tracing::warn!("Skipping post: {}", err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(first) = seen.get(&post.url) {
                let reason = format!(
                    "duplicate url `{}` (already used by `{}`)",
                    post.url,
                    first.display()
                );
                return Err(Error::metadata(path, reason));
            }
            seen.insert(post.url.clone(), path.to_path_buf());

            tracing::debug!("Loaded {} -> {}", post.source, post.url);
            posts.push(post);
        }

        tracing::info!("Loaded {} posts from {:?}", posts.len(), posts_dir);
        Ok(posts)
    }

    /// Load a single post from a file; drafts yield `None`
    fn load_post(&self, path: &Path) -> Result<Option<PostMetadata>> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::metadata(path, "document is not valid UTF-8"),
            _ => Error::Io(path.to_path_buf(), e),
        })?;
        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| Error::metadata(path, e.to_string()))?;

        if fm.draft {
            return Ok(None);
        }

        let title = fm.title.trim();
        if title.is_empty() {
            return Err(Error::metadata(path, "title is empty"));
        }

        let date = fm
            .parse_date(self.site.tz)
            .ok_or_else(|| Error::metadata(path, format!("unparsable date `{}`", fm.date)))?;

        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let url = post_url(&self.site.config, relative);

        let excerpt = fm
            .excerpt
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .or_else(|| split_excerpt(body));

        let tags = fm
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let category = fm
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut post = PostMetadata::new(title, date, url);
        post.excerpt = excerpt;
        post.tags = tags;
        post.category = category;
        post.source = relative.to_string_lossy().replace('\\', "/");
        post.extra = fm.extra;

        Ok(Some(post))
    }

    /// Check a document against the `src_exclude` patterns
    ///
    /// A pattern matches the path relative to the source directory or the bare file name.
    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.excludes
            .iter()
            .any(|p| p.matches_path(relative) || p.matches(&file_name))
    }
}

/// Hidden entries and dependency folders are never content
fn is_ignored_entry(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn write_post(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: {date}\n---\n\nBody of {title}.\n")
    }

    fn site_with(config: SiteConfig) -> (TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        let site = Site::with_config(dir.path(), config).unwrap();
        (dir, site)
    }

    #[test]
    fn test_load_posts() {
        let (dir, site) = site_with(SiteConfig::default());
        write_post(
            dir.path(),
            "posts/hello.md",
            "---\ntitle: Hello\ndate: 2024-01-15\ntags: [rust, ' ', ros]\ncategory: Notes\n---\nFirst part\n<!-- more -->\nRest\n",
        );
        write_post(dir.path(), "posts/2023/trip/index.md", &post("Trip", "2023-06-01"));
        write_post(dir.path(), "posts/notes.txt", "not markdown");

        let posts = PostLoader::new(&site).unwrap().load_posts().unwrap();
        assert_eq!(posts.len(), 2);

        let trip = &posts[0];
        assert_eq!(trip.title, "Trip");
        assert_eq!(trip.url, "/posts/2023/trip/");
        assert_eq!(trip.source, "posts/2023/trip/index.md");

        let hello = &posts[1];
        assert_eq!(hello.url, "/posts/hello");
        assert_eq!(hello.date, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(hello.excerpt.as_deref(), Some("First part"));
        assert_eq!(
            hello.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ros", "rust"]
        );
        assert_eq!(hello.category.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default()).unwrap();
        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        match err {
            Error::SourceNotFound(path) => assert!(path.ends_with("posts")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_date_names_document() {
        let (dir, site) = site_with(SiteConfig::default());
        write_post(dir.path(), "posts/good.md", &post("Good", "2024-01-01"));
        write_post(dir.path(), "posts/undated.md", "---\ntitle: Undated\n---\nBody\n");

        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        match err {
            Error::Metadata { path, reason } => {
                assert!(path.ends_with("posts/undated.md"));
                assert!(reason.contains("date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_date_and_blank_title() {
        let (dir, site) = site_with(SiteConfig::default());
        write_post(dir.path(), "posts/bad.md", &post("Bad", "someday"));
        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        assert!(matches!(&err, Error::Metadata { reason, .. } if reason.contains("someday")));

        let (dir, site) = site_with(SiteConfig::default());
        write_post(dir.path(), "posts/blank.md", &post("\"  \"", "2024-01-01"));
        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        assert!(matches!(&err, Error::Metadata { reason, .. } if reason.contains("title")));
    }

    #[test]
    fn test_skip_policy_leaves_bad_documents_out() {
        let (dir, site) = site_with(SiteConfig {
            metadata_errors: MetadataPolicy::Skip,
            ..Default::default()
        });
        write_post(dir.path(), "posts/good.md", &post("Good", "2024-01-01"));
        write_post(dir.path(), "posts/plain.md", "# no front-matter\n");
        write_post(dir.path(), "posts/undated.md", "---\ntitle: Undated\n---\n");

        let posts = PostLoader::new(&site).unwrap().load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_duplicate_url_is_metadata_error() {
        let (dir, site) = site_with(SiteConfig {
            metadata_errors: MetadataPolicy::Skip,
            ..Default::default()
        });
        write_post(dir.path(), "posts/same.markdown", &post("One", "2024-01-01"));
        write_post(dir.path(), "posts/same.md", &post("Two", "2024-01-02"));

        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        match err {
            Error::Metadata { path, reason } => {
                assert!(path.ends_with("posts/same.md"));
                assert!(reason.contains("duplicate url `/posts/same`"));
                assert!(reason.contains("same.markdown"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_excluded_hidden_and_draft_documents() {
        let (dir, site) = site_with(SiteConfig {
            src_exclude: vec!["README.md".to_string(), "posts/wip/*".to_string()],
            ..Default::default()
        });
        write_post(dir.path(), "posts/kept.md", &post("Kept", "2024-01-01"));
        write_post(dir.path(), "posts/README.md", "# About these posts\n");
        write_post(dir.path(), "posts/wip/soon.md", &post("Soon", "2024-02-01"));
        write_post(dir.path(), "posts/.trash/old.md", "broken");
        write_post(dir.path(), "posts/node_modules/pkg/README.markdown", "broken");
        write_post(
            dir.path(),
            "posts/draft.md",
            "---\ntitle: Draft\ndate: 2024-03-01\ndraft: true\n---\n",
        );

        let posts = PostLoader::new(&site).unwrap().load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept"]);
    }

    #[test]
    fn test_invalid_utf8_is_metadata_error() {
        let (dir, site) = site_with(SiteConfig::default());
        write_post(dir.path(), "posts/good.md", &post("Good", "2024-01-01"));
        fs::write(
            dir.path().join("posts/latin1.md"),
            b"---\ntitle: Caf\xe9\ndate: 2024-01-02\n---\n\xff\xfe\n",
        )
        .unwrap();

        let err = PostLoader::new(&site).unwrap().load_posts().unwrap_err();
        match err {
            Error::Metadata { path, reason } => {
                assert!(path.ends_with("posts/latin1.md"));
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let (dir, site) = site_with(SiteConfig {
            metadata_errors: MetadataPolicy::Skip,
            ..Default::default()
        });
        write_post(dir.path(), "posts/good.md", &post("Good", "2024-01-01"));
        fs::write(dir.path().join("posts/latin1.md"), b"\xff\xfe\x00").unwrap();

        let posts = PostLoader::new(&site).unwrap().load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Good"]);
    }

    #[test]
    fn test_date_in_skipped_hour_loads() {
        let (dir, site) = site_with(SiteConfig {
            timezone: "America/New_York".to_string(),
            ..Default::default()
        });
        write_post(dir.path(), "posts/dst.md", &post("DST", "2024-03-10 02:30:00"));

        let posts = PostLoader::new(&site).unwrap().load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].date,
            Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap()
        );
    }
}
