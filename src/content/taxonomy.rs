//! Tag, category and archive groupings of the post index

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use super::PostIndex;
use crate::helpers::term_url;
use crate::Site;

/// A tag or category with the posts filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub count: usize,
    /// Post urls, in listing order
    pub posts: Vec<String>,
}

/// Posts published in one calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveYear {
    pub year: i32,
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub tags: Vec<Term>,
    pub categories: Vec<Term>,
    pub archives: Vec<ArchiveYear>,
}

impl Taxonomy {
    /// Group the posts of an index by tag, category and year
    ///
    /// Names that slugify alike (`C++` and `C`) share one term, named after the
    /// first spelling met in listing order.
    pub fn build(site: &Site, index: &PostIndex) -> Self {
        let mut tags = TermGroups::default();
        let mut categories = TermGroups::default();
        let mut archives: BTreeMap<i32, Vec<String>> = BTreeMap::new();

        for post in index.posts() {
            for tag in &post.tags {
                tags.add("Tags", tag, &post.url);
            }
            if let Some(category) = &post.category {
                categories.add("Categories", category, &post.url);
            }
            let year = post.date.with_timezone(&site.tz).year();
            archives.entry(year).or_default().push(post.url.clone());
        }

        let config = &site.config;
        Self {
            tags: tags.into_terms(|slug| term_url(config, &config.tag_dir, slug)),
            categories: categories
                .into_terms(|slug| term_url(config, &config.category_dir, slug)),
            archives: archives
                .into_iter()
                .rev()
                .map(|(year, posts)| ArchiveYear { year, posts })
                .collect(),
        }
    }
}

/// Post urls keyed by slug, with the name the slug was first seen under
#[derive(Default)]
struct TermGroups<'a> {
    groups: BTreeMap<String, (&'a str, Vec<String>)>,
}

impl<'a> TermGroups<'a> {
    fn add(&mut self, kind: &str, name: &'a str, url: &str) {
        let slug = slug::slugify(name);
        let (first, posts) = self.groups.entry(slug.clone()).or_insert_with(|| (name, Vec::new()));
        if *first != name {
            tracing::warn!(
                "{} `{}` and `{}` share the slug `{}`, merged",
                kind,
                first,
                name,
                slug
            );
        }
        if posts.last().map(String::as_str) != Some(url) {
            posts.push(url.to_string());
        }
    }

    fn into_terms(self, path_for: impl Fn(&str) -> String) -> Vec<Term> {
        self.groups
            .into_iter()
            .map(|(slug, (name, posts))| Term {
                name: name.to_string(),
                path: path_for(&slug),
                slug,
                count: posts.len(),
                posts,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{paginate, PostMetadata};
    use chrono::{TimeZone, Utc};

    fn post(
        url: &str,
        y: i32,
        m: u32,
        d: u32,
        tags: &[&str],
        category: Option<&str>,
    ) -> PostMetadata {
        let date = Utc.with_ymd_and_hms(y, m, d, 20, 0, 0).unwrap();
        let mut post = PostMetadata::new(url, date, url);
        post.tags = tags.iter().map(|t| t.to_string()).collect();
        post.category = category.map(str::to_string);
        post
    }

    #[test]
    fn test_build_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default()).unwrap();
        let index = paginate(
            vec![
                post("/a", 2023, 5, 1, &["Rust", "ROS"], Some("Robotics")),
                post("/b", 2024, 2, 1, &["Rust"], None),
                post("/c", 2024, 3, 1, &[], Some("Robotics")),
            ],
            2,
        )
        .unwrap();

        let taxonomy = Taxonomy::build(&site, &index);

        let names: Vec<_> = taxonomy.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ROS", "Rust"]);
        let rust = &taxonomy.tags[1];
        assert_eq!(rust.slug, "rust");
        assert_eq!(rust.path, "/tags/rust/");
        assert_eq!(rust.count, 2);
        assert_eq!(rust.posts, vec!["/b", "/a"]);

        assert_eq!(taxonomy.categories.len(), 1);
        assert_eq!(taxonomy.categories[0].path, "/categories/robotics/");
        assert_eq!(taxonomy.categories[0].posts, vec!["/c", "/a"]);

        let years: Vec<_> = taxonomy.archives.iter().map(|a| a.year).collect();
        assert_eq!(years, vec![2024, 2023]);
        assert_eq!(taxonomy.archives[0].posts, vec!["/c", "/b"]);
    }

    #[test]
    fn test_archive_year_follows_site_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            timezone: "Asia/Shanghai".to_string(),
            ..Default::default()
        };
        let site = Site::with_config(dir.path(), config).unwrap();
        // 2023-12-31 20:00 UTC is already 2024 in Shanghai
        let index = paginate(vec![post("/nye", 2023, 12, 31, &[], None)], 10).unwrap();

        let taxonomy = Taxonomy::build(&site, &index);
        assert_eq!(taxonomy.archives[0].year, 2024);
    }

    #[test]
    fn test_terms_sharing_a_slug_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default()).unwrap();
        let index = paginate(
            vec![
                post("/templates", 2024, 2, 1, &["C++"], None),
                post("/pointers", 2023, 6, 1, &["C"], None),
                post("/both", 2022, 1, 1, &["C", "C++"], None),
            ],
            10,
        )
        .unwrap();

        let taxonomy = Taxonomy::build(&site, &index);
        assert_eq!(taxonomy.tags.len(), 1);
        let c = &taxonomy.tags[0];
        assert_eq!(c.name, "C++");
        assert_eq!(c.slug, "c");
        assert_eq!(c.path, "/tags/c/");
        assert_eq!(c.count, 3);
        assert_eq!(c.posts, vec!["/templates", "/pointers", "/both"]);

        let paths: std::collections::HashSet<_> =
            taxonomy.tags.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths.len(), taxonomy.tags.len());
    }
}
