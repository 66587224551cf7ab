//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the base path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/hello") // -> "/blog/posts/hello"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    format!("{}/{}", base, path)
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Site URL of a post document, given its path relative to the source directory
///
/// # Examples
/// ```ignore
/// post_url(&config, Path::new("posts/hello.md"))       // -> "/posts/hello"
/// post_url(&config, Path::new("posts/trip/index.md"))  // -> "/posts/trip/"
/// ```
pub fn post_url(config: &SiteConfig, relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(encode_segment(&s.to_string_lossy())),
            _ => None,
        })
        .collect();

    let path = if segments.last().map(String::as_str) == Some("index") {
        segments.pop();
        if segments.is_empty() {
            String::new()
        } else {
            format!("{}/", segments.join("/"))
        }
    } else if config.clean_urls {
        segments.join("/")
    } else {
        format!("{}.html", segments.join("/"))
    };

    url_for(config, &path)
}

/// Site URL of a listing page (1-based)
pub fn page_url(config: &SiteConfig, page_number: usize) -> String {
    if page_number <= 1 {
        url_for(config, "")
    } else {
        url_for(
            config,
            &format!("{}/{}/", config.pagination_dir.trim_matches('/'), page_number),
        )
    }
}

/// Site URL of a tag or category listing
pub fn term_url(config: &SiteConfig, dir: &str, slug: &str) -> String {
    url_for(config, &format!("{}/{}/", dir.trim_matches('/'), slug))
}
