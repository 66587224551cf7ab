//! Sorting and paging of post listings

use serde::Serialize;

use super::PostMetadata;
use crate::config::validate_page_size;
use crate::error::Result;

/// One listing page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based position of this page
    pub page_number: usize,
    pub total_pages: usize,
    pub posts: Vec<PostMetadata>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of the previous page, if there is one
    pub fn prev(&self) -> Option<usize> {
        (self.page_number > 1).then(|| self.page_number - 1)
    }

    /// Number of the next page, if there is one
    pub fn next(&self) -> Option<usize> {
        (self.page_number < self.total_pages).then(|| self.page_number + 1)
    }
}

/// All posts of a build, newest first, split into pages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIndex {
    pub page_size: usize,
    pub pages: Vec<Page>,
}

impl PostIndex {
    /// Total number of posts over all pages
    pub fn total_posts(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by its 1-based number
    pub fn page(&self, page_number: usize) -> Option<&Page> {
        page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
    }

    /// Iterate over every post in listing order
    pub fn posts(&self) -> impl Iterator<Item = &PostMetadata> {
        self.pages.iter().flat_map(|page| page.posts.iter())
    }
}

/// Sort posts newest first (ties by url) and split them into pages of `page_size`
///
/// No posts produce an index without pages.
pub fn paginate(mut posts: Vec<PostMetadata>, page_size: usize) -> Result<PostIndex> {
    validate_page_size(page_size)?;

    posts.sort_by(PostMetadata::recency_cmp);

    let total_pages = posts.len().div_ceil(page_size);
    let mut pages = Vec::with_capacity(total_pages);
    let mut rest = posts;

    while !rest.is_empty() {
        let tail = rest.split_off(page_size.min(rest.len()));
        pages.push(Page {
            page_number: pages.len() + 1,
            total_pages,
            posts: rest,
        });
        rest = tail;
    }

    Ok(PostIndex { page_size, pages })
}
