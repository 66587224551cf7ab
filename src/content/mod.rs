//! Content module - post metadata, loading, paging and grouping

mod excerpt;
mod frontmatter;
pub mod loader;
mod paginator;
mod post;
mod taxonomy;

pub use excerpt::{split_excerpt, MORE_MARKER};
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use paginator::{paginate, Page, PostIndex};
pub use post::PostMetadata;
pub use taxonomy::{ArchiveYear, Taxonomy, Term};
