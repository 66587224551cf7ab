//! Configuration module

mod site;
mod theme;

pub use site::validate_page_size;
pub use site::MarkdownConfig;
pub use site::MetadataPolicy;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILES;
pub use theme::{NavItem, SearchConfig, SearchProvider, SocialIcon, SocialLink, ThemeConfig};
