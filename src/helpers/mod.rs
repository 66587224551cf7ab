//! Helper functions for building site paths, dates and HTML fragments

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
