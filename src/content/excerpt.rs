//! Excerpt extraction

/// Marker separating the listing excerpt from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

/// Return the body text before the `<!-- more -->` marker, if any
pub fn split_excerpt(body: &str) -> Option<String> {
    let pos = body.find(MORE_MARKER)?;
    let excerpt = body[..pos].trim();
    if excerpt.is_empty() {
        None
    } else {
        Some(excerpt.to_string())
    }
}
