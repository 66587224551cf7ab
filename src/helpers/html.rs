//! HTML helper functions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref CODE_BLOCK: Regex = Regex::new(r"(?s)<code>(.*?)</code>").unwrap();
}

/// Escape the characters that would otherwise open or close markup
///
/// `&` is left alone so content that is already escaped stays stable.
pub fn escape_code(code: &str) -> String {
    code.replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape the contents of every `<code>...</code>` section of an HTML document
pub fn escape_code_blocks(html: &str) -> String {
    CODE_BLOCK
        .replace_all(html, |caps: &Captures| {
            format!("<code>{}</code>", escape_code(&caps[1]))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_code() {
        assert_eq!(
            escape_code(r#"std::vector<int> v = {'a', "b"};"#),
            "std::vector&lt;int&gt; v = {&apos;a&apos;, &quot;b&quot;};"
        );
        assert_eq!(escape_code("a && b"), "a && b");
    }

    #[test]
    fn test_escape_code_blocks() {
        let html = "<p>keep <b>this</b></p>\n<pre><code>#include <vector>\nint main() {}\n</code></pre>\n<code>a<b</code>";
        let out = escape_code_blocks(html);
        assert!(out.contains("<p>keep <b>this</b></p>"));
        assert!(out.contains("<code>#include &lt;vector&gt;\nint main() {}\n</code>"));
        assert!(out.contains("<code>a&lt;b</code>"));
    }

    #[test]
    fn test_no_code_blocks_unchanged() {
        let html = "<p>1 < 2</p>";
        assert_eq!(escape_code_blocks(html), html);
    }
}
