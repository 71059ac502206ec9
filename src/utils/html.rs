/// Utility functions for handling Telegram HTML formatting
///
/// Script bodies are sent with `ParseMode::Html`, so any interpolated value
/// (usernames, free text echoed back to the admin) must have the HTML
/// metacharacters escaped before it lands inside a tag.
///
/// Escapes text for insertion into an HTML-mode message body.
///
/// # Example
/// ```
/// use z1_gray_bot::utils::html::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_basic_entities() {
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(escape_html("fish & chips"), "fish &amp; chips");
    }

    #[test]
    fn test_ampersand_escaped_first() {
        // A pre-existing entity must not end up half-escaped.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_empty_and_plain_text() {
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html("123 ABC"), "123 ABC");
    }
}
