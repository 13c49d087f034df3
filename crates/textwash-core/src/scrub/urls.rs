//! URL masking

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Literal written in place of every URL
pub const URL_TOKEN: &str = "URL";

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

/// Replace every `http://` / `https://` URL (up to the next whitespace)
/// with [`URL_TOKEN`]
pub fn mask_urls(text: &str) -> String {
    URL_PATTERN.replace_all(text, NoExpand(URL_TOKEN)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_http_and_https() {
        assert_eq!(
            mask_urls("See https://example.com/a?b=1 and http://x.org."),
            "See URL and URL"
        );
    }

    #[test]
    fn test_stops_at_whitespace() {
        assert_eq!(mask_urls("link:\nhttps://a.b/c\tnext"), "link:\nURL\tnext");
    }

    #[test]
    fn test_scheme_without_slashes_untouched() {
        assert_eq!(mask_urls("http: not a url, ftp://neither"), "http: not a url, ftp://neither");
    }

    #[test]
    fn test_no_urls_is_noop() {
        assert_eq!(mask_urls("plain text"), "plain text");
    }
}
