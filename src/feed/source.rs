//! Publication input resolution
//!
//! Users can hand us a bare publication name ("myblog"), a host
//! ("myblog.substack.com"), or a full URL with or without the /feed suffix.
//! All of them resolve to the canonical feed URL.

use anyhow::{bail, Context, Result};
use reqwest::Url;

/// A resolved feed location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
}

impl FeedSource {
    /// Resolve user input into a feed URL
    ///
    /// Bare names get a `.substack.com` host, missing schemes become
    /// `https`, the path is forced to end in `/feed`, and query and
    /// fragment are dropped.
    pub fn resolve(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            bail!("No publication given");
        }

        let mut text = text.to_string();
        if !text.contains("substack.com") {
            text = format!("{text}.substack.com");
        }
        if !text.starts_with("http://") && !text.starts_with("https://") {
            text = format!("https://{text}");
        }

        let mut url =
            Url::parse(&text).with_context(|| format!("Invalid publication URL: {text}"))?;

        let path = url.path().trim_end_matches('/').to_string();
        let path = if path.ends_with("/feed") {
            path
        } else {
            format!("{path}/feed")
        };

        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self { url: url.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(input: &str) -> String {
        FeedSource::resolve(input).unwrap().url
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(resolved("myblog"), "https://myblog.substack.com/feed");
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(resolved("  myblog  "), "https://myblog.substack.com/feed");
    }

    #[test]
    fn test_host_without_scheme() {
        assert_eq!(
            resolved("myblog.substack.com"),
            "https://myblog.substack.com/feed"
        );
    }

    #[test]
    fn test_full_url_keeps_scheme() {
        assert_eq!(
            resolved("http://myblog.substack.com"),
            "http://myblog.substack.com/feed"
        );
    }

    #[test]
    fn test_feed_suffix_not_duplicated() {
        assert_eq!(
            resolved("https://myblog.substack.com/feed"),
            "https://myblog.substack.com/feed"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        assert_eq!(
            resolved("https://myblog.substack.com/feed/"),
            "https://myblog.substack.com/feed"
        );
    }

    #[test]
    fn test_query_dropped() {
        assert_eq!(
            resolved("https://myblog.substack.com/?utm_source=x"),
            "https://myblog.substack.com/feed"
        );
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(FeedSource::resolve("   ").is_err());
    }
}
