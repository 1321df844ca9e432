//! Feed retrieval layer
//!
//! This module handles everything between user input and displayable posts:
//! - Resolving a publication name or URL into its feed URL
//! - Fetching the RSS document over HTTPS
//! - Parsing the XML into channel and posts, with HTML converted to text

pub mod fetch;
pub mod parse;
pub mod source;

pub use fetch::fetch_feed;
pub use parse::parse_feed;
pub use source::FeedSource;
