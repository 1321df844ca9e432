//! Core data types for stackread
//!
//! This module defines all shared data structures used throughout the application.

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// A parsed feed: channel title plus its posts, in served order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    pub posts: Vec<Post>,
}

/// A single post from a publication's feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub link: String,
    pub author: Option<String>,
    pub date: Option<DateTime<Local>>,
    pub content: String,
}

impl Post {
    /// Format the publication date for display
    pub fn formatted_date(&self) -> String {
        match &self.date {
            Some(date) => date.format("%d.%m.%y %H:%M").to_string(),
            None => String::from("unknown date"),
        }
    }

    /// Byline shown under the post title
    pub fn byline(&self) -> String {
        match &self.author {
            Some(author) => format!("{} · {}", author, self.formatted_date()),
            None => self.formatted_date(),
        }
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Posts,
    Reader,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Posts, Tab::Reader, Tab::Help]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Posts => 0,
            Tab::Reader => 1,
            Tab::Help => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Posts,
            1 => Tab::Reader,
            2 => Tab::Help,
            _ => Tab::Posts,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Posts => "Posts",
            Tab::Reader => "Reader",
            Tab::Help => "Help",
        }
    }
}

/// A key-activated control listed in the footer control bar
///
/// Controls carry a fixed string id so behavior can be wired to them without
/// hardcoding their presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub id: &'static str,
    pub key: KeyCode,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formatted_date() {
        let post = Post {
            title: "Hello".into(),
            link: "https://example.substack.com/p/hello".into(),
            author: Some("Jo".into()),
            date: Local.with_ymd_and_hms(2024, 5, 3, 14, 30, 0).single(),
            content: "Body".into(),
        };
        assert_eq!(post.formatted_date(), "03.05.24 14:30");
        assert_eq!(post.byline(), "Jo · 03.05.24 14:30");
    }

    #[test]
    fn test_missing_date() {
        let post = Post {
            title: "Hello".into(),
            link: String::new(),
            author: None,
            date: None,
            content: String::new(),
        };
        assert_eq!(post.formatted_date(), "unknown date");
        assert_eq!(post.byline(), "unknown date");
    }

    #[test]
    fn test_tab_round_trip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), *tab);
        }
        assert_eq!(Tab::from_index(99), Tab::Posts);
    }
}
