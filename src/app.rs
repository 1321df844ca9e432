//! Application state and event handling
//!
//! This is the core of stackread, managing:
//! - Tab state and navigation
//! - Event handling (keyboard input)
//! - Theme toggle wiring and feed refresh

use crate::feed::{self, FeedSource};
use crate::store::PreferenceStore;
use crate::theme::{ActiveTheme, ThemeController, TOGGLE_CONTROL};
use crate::types::{Channel, Control, Post, Tab};
use crate::ui::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Footer controls wired at startup
pub fn default_controls() -> Vec<Control> {
    vec![Control {
        id: TOGGLE_CONTROL,
        key: KeyCode::Char('t'),
        label: "t theme",
    }]
}

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_tab: Tab,
    pub channel: Channel,
    pub source: Option<FeedSource>,

    // Theme state
    store: Box<dyn PreferenceStore>,
    theme_controller: ThemeController,
    pub active_theme: ActiveTheme,
    pub palette: Palette,

    // Posts tab state
    pub posts_selected: usize,

    // Reader tab state
    pub reader_post: Option<usize>,
    pub reader_scroll: u16,

    // Footer controls
    pub controls: Vec<Control>,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

impl App {
    /// Create a new App instance
    ///
    /// Applies the saved theme (or the dark default) and wires the toggle
    /// to its footer control when one is present.
    pub fn new(
        channel: Channel,
        source: Option<FeedSource>,
        store: Box<dyn PreferenceStore>,
        controls: Vec<Control>,
    ) -> Self {
        let mut theme_controller = ThemeController::new();
        let mut active_theme = ActiveTheme::default();

        theme_controller.init(store.as_ref(), &mut active_theme);
        theme_controller.attach(&controls);

        let palette = Palette::for_attr(active_theme.get().unwrap_or("dark"));

        Self {
            should_quit: false,
            active_tab: Tab::Posts,
            channel,
            source,

            store,
            theme_controller,
            active_theme,
            palette,

            posts_selected: 0,

            reader_post: None,
            reader_scroll: 0,

            controls,

            flash_message: None,
        }
    }

    /// Read a stored preference value
    pub fn preference(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// The post currently open in the reader
    pub fn current_post(&self) -> Option<&Post> {
        self.reader_post.and_then(|idx| self.channel.posts.get(idx))
    }

    /// Clear expired flash messages; called once per event-loop iteration
    pub fn tick(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The theme toggle routes through the controller; without an
        // attached control the key falls through to normal handling
        match self
            .theme_controller
            .on_key(key.code, self.store.as_mut(), &mut self.active_theme)
        {
            Ok(false) => {}
            Ok(true) => {
                self.refresh_palette();
                let attr = self.active_theme.get().unwrap_or("dark").to_string();
                self.show_flash(&format!("Theme: {attr}"), false);
                return Ok(());
            }
            Err(err) => {
                // Attribute already flipped; keep running with the new look
                self.refresh_palette();
                self.show_flash(&format!("Failed to save theme: {err:#}"), true);
                return Ok(());
            }
        }

        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.active_tab = Tab::from_index(c as usize - '1' as usize);
            }
            KeyCode::Char('r') => {
                self.refresh();
                return Ok(());
            }
            _ => {}
        }

        // Tab-specific handling
        match self.active_tab {
            Tab::Posts => self.handle_posts_key(key),
            Tab::Reader => self.handle_reader_key(key),
            Tab::Help => Ok(()),
        }
    }

    /// Handle keys in the Posts tab
    fn handle_posts_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.channel.posts.len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.posts_selected < count.saturating_sub(1) {
                    self.posts_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.posts_selected = self.posts_selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.posts_selected = 0,
            KeyCode::Char('G') => self.posts_selected = count.saturating_sub(1),
            KeyCode::Enter => {
                if self.channel.posts.get(self.posts_selected).is_some() {
                    self.reader_post = Some(self.posts_selected);
                    self.reader_scroll = 0;
                    self.active_tab = Tab::Reader;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the Reader tab
    fn handle_reader_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.reader_scroll = self.reader_scroll.saturating_add(1).min(self.reader_max_scroll());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.reader_scroll = self.reader_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => self.reader_scroll = 0,
            KeyCode::Char('G') => self.reader_scroll = self.reader_max_scroll(),
            KeyCode::Esc | KeyCode::Backspace => self.active_tab = Tab::Posts,
            _ => {}
        }
        Ok(())
    }

    /// Upper bound for reader scrolling, from the unwrapped line count
    fn reader_max_scroll(&self) -> u16 {
        self.current_post()
            .map(|post| post.content.lines().count().min(u16::MAX as usize) as u16)
            .unwrap_or(0)
    }

    /// Re-fetch the feed, keeping the old posts on failure
    fn refresh(&mut self) {
        let Some(source) = self.source.clone() else {
            self.show_flash("No feed source to refresh", true);
            return;
        };

        match feed::fetch_feed(&source.url).and_then(|xml| feed::parse_feed(&xml)) {
            Ok(channel) => {
                self.posts_selected = self
                    .posts_selected
                    .min(channel.posts.len().saturating_sub(1));
                if let Some(idx) = self.reader_post {
                    if idx >= channel.posts.len() {
                        self.reader_post = None;
                        if self.active_tab == Tab::Reader {
                            self.active_tab = Tab::Posts;
                        }
                    }
                }
                let count = channel.posts.len();
                self.channel = channel;
                self.show_flash(&format!("Feed refreshed ({count} posts)"), false);
            }
            Err(err) => self.show_flash(&format!("Refresh failed: {err:#}"), true),
        }
    }

    fn refresh_palette(&mut self) {
        self.palette = Palette::for_attr(self.active_theme.get().unwrap_or("dark"));
    }

    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::theme::THEME_KEY;
    use crossterm::event::KeyModifiers;
    use ratatui::style::Color;

    fn sample_channel() -> Channel {
        let post = |title: &str| Post {
            title: title.into(),
            link: format!("https://example.substack.com/p/{title}"),
            author: None,
            date: None,
            content: "line one\nline two".into(),
        };
        Channel {
            title: "Example Letters".into(),
            posts: vec![post("one"), post("two"), post("three")],
        }
    }

    fn test_app() -> App {
        App::new(
            sample_channel(),
            None,
            Box::new(MemoryStore::new()),
            default_controls(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_starts_dark_without_writing_preference() {
        let app = test_app();
        assert_eq!(app.active_theme.get(), Some("dark"));
        assert_eq!(app.preference(THEME_KEY), None);
        assert_eq!(app.palette.bg, Palette::dark().bg);
    }

    #[test]
    fn test_saved_theme_applies_on_startup() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let app = App::new(sample_channel(), None, Box::new(store), default_controls());

        assert_eq!(app.active_theme.get(), Some("light"));
        assert_eq!(app.palette.bg, Palette::light().bg);
    }

    #[test]
    fn test_toggle_key_flips_and_persists() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.active_theme.get(), Some("light"));
        assert_eq!(app.preference(THEME_KEY), Some("light".to_string()));
        assert_eq!(app.palette.bg, Palette::light().bg);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.active_theme.get(), Some("dark"));
        assert_eq!(app.preference(THEME_KEY), Some("dark".to_string()));
    }

    #[test]
    fn test_toggle_key_ignored_without_control() {
        let mut app = App::new(
            sample_channel(),
            None,
            Box::new(MemoryStore::new()),
            Vec::new(),
        );

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.active_theme.get(), Some("dark"));
        assert_eq!(app.preference(THEME_KEY), None);
    }

    #[test]
    fn test_posts_navigation_stays_in_bounds() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.posts_selected, 0);

        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.posts_selected, 2);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.posts_selected, 0);

        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.posts_selected, 2);
    }

    #[test]
    fn test_enter_opens_reader_on_selected_post() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_tab, Tab::Reader);
        assert_eq!(app.current_post().map(|p| p.title.as_str()), Some("two"));
    }

    #[test]
    fn test_reader_scroll_clamps() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);

        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.reader_scroll, 2); // two content lines

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.reader_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_tab, Tab::Posts);
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Help);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab, Tab::Posts);
    }

    #[test]
    fn test_refresh_without_source_flashes_error() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('r'));
        let (message, is_error, _) = app.flash_message.clone().unwrap();
        assert!(is_error);
        assert!(message.contains("No feed source"));
    }

    #[test]
    fn test_unknown_palette_falls_back_to_dark() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        let app = App::new(sample_channel(), None, Box::new(store), default_controls());

        assert_eq!(app.active_theme.get(), Some("solarized"));
        assert_eq!(app.palette.bg, Color::Rgb(24, 24, 27));
    }
}
