//! Theme selection and persistence
//!
//! The active theme is an attribute on the application's root surface; the
//! rendering palette keys off it. A saved preference is applied at startup
//! (falling back to dark), and a footer control flips and re-persists it.

use crate::store::PreferenceStore;
use crate::types::Control;
use anyhow::Result;
use crossterm::event::KeyCode;

/// Preference key the theme is stored under
pub const THEME_KEY: &str = "theme";

/// Control id the toggle is wired to
pub const TOGGLE_CONTROL: &str = "theme-toggle";

/// The two supported themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a theme attribute value; unknown values are `None`
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Anything carrying the root theme attribute
pub trait ThemeTarget {
    fn theme(&self) -> Option<&str>;
    fn set_theme(&mut self, value: &str);
}

/// The theme attribute applied to the application's root surface
///
/// Unset only before initialization; `ThemeController::init` always leaves
/// a value behind.
#[derive(Debug, Clone, Default)]
pub struct ActiveTheme {
    value: Option<String>,
}

impl ActiveTheme {
    pub fn get(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ThemeTarget for ActiveTheme {
    fn theme(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_theme(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

/// Applies the persisted theme at startup and toggles it on activation
#[derive(Debug, Default)]
pub struct ThemeController {
    toggle_key: Option<KeyCode>,
}

impl ThemeController {
    pub fn new() -> Self {
        Self { toggle_key: None }
    }

    /// Apply the saved preference, or the dark default when none is stored
    ///
    /// The default is not written back; the store stays empty until the
    /// first explicit toggle.
    pub fn init(&self, store: &dyn PreferenceStore, target: &mut dyn ThemeTarget) {
        match store.get(THEME_KEY) {
            Some(saved) => target.set_theme(&saved),
            None => target.set_theme(ThemeMode::Dark.as_str()),
        }
    }

    /// Wire the toggle to its control, when the control bar has one
    ///
    /// Without the control no handler is attached and activation keys are
    /// ignored.
    pub fn attach(&mut self, controls: &[Control]) {
        self.toggle_key = controls
            .iter()
            .find(|control| control.id == TOGGLE_CONTROL)
            .map(|control| control.key);
    }

    pub fn is_attached(&self) -> bool {
        self.toggle_key.is_some()
    }

    /// Handle a key press; returns true when the theme was toggled
    pub fn on_key(
        &self,
        key: KeyCode,
        store: &mut dyn PreferenceStore,
        target: &mut dyn ThemeTarget,
    ) -> Result<bool> {
        if self.toggle_key != Some(key) {
            return Ok(false);
        }
        self.toggle(store, target)?;
        Ok(true)
    }

    /// Flip the theme and persist the new value
    ///
    /// Dark goes to light; anything else, including an unexpected attribute
    /// value, goes to dark.
    fn toggle(&self, store: &mut dyn PreferenceStore, target: &mut dyn ThemeTarget) -> Result<()> {
        let next = match target.theme() {
            Some(current) if current == ThemeMode::Dark.as_str() => ThemeMode::Light,
            _ => ThemeMode::Dark,
        };
        target.set_theme(next.as_str());
        store.set(THEME_KEY, next.as_str())?;
        Ok(())
    }
}
