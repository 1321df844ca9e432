//! Rendering palettes for stackread
//!
//! Two palettes, dark and light, selected by the root theme attribute.
//! Each palette defines colors for all UI elements.

use crate::theme::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Complete palette with all required colors
#[derive(Debug, Clone)]
pub struct Palette {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent color
    pub accent: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Feedback colors
    pub success: Color,
    pub error: Color,
}

impl Palette {
    /// Select the palette for a root theme attribute value
    ///
    /// Unknown values render with the dark palette.
    pub fn for_attr(attr: &str) -> Self {
        match ThemeMode::from_attr(attr).unwrap_or_default() {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Dark palette (default)
    pub fn dark() -> Self {
        Self {
            // Base
            bg: Color::Rgb(24, 24, 27),           // #18181b
            fg: Color::Rgb(228, 228, 231),        // #e4e4e7
            fg_dim: Color::Rgb(139, 139, 148),    // #8b8b94

            // Accent (Substack orange)
            accent: Color::Rgb(255, 103, 25),     // #ff6719

            // UI elements
            border: Color::Rgb(63, 63, 70),       // #3f3f46
            border_focused: Color::Rgb(161, 161, 170), // #a1a1aa
            selection_bg: Color::Rgb(63, 63, 70), // #3f3f46
            selection_fg: Color::Rgb(250, 250, 250), // #fafafa

            // Feedback
            success: Color::Rgb(134, 188, 111),   // #86bc6f
            error: Color::Rgb(232, 93, 85),       // #e85d55
        }
    }

    /// Light palette
    pub fn light() -> Self {
        Self {
            // Base
            bg: Color::Rgb(250, 250, 248),        // #fafaf8
            fg: Color::Rgb(39, 39, 42),           // #27272a
            fg_dim: Color::Rgb(120, 120, 128),    // #787880

            // Accent (Substack orange)
            accent: Color::Rgb(214, 81, 10),      // #d6510a

            // UI elements
            border: Color::Rgb(212, 212, 216),    // #d4d4d8
            border_focused: Color::Rgb(113, 113, 122), // #71717a
            selection_bg: Color::Rgb(228, 228, 231), // #e4e4e7
            selection_fg: Color::Rgb(24, 24, 27), // #18181b

            // Feedback
            success: Color::Rgb(58, 125, 68),     // #3a7d44
            error: Color::Rgb(179, 38, 30),       // #b3261e
        }
    }

    // Style helpers for common UI patterns

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Block background style
    pub fn block(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_for_attr() {
        let dark = Palette::for_attr("dark");
        assert_eq!(dark.bg, Color::Rgb(24, 24, 27));

        let light = Palette::for_attr("light");
        assert_eq!(light.bg, Color::Rgb(250, 250, 248));
    }

    #[test]
    fn test_unknown_attr_renders_dark() {
        let palette = Palette::for_attr("solarized");
        assert_eq!(palette.bg, Palette::dark().bg);
    }
}
