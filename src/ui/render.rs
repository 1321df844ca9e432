//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with channel title and tab bar
//! - Active tab content
//! - Status bar with hints, footer controls, and flash messages

use crate::app::App;
use crate::types::Tab;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3), // Header + tabs
        Constraint::Min(5),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    match app.active_tab {
        Tab::Posts => render_posts_tab(frame, app, layout[1]),
        Tab::Reader => render_reader_tab(frame, app, layout[1]),
        Tab::Help => render_help_tab(frame, app, layout[1]),
    }

    render_status_bar(frame, app, layout[2]);
}

/// Render header with channel title and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let header_block = Block::default()
        .style(palette.block())
        .title(format!(" stackread · {} ", app.channel.title))
        .title_style(palette.title())
        .borders(Borders::BOTTOM)
        .border_style(palette.border());

    let inner = header_block.inner(area);
    frame.render_widget(header_block, area);

    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .map(|tab| Line::from(format!(" [{}] {} ", tab.index() + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_tab.index())
        .style(palette.tab_inactive())
        .highlight_style(palette.tab_active())
        .divider("");

    frame.render_widget(tabs, inner);
}

/// Render the post list
fn render_posts_tab(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let block = Block::default()
        .style(palette.block())
        .title(" Posts ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.channel.posts.is_empty() {
        let empty = Paragraph::new("No posts found in this feed.").style(palette.text_dim());
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .channel
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let style = if i == app.posts_selected {
                palette.selected()
            } else {
                palette.text()
            };

            ListItem::new(vec![
                Line::from(Span::styled(post.title.clone(), style)),
                Line::from(Span::styled(
                    format!("  {}", post.byline()),
                    palette.text_dim(),
                )),
            ])
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// Render the reader view for the open post
fn render_reader_tab(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let block = Block::default()
        .style(palette.block())
        .title(" Reader ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(post) = app.current_post() else {
        let hint = Paragraph::new("Open a post from the Posts tab (Enter).")
            .style(palette.text_dim());
        frame.render_widget(hint, inner);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(post.title.clone(), palette.title())),
        Line::from(Span::styled(post.byline(), palette.text_dim())),
        Line::from(""),
    ];
    lines.extend(post.content.lines().map(|line| Line::from(line.to_string())));

    let body = Paragraph::new(lines)
        .style(palette.text())
        .wrap(Wrap { trim: false })
        .scroll((app.reader_scroll, 0));

    frame.render_widget(body, inner);
}

/// Render the keybinding reference
fn render_help_tab(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let block = Block::default()
        .style(palette.block())
        .title(" Help ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bindings = [
        ("1-3", "Switch tabs"),
        ("j/k", "Navigate / scroll"),
        ("g/G", "Jump to top/bottom"),
        ("Enter", "Open post"),
        ("Esc", "Back to posts"),
        ("t", "Toggle light/dark theme"),
        ("r", "Refresh feed"),
        ("q", "Quit"),
    ];

    let mut lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {key:<8}"), palette.text()),
                Span::styled(action.to_string(), palette.text_dim()),
            ])
        })
        .collect();

    // Preference info at the bottom
    let prefs_path = crate::store::TomlStore::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "Unknown".into());
    let saved = app
        .preference(crate::theme::THEME_KEY)
        .unwrap_or_else(|| "not saved yet".into());

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Preferences: {prefs_path}"),
        palette.text_dim(),
    )));
    lines.push(Line::from(Span::styled(
        format!("  Saved theme: {saved}"),
        palette.text_dim(),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the status bar: hints or flash on the left, controls on the right
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let (left, left_style) = match &app.flash_message {
        Some((message, is_error, _)) => (
            message.clone(),
            if *is_error {
                palette.error()
            } else {
                palette.success()
            },
        ),
        None => {
            let hints = match app.active_tab {
                Tab::Posts => "[j/k] Navigate  [Enter] Read  [r] Refresh  [q] Quit",
                Tab::Reader => "[j/k] Scroll  [g/G] Top/Bottom  [Esc] Back  [q] Quit",
                Tab::Help => "[1] Posts  [q] Quit",
            };
            (hints.to_string(), palette.text_dim())
        }
    };

    let attr = app.active_theme.get().unwrap_or("dark");
    let right = if app.controls.is_empty() {
        format!(" {attr} ")
    } else {
        let labels: Vec<&str> = app.controls.iter().map(|control| control.label).collect();
        format!(" [{}]: {} ", labels.join("  "), attr)
    };

    let right_len = (right.len() as u16).min(area.width);
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        y: area.y,
        width: right_len,
        height: 1,
    };

    frame.render_widget(Paragraph::new(left).style(left_style), area);
    frame.render_widget(Paragraph::new(right).style(palette.text_dim()), right_area);
}
