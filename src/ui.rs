//! UI rendering for the terminal user interface.
//!
//! Banner and key legend on top, the catalog tree beside the track info
//! pane, and a progress gauge at the bottom. Everything shown is read from
//! `App`; this module owns no control semantics.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::PlaybackInfo;
use crate::catalog::OutlineRow;
use crate::config::UiSettings;
use crate::display::{BANNER, controls_help};

const HEADER_HEIGHT: u16 = 8;

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], ui_settings);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    draw_tree(frame, body[0], app);

    let info = Paragraph::new(app.display.metadata.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" track info ")
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(info, body[1]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", status_text(&app.playback))),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(app.display.percentage)
        .label(app.display.progress.as_str());
    frame.render_widget(gauge, chunks[2]);
}

fn draw_header(frame: &mut Frame, area: Rect, ui_settings: &UiSettings) {
    let controls = Paragraph::new(controls_help()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding::horizontal(1)),
    );

    if !ui_settings.show_banner {
        frame.render_widget(controls, area);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(44), Constraint::Percentage(50)])
        .split(area);
    let banner = Paragraph::new(BANNER.trim_start_matches('\n'))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, cols[0]);
    frame.render_widget(controls, cols[1]);
}

fn draw_tree(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.catalog.outline();
    let selected_row = app
        .cursor
        .position()
        .and_then(|pos| rows.iter().position(|r| r.track == Some(pos)));

    // Only build items for the visible window, kept around the selection.
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_in_window) =
        visible_window(rows.len(), height, selected_row.unwrap_or(0));

    let items: Vec<ListItem> = rows[start..end].iter().map(tree_item).collect();
    let title = if app.catalog.is_empty() {
        format!(" {} (no tracks) ", app.catalog.root_path().display())
    } else {
        format!(" {} ", app.catalog.root_path().display())
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if selected_row.is_some() {
        state.select(Some(selected_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn tree_item(row: &OutlineRow) -> ListItem<'static> {
    let indent = "  ".repeat(row.depth);
    match row.track {
        Some(_) => ListItem::new(format!("{indent}{}", row.name)),
        None => ListItem::new(
            Line::from(format!("{indent}{}/", row.name))
                .style(Style::default().add_modifier(Modifier::BOLD)),
        ),
    }
}

/// `(start, end, selected position within the window)` for a list of
/// `total` rows shown `height` at a time, centering `selected` when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

/// One-line engine state for the gauge title.
fn status_text(info: &PlaybackInfo) -> String {
    let mut parts: Vec<String> = Vec::new();

    match &info.path {
        None => parts.push("Stopped".to_string()),
        Some(path) => {
            let state = if info.is_playing() {
                "Playing"
            } else if info.finished {
                "Finished"
            } else {
                "Paused"
            };
            parts.push(state.to_string());
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                parts.push(name.to_string());
            }
        }
    }

    if info.muted {
        parts.push("Muted".to_string());
    } else {
        parts.push(format!("Vol {:.0}%", info.volume * 100.0));
    }

    if let Some(err) = &info.last_error {
        parts.push(format!("Error: {err}"));
    }

    parts.join(" • ")
}
