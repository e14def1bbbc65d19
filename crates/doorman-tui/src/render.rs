//! Top-level rendering: dispatches to the active view and hosts the small
//! drawing helpers the views share.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::common::{Field, StatusKind, StatusMessage};
use crate::features::{home, login, signup};
use crate::state::{AppState, Screen};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the full frame for the current state.
pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.area();
    match &app.screen {
        Screen::Home(state) => home::render::render_home(frame, area, &app.tui, state),
        Screen::Login(state) => login::render::render_login(frame, area, &app.tui, state),
        Screen::SignUp(state) => signup::render::render_signup(frame, area, &app.tui, state),
    }
}

/// Centers a fixed-size panel in `area`, clamping to the available space.
pub fn centered_panel(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

pub fn render_panel_container(frame: &mut Frame, panel: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {title} "));
    frame.render_widget(block, panel);
}

/// One form row: label plus the field's display value. The focused row gets
/// the highlight color; the caret itself is the real terminal cursor.
pub fn field_line(label: &str, field: &Field, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(label.to_string(), label_style),
        Span::styled(field.display_value(), Style::default().fg(Color::White)),
    ])
}

/// Moves the terminal cursor to the caret of the focused field.
///
/// `row` is the line offset within `inner`; `label_width` is the prefix the
/// field value is drawn after.
pub fn place_field_caret(frame: &mut Frame, inner: Rect, row: u16, label_width: u16, field: &Field) {
    let x = inner
        .x
        .saturating_add(label_width)
        .saturating_add(field.caret_offset());
    let y = inner.y.saturating_add(row);
    if x < inner.x + inner.width && y < inner.y + inner.height {
        frame.set_cursor_position((x, y));
    }
}

pub fn working_line(message: &str, spinner_frame: usize) -> Line<'static> {
    let dot = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    Line::from(Span::styled(
        format!("{dot} {message}"),
        Style::default().fg(Color::Yellow),
    ))
}

pub fn status_line(status: &StatusMessage) -> Line<'static> {
    let color = match status.kind {
        StatusKind::Info => Color::White,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };
    Line::from(Span::styled(
        status.text.clone(),
        Style::default().fg(color),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_panel_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let panel = centered_panel(area, 56, 12);
        assert_eq!(panel.width, 20);
        assert_eq!(panel.height, 5);
        assert_eq!(panel.x, 0);
        assert_eq!(panel.y, 0);
    }

    #[test]
    fn centered_panel_centers_in_large_areas() {
        let area = Rect::new(0, 0, 100, 40);
        let panel = centered_panel(area, 56, 12);
        assert_eq!(panel.x, 22);
        assert_eq!(panel.y, 14);
    }
}
