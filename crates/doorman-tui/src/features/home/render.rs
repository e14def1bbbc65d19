//! Home view rendering.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::HomeState;
use crate::render::{centered_panel, render_panel_container, status_line, working_line};
use crate::state::{SessionPhase, TuiState};

pub fn render_home(frame: &mut Frame, area: Rect, tui: &TuiState, state: &HomeState) {
    let panel = centered_panel(area, 56, 12);
    render_panel_container(frame, panel, "Doorman");

    let inner = Rect::new(
        panel.x + 2,
        panel.y + 1,
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    );

    let mut lines = match &tui.session {
        SessionPhase::Loading => loading_lines(tui.spinner_frame),
        SessionPhase::Ready(Some(session)) => {
            signed_in_lines(session, tui.tasks.sign_out.is_running(), tui.spinner_frame)
        }
        SessionPhase::Ready(None) => signed_out_lines(),
    };

    if let Some(status) = &state.status {
        lines.push(Line::from(""));
        lines.push(status_line(status));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn loading_lines(spinner_frame: usize) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        working_line("Checking session...", spinner_frame),
        Line::from(""),
        Line::from(Span::styled(
            "q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn signed_in_lines(
    session: &doorman_core::Session,
    signing_out: bool,
    spinner_frame: usize,
) -> Vec<Line<'static>> {
    let email = session.user.email.as_deref().unwrap_or("(no email)");
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Signed in as {email}"),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
    ];
    if let Some(created) = session.user.created_at.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("Member since {}", format_date(created)),
            Style::default().fg(Color::White),
        )));
    }
    if !session.user.is_email_confirmed() {
        lines.push(Line::from(Span::styled(
            "Email not confirmed yet. Check your inbox.",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(""));
    if signing_out {
        lines.push(working_line("Signing out...", spinner_frame));
    } else {
        lines.push(Line::from(Span::styled(
            "o to sign out, q to quit",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn signed_out_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "You are not signed in.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "l to log in, s to sign up, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Shows the raw timestamp's date part; falls back to the full string when
/// the provider sends something unparsable.
fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::format_date;

    #[test]
    fn formats_rfc3339_timestamps_as_dates() {
        assert_eq!(format_date("2026-01-15T09:30:00Z"), "2026-01-15");
        assert_eq!(format_date("not a date"), "not a date");
    }
}
