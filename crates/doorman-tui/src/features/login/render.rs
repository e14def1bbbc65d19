//! Login view rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::{LoginFocus, LoginState};
use crate::render::{
    centered_panel, field_line, place_field_caret, render_panel_container, status_line,
    working_line,
};
use crate::state::TuiState;

const EMAIL_LABEL: &str = "Email:    ";
const PASSWORD_LABEL: &str = "Password: ";

pub fn render_login(frame: &mut Frame, area: Rect, tui: &TuiState, state: &LoginState) {
    let panel = centered_panel(area, 56, 12);
    render_panel_container(frame, panel, "Log in");

    let inner = Rect::new(
        panel.x + 2,
        panel.y + 1,
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    );

    let email_focused = state.focus == LoginFocus::Email;
    let mut lines = vec![
        field_line(EMAIL_LABEL, &state.email, email_focused),
        Line::from(""),
        field_line(PASSWORD_LABEL, &state.password, !email_focused),
        Line::from(""),
    ];

    let signing_in = tui.tasks.sign_in.is_running();
    let sending_reset = tui.tasks.password_reset.is_running();
    if signing_in {
        lines.push(working_line("Signing in...", tui.spinner_frame));
    } else if sending_reset {
        lines.push(working_line("Sending reset email...", tui.spinner_frame));
    } else {
        lines.push(Line::styled(
            "Enter to sign in, Ctrl+R to reset password, Esc to go back",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(status) = &state.status {
        lines.push(Line::from(""));
        lines.push(status_line(status));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if !signing_in && !sending_reset {
        let (field, row) = match state.focus {
            LoginFocus::Email => (&state.email, 0),
            LoginFocus::Password => (&state.password, 2),
        };
        place_field_caret(frame, inner, row, EMAIL_LABEL.len() as u16, field);
    }
}
