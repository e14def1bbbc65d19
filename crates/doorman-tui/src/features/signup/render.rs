//! Sign-up view rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::{SignUpFocus, SignUpState};
use crate::render::{
    centered_panel, field_line, place_field_caret, render_panel_container, status_line,
    working_line,
};
use crate::state::TuiState;

const EMAIL_LABEL: &str = "Email:     ";
const PASSWORD_LABEL: &str = "Password:  ";
const CONFIRM_LABEL: &str = "Confirm:   ";

pub fn render_signup(frame: &mut Frame, area: Rect, tui: &TuiState, state: &SignUpState) {
    let panel = centered_panel(area, 56, 14);
    render_panel_container(frame, panel, "Sign up");

    let inner = Rect::new(
        panel.x + 2,
        panel.y + 1,
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    );

    let mut lines = vec![
        field_line(EMAIL_LABEL, &state.email, state.focus == SignUpFocus::Email),
        Line::from(""),
        field_line(
            PASSWORD_LABEL,
            &state.password,
            state.focus == SignUpFocus::Password,
        ),
        Line::from(""),
        field_line(
            CONFIRM_LABEL,
            &state.confirm,
            state.focus == SignUpFocus::Confirm,
        ),
        Line::from(""),
    ];

    let signing_up = tui.tasks.sign_up.is_running();
    if signing_up {
        lines.push(working_line("Creating account...", tui.spinner_frame));
    } else {
        lines.push(Line::styled(
            "Enter to create account, Esc to go back",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(status) = &state.status {
        lines.push(Line::from(""));
        lines.push(status_line(status));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if !signing_up {
        let (field, row) = match state.focus {
            SignUpFocus::Email => (&state.email, 0),
            SignUpFocus::Password => (&state.password, 2),
            SignUpFocus::Confirm => (&state.confirm, 4),
        };
        place_field_caret(frame, inner, row, EMAIL_LABEL.len() as u16, field);
    }
}
