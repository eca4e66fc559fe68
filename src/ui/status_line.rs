//! Status line at the bottom of the screen

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::StatusLine;
use crate::theme::Theme;

/// Hint shown when there is no message
const KEY_HINT: &str = "j/k move · enter select · h collapse · m mark complete · q quit";

/// Draw the status line
pub fn draw(frame: &mut Frame, area: Rect, status: &StatusLine, theme: &Theme) {
    let (text, style) = match &status.message {
        Some(msg) if status.is_error => (msg.as_str(), Style::default().fg(theme.error)),
        Some(msg) => (msg.as_str(), Style::default().fg(theme.success)),
        None => (KEY_HINT, Style::default().fg(theme.fg_muted)),
    };

    let line = Line::from(Span::styled(text, style));
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg_secondary)), area);
}
