//! Active lesson panel

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::theme::Theme;
use crate::track::{LessonBody, lesson_icon};

const NO_CONTENT: &str = "No content available for this lesson yet.";

/// Draw the lesson panel for whatever lesson currently resolves
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(" Lesson ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let Some(lesson) = state.track.resolve_current_lesson(&state.course) else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a Lesson to Start",
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Choose a lesson from the course content to begin learning",
                Style::default().fg(theme.fg_muted),
            )),
        ];
        let empty = Paragraph::new(lines).block(block).alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let completed = state.track.is_complete(&lesson.id);
    let icon = lesson_icon(&lesson.lesson_type, completed);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(icon.glyph(), Style::default().fg(theme.icon_color(icon))),
            Span::raw(" "),
            Span::styled(lesson.lesson_type.to_string(), Style::default().fg(theme.fg_muted)),
        ]),
        Line::from(Span::styled(
            lesson.title.clone(),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(duration) = &lesson.duration {
        lines.push(Line::from(Span::styled(
            format!("⏱ {}", duration),
            Style::default().fg(theme.fg_muted),
        )));
    }
    lines.push(Line::from(""));

    let body = LessonBody::for_lesson(lesson);
    let mut text: Vec<(String, Style)> = match &body {
        LessonBody::Video(url) => vec![
            ("Video".to_string(), Style::default().fg(theme.lesson_video)),
            (url.to_string(), Style::default().fg(theme.fg_primary)),
        ],
        LessonBody::Document(url) => vec![
            ("Document Resource".to_string(), Style::default().fg(theme.lesson_document)),
            (format!("Open: {}", url), Style::default().fg(theme.fg_primary)),
        ],
        LessonBody::Quiz { .. } => vec![
            ("Quiz Time!".to_string(), Style::default().fg(theme.lesson_quiz)),
            ("Test your knowledge with this quiz".to_string(), Style::default().fg(theme.fg_primary)),
        ],
        LessonBody::Assignment { .. } => vec![
            ("Assignment".to_string(), Style::default().fg(theme.lesson_assignment)),
            ("Complete this assignment to proceed".to_string(), Style::default().fg(theme.fg_primary)),
        ],
        LessonBody::Unavailable => Vec::new(),
    };
    if body.missing_content() {
        text.push((NO_CONTENT.to_string(), Style::default().fg(theme.fg_muted)));
    }
    lines.extend(text.into_iter().map(|(text, style)| Line::from(Span::styled(text, style))));
    lines.push(Line::from(""));

    let footer = if completed {
        Span::styled("✓ Completed", Style::default().fg(theme.success))
    } else {
        Span::styled("Press m to mark complete", Style::default().fg(theme.fg_muted))
    };
    lines.push(Line::from(footer));

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}
