//! Module/lesson tree browser

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::course::Course;
use crate::theme::Theme;
use crate::track::{LearningTrack, lesson_icon};

/// Rows above the tree: counters and the progress gauge
pub const HEADER_HEIGHT: u16 = 2;

/// A row in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRow {
    /// Module header, by module index
    Module(usize),
    /// Lesson, by module and lesson index
    Lesson(usize, usize),
}

/// Rows currently shown: every module, plus lessons of expanded modules
pub fn visible_rows(course: &Course, track: &LearningTrack) -> Vec<TrackRow> {
    let mut rows = Vec::new();
    for (module_idx, module) in course.modules.iter().enumerate() {
        rows.push(TrackRow::Module(module_idx));
        if track.is_expanded(&module.id) {
            rows.extend((0..module.lessons.len()).map(|l| TrackRow::Lesson(module_idx, l)));
        }
    }
    rows
}

/// Draw the curriculum panel
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(" Course Content ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.course.modules.is_empty() {
        let msg = Paragraph::new("This course has no modules yet")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    // Counters and overall progress
    let stats = state.track.stats(&state.course);
    let summary = Line::from(vec![
        Span::styled(format!("{} modules", stats.modules), Style::default().fg(theme.fg_secondary)),
        Span::styled(" · ", Style::default().fg(theme.fg_muted)),
        Span::styled(format!("{} lessons", stats.lessons), Style::default().fg(theme.fg_secondary)),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_primary).bg(theme.gauge_empty))
        .percent(u16::from(stats.percent))
        .label(format!("Your progress {}%", stats.percent));
    frame.render_widget(gauge, chunks[1]);

    let list_area = chunks[2];
    state.curriculum.visible_height = list_area.height as usize;
    state.curriculum.ensure_selection_visible();

    let lines = tree_lines(state, theme, focused);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(state.curriculum.scroll_offset)
        .take(list_area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), list_area);
}

fn tree_lines(state: &AppState, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
    let highlight = Style::default()
        .fg(theme.bg_primary)
        .bg(theme.accent_primary)
        .add_modifier(Modifier::BOLD);

    visible_rows(&state.course, &state.track)
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let is_selected = focused && idx == state.curriculum.selected_index;
            match row {
                TrackRow::Module(m) => {
                    let module = &state.course.modules[m];
                    let expand_icon = if state.track.is_expanded(&module.id) { "▼" } else { "▶" };
                    let text = format!(
                        "{} {}. {} ({} lessons · {}%)",
                        expand_icon,
                        m + 1,
                        module.title,
                        module.lessons.len(),
                        state.track.module_progress(module)
                    );
                    let style = if is_selected {
                        highlight
                    } else {
                        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
                    };
                    Line::from(Span::styled(text, style))
                }
                TrackRow::Lesson(m, l) => {
                    let lesson = &state.course.modules[m].lessons[l];
                    let completed = state.track.is_complete(&lesson.id);
                    let icon = lesson_icon(&lesson.lesson_type, completed);

                    let mut title_style = if state.track.selection().is_current(&lesson.id) {
                        Style::default().fg(theme.accent_secondary)
                    } else {
                        Style::default().fg(theme.fg_secondary)
                    };
                    if completed {
                        title_style = title_style.fg(theme.fg_muted).add_modifier(Modifier::CROSSED_OUT);
                    }
                    if is_selected {
                        title_style = highlight;
                    }

                    let mut spans = vec![
                        Span::raw("   "),
                        Span::styled(icon.glyph(), Style::default().fg(theme.icon_color(icon))),
                        Span::raw(" "),
                        Span::styled(lesson.title.clone(), title_style),
                    ];
                    if let Some(duration) = &lesson.duration {
                        spans.push(Span::styled(
                            format!("  {}", duration),
                            Style::default().fg(theme.fg_muted),
                        ));
                    }
                    Line::from(spans)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Lesson, LessonType, Module};
    use pretty_assertions::assert_eq;

    fn create_test_course() -> Course {
        let mut course = Course::new("c", "Test Course");
        course.modules.push(
            Module::new("m1", "Getting Started", 1)
                .with_lesson(Lesson::new("l1", "Installation", LessonType::Video))
                .with_lesson(Lesson::new("l2", "Hello World", LessonType::Document)),
        );
        course.modules.push(
            Module::new("m2", "Basics", 2)
                .with_lesson(Lesson::new("l3", "Variables", LessonType::Quiz)),
        );
        course
    }

    #[test]
    fn first_module_starts_expanded() {
        let course = create_test_course();
        let track = LearningTrack::new(&course);
        assert_eq!(
            visible_rows(&course, &track),
            vec![
                TrackRow::Module(0),
                TrackRow::Lesson(0, 0),
                TrackRow::Lesson(0, 1),
                TrackRow::Module(1)
            ]
        );
    }

    #[test]
    fn collapsed_course_shows_module_headers_only() {
        let course = create_test_course();
        let mut track = LearningTrack::new(&course);
        track.toggle_module_expanded("m1");
        assert_eq!(visible_rows(&course, &track), vec![TrackRow::Module(0), TrackRow::Module(1)]);
    }

    #[test]
    fn empty_course_has_no_rows() {
        let course = Course::new("c", "Empty");
        let track = LearningTrack::new(&course);
        assert!(visible_rows(&course, &track).is_empty());
    }
}
