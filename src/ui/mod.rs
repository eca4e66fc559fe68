//! UI rendering components

pub mod curriculum;
pub mod lesson;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{AppState, Panel};
use crate::theme::Theme;

/// Minimum width for the curriculum panel
const CURRICULUM_MIN_WIDTH: u16 = 30;

/// Height of the status line
const STATUS_LINE_HEIGHT: u16 = 1;

/// Main draw function: tree on the left, lesson on the right, status below
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_LINE_HEIGHT)])
        .split(area);

    let curriculum_width = (vertical[0].width / 3).max(CURRICULUM_MIN_WIDTH);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(curriculum_width), Constraint::Min(10)])
        .split(vertical[0]);

    let focused = state.focused_panel;
    curriculum::draw(frame, panels[0], state, theme, focused == Panel::Curriculum);
    lesson::draw(frame, panels[1], state, theme, focused == Panel::Lesson);
    status_line::draw(frame, vertical[1], &state.status, theme);
}
