//! Application state definitions

use crate::course::Course;
use crate::track::LearningTrack;

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Curriculum,
    Lesson,
}

/// State for the module/lesson tree
#[derive(Debug, Clone, Default)]
pub struct CurriculumState {
    /// Currently highlighted row (flat index over visible rows)
    pub selected_index: usize,
    /// Scroll offset for long courses
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl CurriculumState {
    /// Ensure the selected row is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        let visible = self.visible_height;
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index + 1 - visible;
        }
    }

    /// Keep the cursor inside `row_count` rows
    pub fn clamp(&mut self, row_count: usize) {
        self.selected_index = self.selected_index.min(row_count.saturating_sub(1));
        self.ensure_selection_visible();
    }
}

/// Status line message
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub is_error: bool,
}

impl StatusLine {
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }
}

/// Full application state
#[derive(Debug)]
pub struct AppState {
    /// Course being viewed
    pub course: Course,

    /// Viewing session over the course
    pub track: LearningTrack,

    /// Currently focused panel
    pub focused_panel: Panel,

    /// Tree browser state
    pub curriculum: CurriculumState,

    /// Status line
    pub status: StatusLine,
}

impl AppState {
    /// Wrap a course and its session
    pub fn new(course: Course, track: LearningTrack) -> Self {
        Self {
            course,
            track,
            focused_panel: Panel::default(),
            curriculum: CurriculumState::default(),
            status: StatusLine::default(),
        }
    }
}
