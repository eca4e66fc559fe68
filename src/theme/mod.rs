//! Theming for the learning-track viewer

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;

use crate::track::LessonIcon;

/// A color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Lesson kinds
    pub lesson_video: Color,
    pub lesson_document: Color,
    pub lesson_quiz: Color,
    pub lesson_assignment: Color,

    // Semantic colors
    pub success: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub gauge_empty: Color,
}

impl Theme {
    /// Color used for a lesson icon
    pub fn icon_color(&self, icon: LessonIcon) -> Color {
        match icon {
            LessonIcon::Completed => self.success,
            LessonIcon::Video => self.lesson_video,
            LessonIcon::Document => self.lesson_document,
            LessonIcon::Award => self.lesson_quiz,
            LessonIcon::AssignmentDocument => self.lesson_assignment,
            LessonIcon::Generic => self.fg_muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
