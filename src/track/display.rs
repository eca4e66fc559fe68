//! Display helpers derived from course data and completion state

use crate::course::{Course, Lesson, LessonType};

use super::progress::CompletionSet;

/// Icon shown next to a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonIcon {
    Completed,
    Video,
    Document,
    Award,
    /// Document icon in the assignment accent
    AssignmentDocument,
    Generic,
}

impl LessonIcon {
    /// Terminal glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Completed => "✓",
            Self::Video => "▶",
            Self::Document | Self::AssignmentDocument => "≡",
            Self::Award => "★",
            Self::Generic => "○",
        }
    }

    /// Short label for plain-text output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "done",
            Self::Video => "video",
            Self::Document => "doc",
            Self::Award => "quiz",
            Self::AssignmentDocument => "task",
            Self::Generic => "item",
        }
    }
}

/// Pick the icon for a lesson. Completion overrides the type.
pub fn lesson_icon(lesson_type: &LessonType, completed: bool) -> LessonIcon {
    if completed {
        return LessonIcon::Completed;
    }
    match lesson_type {
        LessonType::Video => LessonIcon::Video,
        LessonType::Document => LessonIcon::Document,
        LessonType::Quiz => LessonIcon::Award,
        LessonType::Assignment => LessonIcon::AssignmentDocument,
        LessonType::Other(_) => LessonIcon::Generic,
    }
}

/// Aggregate counters for a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseStats {
    pub modules: usize,
    pub lessons: usize,
    pub completed: usize,
    pub percent: u8,
}

impl CourseStats {
    /// Recompute the counters from the course itself
    pub fn compute(course: &Course, completions: &CompletionSet) -> Self {
        Self {
            modules: course.module_count(),
            lessons: course.lesson_count(),
            completed: course.lessons().filter(|l| completions.is_complete(&l.id)).count(),
            percent: completions.course_progress(course),
        }
    }
}

/// What the lesson panel shows for the active lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonBody<'a> {
    Video(&'a str),
    Document(&'a str),
    /// Quiz panel; `has_content` is false until material is attached
    Quiz { has_content: bool },
    Assignment { has_content: bool },
    /// No content has been attached yet
    Unavailable,
}

impl<'a> LessonBody<'a> {
    pub fn for_lesson(lesson: &'a Lesson) -> Self {
        let content = lesson.content.as_deref();
        match (&lesson.lesson_type, content) {
            (LessonType::Video, Some(url)) => Self::Video(url),
            (LessonType::Document, Some(url)) => Self::Document(url),
            (LessonType::Quiz, content) => Self::Quiz { has_content: content.is_some() },
            (LessonType::Assignment, content) => {
                Self::Assignment { has_content: content.is_some() }
            }
            _ => Self::Unavailable,
        }
    }

    /// Whether the "no content yet" notice belongs under this body
    pub fn missing_content(&self) -> bool {
        matches!(
            self,
            Self::Unavailable
                | Self::Quiz { has_content: false }
                | Self::Assignment { has_content: false }
        )
    }
}

/// Text progress gauge, e.g. `[#####-----]`
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
