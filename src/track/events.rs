//! Lesson event listeners

use std::fmt;

/// Callback receiving `(module_id, lesson_id)`
pub type LessonListener = Box<dyn FnMut(&str, &str)>;

/// At most one listener per event kind, called synchronously
#[derive(Default)]
pub struct Listeners {
    lesson_start: Option<LessonListener>,
    lesson_complete: Option<LessonListener>,
}

impl Listeners {
    /// Register the lesson-started listener, replacing any previous one
    pub fn on_lesson_start(&mut self, listener: impl FnMut(&str, &str) + 'static) {
        self.lesson_start = Some(Box::new(listener));
    }

    /// Register the lesson-completed listener, replacing any previous one
    pub fn on_lesson_complete(&mut self, listener: impl FnMut(&str, &str) + 'static) {
        self.lesson_complete = Some(Box::new(listener));
    }

    pub(crate) fn lesson_started(&mut self, module_id: &str, lesson_id: &str) {
        if let Some(listener) = self.lesson_start.as_mut() {
            listener(module_id, lesson_id);
        }
    }

    pub(crate) fn lesson_completed(&mut self, module_id: &str, lesson_id: &str) {
        if let Some(listener) = self.lesson_complete.as_mut() {
            listener(module_id, lesson_id);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("lesson_start", &self.lesson_start.is_some())
            .field("lesson_complete", &self.lesson_complete.is_some())
            .finish()
    }
}
