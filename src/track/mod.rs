//! Learning-track session state
//!
//! A [`LearningTrack`] is created when a course is opened in the viewer and
//! dropped when it closes. It owns the completion set and the selection state
//! and forwards lesson events to the caller's listeners. Nothing here does
//! I/O; persisting completions is up to whoever listens.

pub mod display;
pub mod events;
pub mod navigation;
pub mod progress;

pub use display::{CourseStats, LessonBody, LessonIcon, lesson_icon, progress_bar};
pub use events::{LessonListener, Listeners};
pub use navigation::{LessonRef, SelectionState};
pub use progress::CompletionSet;

use crate::course::{Course, Lesson, Module};

/// One learner's viewing session over a course
#[derive(Debug, Default)]
pub struct LearningTrack {
    completions: CompletionSet,
    selection: SelectionState,
    listeners: Listeners,
}

impl LearningTrack {
    /// Start a fresh session: nothing completed, first module expanded
    pub fn new(course: &Course) -> Self {
        Self::with_completions(course, CompletionSet::new())
    }

    /// Start a session whose completions were loaded elsewhere
    pub fn with_completions(course: &Course, completions: CompletionSet) -> Self {
        Self { completions, selection: SelectionState::new(course), listeners: Listeners::default() }
    }

    /// Register the lesson-started listener
    pub fn on_lesson_start(&mut self, listener: impl FnMut(&str, &str) + 'static) {
        self.listeners.on_lesson_start(listener);
    }

    /// Register the lesson-completed listener
    pub fn on_lesson_complete(&mut self, listener: impl FnMut(&str, &str) + 'static) {
        self.listeners.on_lesson_complete(listener);
    }

    pub fn completions(&self) -> &CompletionSet {
        &self.completions
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Mark a lesson complete and notify the completion listener
    ///
    /// The module id comes from the caller; it is passed through to the
    /// listener untouched. Marking an already completed lesson does nothing.
    pub fn mark_complete(&mut self, module_id: &str, lesson_id: &str) {
        if self.completions.mark_complete(lesson_id) {
            tracing::debug!("Lesson {} in module {} completed", lesson_id, module_id);
            self.listeners.lesson_completed(module_id, lesson_id);
        }
    }

    /// Mark whatever lesson is currently selected as complete
    ///
    /// Returns false when the selection doesn't resolve in `course`.
    pub fn complete_current(&mut self, course: &Course) -> bool {
        if self.selection.resolve_current_lesson(course).is_none() {
            return false;
        }
        let Some(current) = self.selection.current().cloned() else {
            return false;
        };
        self.mark_complete(&current.module_id, &current.lesson_id);
        true
    }

    pub fn is_complete(&self, lesson_id: &str) -> bool {
        self.completions.is_complete(lesson_id)
    }

    pub fn module_progress(&self, module: &Module) -> u8 {
        self.completions.module_progress(module)
    }

    pub fn course_progress(&self, course: &Course) -> u8 {
        self.completions.course_progress(course)
    }

    /// Flip a module's expansion. Returns the new state.
    pub fn toggle_module_expanded(&mut self, module_id: &str) -> bool {
        self.selection.toggle_module_expanded(module_id)
    }

    pub fn is_expanded(&self, module_id: &str) -> bool {
        self.selection.is_expanded(module_id)
    }

    /// Select a lesson and notify the lesson-started listener
    pub fn select_lesson(&mut self, module_id: &str, lesson_id: &str) {
        tracing::debug!("Lesson {} in module {} started", lesson_id, module_id);
        self.selection.select_lesson(module_id, lesson_id);
        self.listeners.lesson_started(module_id, lesson_id);
    }

    pub fn resolve_current_lesson<'c>(&self, course: &'c Course) -> Option<&'c Lesson> {
        self.selection.resolve_current_lesson(course)
    }

    pub fn stats(&self, course: &Course) -> CourseStats {
        CourseStats::compute(course, &self.completions)
    }
}
