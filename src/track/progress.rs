//! Lesson completion tracking for a viewing session

use std::collections::HashSet;

use crate::course::{Course, Module};

/// Set of lesson ids the learner has completed in this session
///
/// Membership only grows: there is no way to unmark a lesson. Ids are not
/// checked against any course, so unknown ids are simply never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    completed: HashSet<String>,
}

impl CompletionSet {
    /// Create an empty completion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a completion set pre-populated from an external source
    pub fn seeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { completed: ids.into_iter().map(Into::into).collect() }
    }

    /// Mark a lesson complete. Returns true if it was not complete before.
    pub fn mark_complete(&mut self, lesson_id: &str) -> bool {
        if self.completed.contains(lesson_id) {
            return false;
        }
        self.completed.insert(lesson_id.to_string())
    }

    /// Has this lesson been completed?
    pub fn is_complete(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    /// Number of the module's lessons that are complete
    pub fn completed_in(&self, module: &Module) -> usize {
        module.lessons.iter().filter(|l| self.is_complete(&l.id)).count()
    }

    /// Module completion percentage, 0 for a module without lessons
    pub fn module_progress(&self, module: &Module) -> u8 {
        percent(self.completed_in(module), module.lessons.len())
    }

    /// Course completion percentage over every lesson of every module
    pub fn course_progress(&self, course: &Course) -> u8 {
        let completed = course.lessons().filter(|l| self.is_complete(&l.id)).count();
        percent(completed, course.lesson_count())
    }

    /// Number of completed ids (including ids outside any course)
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Integer percentage rounded to nearest, ties away from zero
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = done.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}
