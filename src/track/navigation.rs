//! Module expansion and lesson selection

use std::collections::HashSet;

use crate::course::{Course, Lesson};

/// Reference to a lesson by its owning module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonRef {
    pub module_id: String,
    pub lesson_id: String,
}

impl LessonRef {
    pub fn new(module_id: impl Into<String>, lesson_id: impl Into<String>) -> Self {
        Self { module_id: module_id.into(), lesson_id: lesson_id.into() }
    }
}

/// Which modules are expanded and which lesson is being viewed
///
/// The selection is stored as ids, not references into the course, so it
/// survives the course being reloaded. Resolution happens on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    expanded: HashSet<String>,
    current: Option<LessonRef>,
}

impl SelectionState {
    /// Initial state for a course: first module expanded, nothing selected
    pub fn new(course: &Course) -> Self {
        let expanded = course.modules.first().map(|m| m.id.clone()).into_iter().collect();
        Self { expanded, current: None }
    }

    /// Flip a module between expanded and collapsed. Returns the new state.
    pub fn toggle_module_expanded(&mut self, module_id: &str) -> bool {
        if self.expanded.remove(module_id) {
            false
        } else {
            self.expanded.insert(module_id.to_string());
            true
        }
    }

    /// Is the module currently expanded?
    pub fn is_expanded(&self, module_id: &str) -> bool {
        self.expanded.contains(module_id)
    }

    /// Ids of all expanded modules
    pub fn expanded_module_ids(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Replace the current selection. The ids are not validated.
    pub fn select_lesson(&mut self, module_id: &str, lesson_id: &str) {
        self.current = Some(LessonRef::new(module_id, lesson_id));
    }

    /// The raw selection, which may point at lessons that no longer exist
    pub fn current(&self) -> Option<&LessonRef> {
        self.current.as_ref()
    }

    /// Is this lesson id the selected one?
    pub fn is_current(&self, lesson_id: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.lesson_id == lesson_id)
    }

    /// Look up the selected lesson in the given course
    ///
    /// Returns `None` when nothing is selected or the module or lesson has
    /// disappeared from the course.
    pub fn resolve_current_lesson<'c>(&self, course: &'c Course) -> Option<&'c Lesson> {
        let current = self.current.as_ref()?;
        course.find_lesson(&current.module_id, &current.lesson_id)
    }
}
