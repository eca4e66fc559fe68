//! Completed-lesson records kept on disk
//!
//! The learning-track session never persists anything itself. The CLI
//! listens for completion events and records them here, and seeds the next
//! session's completion set from this file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Config;
use crate::track::CompletionSet;

/// Completions for a single course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
    /// Completed lesson ids
    pub completed_lessons: BTreeSet<String>,

    /// Unix timestamp of the last recorded completion
    pub last_completed_at: Option<i64>,
}

/// All progress data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStore {
    /// Progress per course id
    pub courses: BTreeMap<String, CourseProgress>,
}

impl ProgressStore {
    /// Load progress from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::progress_path()?)
    }

    /// Load progress from a specific file, empty if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read progress from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse progress.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save progress to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize progress")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write progress to {:?}", path))?;

        Ok(())
    }

    /// Get progress path
    pub fn progress_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("progress.json"))
    }

    /// Get or create course progress
    pub fn course_mut(&mut self, course_id: &str) -> &mut CourseProgress {
        self.courses.entry(course_id.to_string()).or_default()
    }

    /// Record a completed lesson. Returns true if it was new.
    pub fn record_completion(&mut self, course_id: &str, lesson_id: &str, at: i64) -> bool {
        let course = self.course_mut(course_id);
        let inserted = course.completed_lessons.insert(lesson_id.to_string());
        if inserted {
            course.last_completed_at = Some(at);
        }
        inserted
    }

    /// Completion set to seed a new session with
    pub fn completions_for(&self, course_id: &str) -> CompletionSet {
        self.courses
            .get(course_id)
            .map(|c| CompletionSet::seeded(c.completed_lessons.iter().cloned()))
            .unwrap_or_default()
    }
}

/// Current Unix timestamp in seconds
pub fn now_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_store_is_empty() {
        let store = ProgressStore::default();
        assert!(store.courses.is_empty());
        assert!(store.completions_for("any").is_empty());
    }

    #[test]
    fn record_completion_is_idempotent() {
        let mut store = ProgressStore::default();
        assert!(store.record_completion("c1", "l1", 100));
        assert!(!store.record_completion("c1", "l1", 200));

        let course = &store.courses["c1"];
        assert_eq!(course.completed_lessons.len(), 1);
        assert_eq!(course.last_completed_at, Some(100));
    }

    #[test]
    fn completions_seed_a_session() {
        let mut store = ProgressStore::default();
        store.record_completion("c1", "l1", 1);
        store.record_completion("c1", "l2", 2);
        store.record_completion("c2", "other", 3);

        let set = store.completions_for("c1");
        assert_eq!(set.len(), 2);
        assert!(set.is_complete("l1"));
        assert!(!set.is_complete("other"));
    }

    #[test]
    fn save_and_load_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("progress.json");

        let mut store = ProgressStore::default();
        store.record_completion("c1", "l1", 42);
        store.save_to(&path).unwrap();

        assert_eq!(ProgressStore::load_from(&path).unwrap(), store);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(store, ProgressStore::default());
    }
}
