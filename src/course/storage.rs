//! Course file storage
//!
//! Courses are exchanged as JSON documents shaped like [`Course`]. The CLI
//! reads them from disk for offline viewing and writes them after a fetch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Course;

/// Load a course from a JSON file
pub fn load_course(path: &Path) -> Result<Course> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read course from {:?}", path))?;
    let course: Course = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse course file {:?}", path))?;

    tracing::debug!(
        "Loaded course {} ({} modules, {} lessons)",
        course.id,
        course.module_count(),
        course.lesson_count()
    );
    Ok(course)
}

/// Save a course to a JSON file, creating parent directories
pub fn save_course(course: &Course, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let contents =
        serde_json::to_string_pretty(course).with_context(|| "Failed to serialize course")?;

    fs::write(path, contents).with_context(|| format!("Failed to write course to {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Lesson, LessonType, Module};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_preserves_course() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("course.json");

        let mut course = Course::new("c1", "Course");
        course.modules.push(
            Module::new("m1", "Module", 1).with_lesson(
                Lesson::new("l1", "Lesson", LessonType::Video).with_content("https://v/1.mp4"),
            ),
        );

        save_course(&course, &path).unwrap();
        let loaded = load_course(&path).unwrap();
        assert_eq!(loaded, course);
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let err = load_course(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read course"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_course(&path).is_err());
    }
}
