//! Content model for courses
//!
//! A course is an ordered list of modules, each an ordered list of lessons.
//! The model is read-only input for a viewing session: edits go through the
//! LMS API and arrive here as a freshly loaded course.

use serde::{Deserialize, Deserializer, Serialize};

/// A complete course learning track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Opaque course identifier
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Description or summary
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub description: Option<String>,
    /// Modules in display order
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Course {
    /// Create an empty course
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), description: None, modules: Vec::new() }
    }

    /// Number of modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Total lesson count across all modules
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    /// Find a module by id
    pub fn find_module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Find a lesson inside a specific module
    pub fn find_lesson(&self, module_id: &str, lesson_id: &str) -> Option<&Lesson> {
        self.find_module(module_id).and_then(|m| m.find_lesson(lesson_id))
    }

    /// Iterate over every lesson in display order
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }
}

/// A named group of lessons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Identifier, unique within the course
    #[serde(alias = "_id")]
    pub id: String,
    /// Module title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Display-order hint. Vector position stays authoritative.
    #[serde(default)]
    pub order: i32,
    /// Lessons in display order
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Module {
    /// Create an empty module
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            order,
            lessons: Vec::new(),
        }
    }

    /// Add a lesson (builder style)
    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Find a lesson by id
    pub fn find_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// A single learning item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Identifier, unique within the course (not globally)
    #[serde(alias = "_id")]
    pub id: String,
    /// Lesson title
    pub title: String,
    /// Content type
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    /// URL or opaque payload reference
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub content: Option<String>,
    /// Display duration, e.g. "12 min"
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub duration: Option<String>,
    /// Display-order hint
    #[serde(default)]
    pub order: i32,
}

impl Lesson {
    /// Create a lesson without content or duration
    pub fn new(id: impl Into<String>, title: impl Into<String>, lesson_type: LessonType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lesson_type,
            content: None,
            duration: None,
            order: 0,
        }
    }

    /// Set the content reference
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the display duration
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

/// Kind of content a lesson carries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Document,
    Quiz,
    Assignment,
    /// Any type string the backend sends that we don't know about
    #[serde(untagged)]
    Other(String),
}

impl LessonType {
    /// Lowercase name as used on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treat missing, null and empty strings alike
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
