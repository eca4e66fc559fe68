//! Data models for LMS API requests and responses

use serde::{Deserialize, Serialize};

use crate::course::{Course, Lesson, LessonType, Module};

/// Course as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Database identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing course code
    #[serde(default)]
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub max_students: u32,
    #[serde(default)]
    pub enrolled_students: u32,
    pub active_students: Option<u32>,
    pub completion_rate: Option<f64>,
    pub engagement_rate: Option<f64>,
    pub average_progress: Option<f64>,
    /// Structured learning track, when the course was built with modules
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Flat material list
    #[serde(default)]
    pub materials: Option<Vec<Material>>,
}

fn default_true() -> bool {
    true
}

impl CourseRecord {
    /// Title of the synthetic module built from flat materials
    pub const MATERIALS_MODULE_TITLE: &'static str = "Course Materials";

    /// Build the learning track for this course
    ///
    /// Uses the course's modules when it has any. Otherwise the materials,
    /// sorted by their order hint, become the lessons of a single module.
    pub fn into_course(self) -> Course {
        let description = Some(self.description).filter(|d| !d.trim().is_empty());

        let modules = if !self.modules.is_empty() {
            self.modules
        } else {
            let mut materials = self.materials.unwrap_or_default();
            if materials.is_empty() {
                Vec::new()
            } else {
                materials.sort_by_key(|m| m.order);
                let mut module = Module::new("materials", Self::MATERIALS_MODULE_TITLE, 1);
                module.lessons = materials.into_iter().map(Material::into_lesson).collect();
                vec![module]
            }
        };

        Course { id: self.id, title: self.title, description, modules }
    }
}

/// Kind of course material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Video,
    Pdf,
    Document,
    Link,
}

impl MaterialType {
    /// Lesson type used when this material is shown in the track
    pub fn lesson_type(&self) -> LessonType {
        match self {
            Self::Video => LessonType::Video,
            Self::Pdf | Self::Document | Self::Link => LessonType::Document,
        }
    }
}

/// A single uploaded course material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    #[serde(default)]
    pub content: String,
    pub url: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_required: bool,
    pub views: Option<u32>,
}

impl Material {
    /// Convert to a lesson, preferring the resolved URL over raw content
    pub fn into_lesson(self) -> Lesson {
        let content = self
            .url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| Some(self.content).filter(|c| !c.trim().is_empty()));
        Lesson {
            id: self.id,
            title: self.title,
            lesson_type: self.material_type.lesson_type(),
            content,
            duration: self.duration.filter(|d| !d.trim().is_empty()),
            order: self.order,
        }
    }
}

/// A student enrolled in a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseStudent {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub enrolled_at: String,
    /// Progress percentage (0-100)
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub is_active: bool,
}

/// Body for creating a course
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,
}

impl CreateCourseRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Attach the learning-track modules
    pub fn with_modules(mut self, modules: Vec<Module>) -> Self {
        self.modules = modules;
        self
    }
}

/// Partial course update; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
}

impl UpdateCourseRequest {
    /// Update that only flips the active flag
    pub fn active(is_active: bool) -> Self {
        Self { is_active: Some(is_active), ..Default::default() }
    }
}

/// Body for adding a non-video material
#[derive(Debug, Clone, Serialize)]
pub struct MaterialUploadRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

/// Body for reporting progress on a material
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate<'a> {
    pub material_id: &'a str,
    pub completed: bool,
    pub watch_time: u64,
}

/// Summary counters for a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CourseStatistics {
    pub enrolled_students: u32,
    pub active_students: u32,
    pub completion_rate: f64,
    pub engagement_rate: f64,
    pub average_progress: f64,
}

impl From<&CourseRecord> for CourseStatistics {
    fn from(course: &CourseRecord) -> Self {
        Self {
            enrolled_students: course.enrolled_students,
            active_students: course.active_students.unwrap_or(0),
            completion_rate: course.completion_rate.unwrap_or(0.0),
            engagement_rate: course.engagement_rate.unwrap_or(0.0),
            average_progress: course.average_progress.unwrap_or(0.0),
        }
    }
}

/// `{"course": ...}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct CourseEnvelope {
    pub course: CourseRecord,
}

/// `{"courses": [...]}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct CoursesEnvelope {
    pub courses: Vec<CourseRecord>,
}

/// `{"students": [...]}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct StudentsEnvelope {
    pub students: Vec<CourseStudent>,
}

/// `{"material": ...}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct MaterialEnvelope {
    pub material: Material,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn material(id: &str, order: i32, material_type: MaterialType) -> Material {
        Material {
            id: id.into(),
            course_id: "c1".into(),
            title: format!("Material {id}"),
            description: String::new(),
            material_type,
            content: format!("https://files/{id}"),
            url: None,
            duration: None,
            order,
            is_required: true,
            views: None,
        }
    }

    #[test]
    fn course_record_parses_backend_json() {
        let json = r#"{
            "_id": "64f0",
            "course_id": "CS101",
            "title": "Intro to CS",
            "description": "Basics",
            "enrolled_students": 12,
            "materials": [
                {"_id": "mat1", "title": "Slides", "type": "pdf", "content": "slides.pdf", "order": 2}
            ]
        }"#;
        let record: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "64f0");
        assert!(record.is_active);
        assert_eq!(record.materials.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn materials_become_single_module_in_order() {
        let record = CourseRecord {
            id: "c1".into(),
            title: "Course".into(),
            materials: Some(vec![
                material("b", 2, MaterialType::Pdf),
                material("a", 1, MaterialType::Video),
            ]),
            ..Default::default()
        };

        let course = record.into_course();
        assert_eq!(course.modules.len(), 1);
        assert_eq!(course.modules[0].title, CourseRecord::MATERIALS_MODULE_TITLE);
        let ids: Vec<&str> = course.modules[0].lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(course.modules[0].lessons[0].lesson_type, LessonType::Video);
        assert_eq!(course.modules[0].lessons[1].lesson_type, LessonType::Document);
    }

    #[test]
    fn modules_take_precedence_over_materials() {
        let record = CourseRecord {
            id: "c1".into(),
            title: "Course".into(),
            modules: vec![Module::new("m1", "Week 1", 1)],
            materials: Some(vec![material("a", 1, MaterialType::Link)]),
            ..Default::default()
        };
        let course = record.into_course();
        assert_eq!(course.modules.len(), 1);
        assert_eq!(course.modules[0].id, "m1");
    }

    #[test]
    fn course_without_content_has_no_modules() {
        let record = CourseRecord { id: "c".into(), title: "T".into(), ..Default::default() };
        assert!(record.into_course().modules.is_empty());
    }

    #[test]
    fn material_prefers_url_over_content() {
        let mut m = material("a", 1, MaterialType::Video);
        m.url = Some("https://cdn/a.mp4".into());
        assert_eq!(m.into_lesson().content.as_deref(), Some("https://cdn/a.mp4"));
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let json = serde_json::to_string(&UpdateCourseRequest::active(false)).unwrap();
        assert_eq!(json, r#"{"is_active":false}"#);
    }

    #[test]
    fn statistics_default_missing_counters() {
        let record = CourseRecord { enrolled_students: 7, ..Default::default() };
        let stats = CourseStatistics::from(&record);
        assert_eq!(stats.enrolled_students, 7);
        assert_eq!(stats.active_students, 0);
        assert_eq!(stats.average_progress, 0.0);
    }
}
