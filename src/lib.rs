//! coursetrack - a terminal learning track for LMS courses
//!
//! Walk through a course's modules and lessons, mark lessons complete and
//! watch module and course progress update. Courses come from a JSON file
//! or straight from the LMS REST API.

pub mod api;
pub mod app;
pub mod config;
pub mod course;
pub mod theme;
pub mod track;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use course::{Course, Lesson, LessonType, Module};
pub use track::LearningTrack;
