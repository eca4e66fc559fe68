//! Course content model and loading

pub mod model;
pub mod storage;

pub use model::{Course, Lesson, LessonType, Module};
