//! LMS REST API integration
//!
//! Provides token storage, the HTTP client and typed course endpoints.
//! The learning-track models never call into this module; the CLI fetches
//! data here and hands finished courses to a session.

pub mod auth;
pub mod client;
pub mod courses;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth::{StaticToken, TokenProvider, TokenStore};
pub use client::ApiClient;
pub use courses::CourseApi;
pub use error::ApiError;
pub use models::{CourseRecord, Material, MaterialType};
