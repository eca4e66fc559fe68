//! Course endpoints

use super::client::ApiClient;
use super::error::ApiError;
use super::models::{
    CourseEnvelope, CourseRecord, CourseStatistics, CourseStudent, CoursesEnvelope,
    CreateCourseRequest, Material, MaterialEnvelope, MaterialUploadRequest, ProgressUpdate,
    StudentsEnvelope, UpdateCourseRequest,
};

/// Typed access to `/courses`
pub struct CourseApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CourseApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All courses visible to the current user
    pub async fn get_courses(&self) -> Result<Vec<CourseRecord>, ApiError> {
        let envelope: CoursesEnvelope = self.client.get("/courses").await?;
        Ok(envelope.courses)
    }

    /// A single course
    pub async fn get_course_by_id(&self, course_id: &str) -> Result<CourseRecord, ApiError> {
        let envelope: CourseEnvelope = self.client.get(&self.course_url(course_id, &[])?).await?;
        Ok(envelope.course)
    }

    /// Materials attached to a course, empty when it has none
    pub async fn get_course_materials(&self, course_id: &str) -> Result<Vec<Material>, ApiError> {
        let course = self.get_course_by_id(course_id).await?;
        Ok(course.materials.unwrap_or_default())
    }

    pub async fn create_course(
        &self,
        request: &CreateCourseRequest,
    ) -> Result<CourseRecord, ApiError> {
        let envelope: CourseEnvelope = self.client.post("/courses", Some(request)).await?;
        tracing::info!("Created course {}", envelope.course.id);
        Ok(envelope.course)
    }

    pub async fn update_course(
        &self,
        course_id: &str,
        request: &UpdateCourseRequest,
    ) -> Result<CourseRecord, ApiError> {
        let url = self.course_url(course_id, &[])?;
        let envelope: CourseEnvelope = self.client.put(&url, Some(request)).await?;
        Ok(envelope.course)
    }

    /// Deleting a course only deactivates it
    pub async fn delete_course(&self, course_id: &str) -> Result<(), ApiError> {
        self.archive_course(course_id).await.map(|_| ())
    }

    pub async fn archive_course(&self, course_id: &str) -> Result<CourseRecord, ApiError> {
        self.update_course(course_id, &UpdateCourseRequest::active(false)).await
    }

    pub async fn restore_course(&self, course_id: &str) -> Result<CourseRecord, ApiError> {
        self.update_course(course_id, &UpdateCourseRequest::active(true)).await
    }

    pub async fn get_course_students(
        &self,
        course_id: &str,
    ) -> Result<Vec<CourseStudent>, ApiError> {
        let path = self.course_url(course_id, &["students"])?;
        let envelope: StudentsEnvelope = self.client.get(&path).await?;
        Ok(envelope.students)
    }

    /// Attach a non-video material
    pub async fn upload_material(
        &self,
        course_id: &str,
        request: &MaterialUploadRequest,
    ) -> Result<Material, ApiError> {
        let path = self.course_url(course_id, &["materials"])?;
        let envelope: MaterialEnvelope = self.client.post(&path, Some(request)).await?;
        Ok(envelope.material)
    }

    /// Report progress on one material for the current student
    pub async fn update_course_progress(
        &self,
        course_id: &str,
        material_id: &str,
        completed: bool,
        watch_time: Option<u64>,
    ) -> Result<(), ApiError> {
        let path = self.course_url(course_id, &["progress"])?;
        let body = ProgressUpdate { material_id, completed, watch_time: watch_time.unwrap_or(0) };
        let _: serde_json::Value = self.client.post(&path, Some(&body)).await?;
        tracing::debug!("Reported progress for {} in course {}", material_id, course_id);
        Ok(())
    }

    pub async fn enroll(&self, course_id: &str) -> Result<(), ApiError> {
        let path = self.course_url(course_id, &["enroll"])?;
        let _: serde_json::Value = self.client.post(&path, None::<&()>).await?;
        Ok(())
    }

    pub async fn unenroll(&self, course_id: &str) -> Result<(), ApiError> {
        let path = self.course_url(course_id, &["unenroll"])?;
        let _: serde_json::Value = self.client.post(&path, None::<&()>).await?;
        Ok(())
    }

    /// `/courses/<id>/...` with the id encoded as a single segment
    fn course_url(&self, course_id: &str, rest: &[&str]) -> Result<String, ApiError> {
        let mut segments = vec!["courses", course_id];
        segments.extend_from_slice(rest);
        self.client.endpoint(&segments)
    }

    /// Summary counters taken from the course record
    pub async fn get_course_statistics(
        &self,
        course_id: &str,
    ) -> Result<CourseStatistics, ApiError> {
        let course = self.get_course_by_id(course_id).await?;
        Ok(CourseStatistics::from(&course))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::StaticToken;
    use crate::config::Config;
    use crate::course::Module;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        let config = Config { api_base_url: server.url(), retry_delay_ms: 0, ..Default::default() };
        ApiClient::new(&config, StaticToken::default()).unwrap()
    }

    const COURSE_JSON: &str = r#"{
        "course": {
            "_id": "c1",
            "title": "Rust 101",
            "enrolled_students": 4,
            "active_students": 3,
            "materials": [
                {"_id": "m2", "title": "Notes", "type": "document", "content": "notes.pdf", "order": 2},
                {"_id": "m1", "title": "Intro", "type": "video", "content": "intro.mp4", "order": 1}
            ]
        }
    }"#;

    #[tokio::test]
    async fn get_course_by_id_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses/c1")
            .with_status(200)
            .with_body(COURSE_JSON)
            .create_async()
            .await;

        let client = client_for(&server);
        let course = CourseApi::new(&client).get_course_by_id("c1").await.unwrap();
        assert_eq!(course.title, "Rust 101");

        let track = course.into_course();
        assert_eq!(track.lesson_count(), 2);
        assert_eq!(track.modules[0].lessons[0].id, "m1");
    }

    #[tokio::test]
    async fn materials_default_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses/c2")
            .with_status(200)
            .with_body(r#"{"course":{"_id":"c2","title":"Bare"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let materials = CourseApi::new(&client).get_course_materials("c2").await.unwrap();
        assert!(materials.is_empty());
    }

    #[tokio::test]
    async fn statistics_come_from_course_record() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses/c1")
            .with_status(200)
            .with_body(COURSE_JSON)
            .create_async()
            .await;

        let client = client_for(&server);
        let stats = CourseApi::new(&client).get_course_statistics("c1").await.unwrap();
        assert_eq!(stats.enrolled_students, 4);
        assert_eq!(stats.active_students, 3);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[tokio::test]
    async fn archive_sends_inactive_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/courses/c1")
            .match_body(Matcher::Json(serde_json::json!({"is_active": false})))
            .with_status(200)
            .with_body(r#"{"course":{"_id":"c1","title":"Rust 101","is_active":false},"message":"ok"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let course = CourseApi::new(&client).archive_course("c1").await.unwrap();
        assert!(!course.is_active);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn progress_update_posts_material_and_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/courses/c1/progress")
            .match_body(Matcher::Json(serde_json::json!({
                "material_id": "m1",
                "completed": true,
                "watch_time": 0
            })))
            .with_status(200)
            .with_body(r#"{"message":"Progress updated"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        CourseApi::new(&client).update_course_progress("c1", "m1", true, None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn enroll_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/courses/c1/enroll").with_status(200).create_async().await;

        let client = client_for(&server);
        CourseApi::new(&client).enroll("c1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn students_are_listed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses/c1/students")
            .with_status(200)
            .with_body(
                r#"{"students":[{"id":"s1","name":"Ada","email":"ada@example.com","progress":75.0,"is_active":true}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let students = CourseApi::new(&client).get_course_students("c1").await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Ada");
    }

    #[tokio::test]
    async fn create_course_sends_modules() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/courses")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Rust 101",
                "description": "Ownership and borrowing",
                "category": "Programming",
                "modules": [
                    {"id": "m1", "title": "Week 1", "description": "", "order": 1, "lessons": []}
                ]
            })))
            .with_status(201)
            .with_body(r#"{"course":{"_id":"c9","title":"Rust 101"},"message":"Course created"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let request = CreateCourseRequest::new("Rust 101", "Ownership and borrowing", "Programming")
            .with_modules(vec![Module::new("m1", "Week 1", 1)]);
        let course = CourseApi::new(&client).create_course(&request).await.unwrap();
        assert_eq!(course.id, "c9");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn course_id_is_a_single_path_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/courses/a%2Fb/students")
            .with_status(200)
            .with_body(r#"{"students":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let students = CourseApi::new(&client).get_course_students("a/b").await.unwrap();
        assert!(students.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn backend_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses")
            .with_status(403)
            .with_body(r#"{"error":"Forbidden"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = CourseApi::new(&client).get_courses().await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 403, .. }));
    }
}
