use crate::app::client::PortalClient;
use crate::domain::model::{Course, CourseMaterial, CourseProgress, CourseReview, CourseSection};
use crate::domain::ports::{ApiRequest, Method, Transport};
use crate::domain::query::{ListQuery, Resource};
use crate::utils::error::Result;
use serde_json::{json, Value};

impl<T: Transport> PortalClient<T> {
    pub async fn list_courses(&self, query: &ListQuery) -> Result<Vec<Course>> {
        self.list(Resource::Courses, query).await
    }

    pub async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.call_optional(ApiRequest::get(Resource::Courses.item_path(id)))
            .await
    }

    pub async fn featured_courses(&self) -> Result<Vec<Course>> {
        self.list_path("/courses/featured/", Vec::new()).await
    }

    pub async fn course_sections(&self, course_id: i64) -> Result<Vec<CourseSection>> {
        self.list_path(&format!("/courses/{}/sections/", course_id), Vec::new())
            .await
    }

    pub async fn course_materials(&self, course_id: i64) -> Result<Vec<CourseMaterial>> {
        self.list_path(&format!("/courses/{}/materials/", course_id), Vec::new())
            .await
    }

    pub async fn course_reviews(&self, course_id: i64) -> Result<Vec<CourseReview>> {
        self.list_path(&format!("/courses/{}/reviews/", course_id), Vec::new())
            .await
    }

    pub async fn add_course_review(
        &self,
        course_id: i64,
        rating: u8,
        comment: &str,
    ) -> Result<CourseReview> {
        self.call_as(ApiRequest::post(
            "/course-reviews/",
            json!({"course": course_id, "rating": rating, "comment": comment}),
        ))
        .await
    }

    pub async fn course_progress(&self, course_id: i64) -> Result<CourseProgress> {
        let request = ApiRequest::get("/course-progress/by_course/")
            .with_query(vec![("course".to_string(), course_id.to_string())]);
        self.call_as(request).await
    }

    pub async fn update_lesson_progress(&self, lesson_id: i64, completed: bool) -> Result<Value> {
        self.call(ApiRequest::post(
            "/course-progress/",
            json!({"lesson": lesson_id, "completed": completed}),
        ))
        .await
    }

    pub async fn enroll_course(&self, course_id: i64) -> Result<Value> {
        self.call(ApiRequest::new(
            Method::Post,
            format!("/courses/{}/enroll/", course_id),
        ))
        .await
    }

    pub async fn favorite_courses(&self) -> Result<Vec<Value>> {
        self.list_path("/favorite-courses/", Vec::new()).await
    }

    pub async fn add_favorite_course(&self, course_id: i64) -> Result<Value> {
        self.call(ApiRequest::post(
            "/favorite-courses/",
            json!({"course_id": course_id}),
        ))
        .await
    }

    pub async fn remove_favorite_course(&self, favorite_id: i64) -> Result<Value> {
        self.call(ApiRequest::new(
            Method::Delete,
            format!("/favorite-courses/{}/", favorite_id),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::app::client::tests::MockTransport;
    use crate::app::client::PortalClient;
    use crate::core::session::Session;
    use crate::domain::ports::Method;
    use crate::domain::query::{CategoryFilter, ListQuery};
    use serde_json::json;

    #[tokio::test]
    async fn test_course_category_passes_through_as_given() {
        let transport = MockTransport::default().respond(
            "/courses/",
            json!({"results": [{"id": 4, "category": "Basics", "rating": "4.5", "level": {"name": "Beginner"}}]}),
        );
        let client = PortalClient::new(transport.clone(), Session::anonymous());

        let courses = client
            .list_courses(&ListQuery::new().category(CategoryFilter::from("Basics")))
            .await
            .unwrap();
        assert_eq!(courses[0].category.display_name(), "Basics");
        assert_eq!(courses[0].level.display_name(), "Beginner");
        assert_eq!(
            transport.last_request().query,
            vec![("category".to_string(), "Basics".to_string())]
        );
    }

    #[tokio::test]
    async fn test_sections_accept_both_shapes() {
        let transport = MockTransport::default()
            .respond("/courses/1/sections/", json!([{"id": 1, "title": "Intro"}]))
            .respond(
                "/courses/1/materials/",
                json!({"results": [{"id": 2, "title": "Slides", "type": "pdf"}]}),
            );
        let client = PortalClient::new(transport, Session::anonymous());
        assert_eq!(client.course_sections(1).await.unwrap()[0].title, "Intro");
        assert_eq!(client.course_materials(1).await.unwrap()[0].r#type, "pdf");
    }

    #[tokio::test]
    async fn test_progress_queries_by_course() {
        let transport = MockTransport::default().respond(
            "/course-progress/by_course/",
            json!({"course_id": 3, "completed_lessons": 2, "total_lessons": 4, "progress_percentage": 50.0}),
        );
        let client = PortalClient::new(transport.clone(), Session::anonymous());
        let progress = client.course_progress(3).await.unwrap();
        assert_eq!(progress.progress_percentage, 50.0);
        assert_eq!(
            transport.last_request().query,
            vec![("course".to_string(), "3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_remove_favorite_uses_delete() {
        let transport = MockTransport::default().respond("/favorite-courses/9/", json!(null));
        let client = PortalClient::new(transport.clone(), Session::anonymous());
        client.remove_favorite_course(9).await.unwrap();
        assert_eq!(transport.last_request().method, Method::Delete);
    }
}
