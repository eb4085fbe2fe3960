use crate::app::client::PortalClient;
use crate::domain::model::{AnswerSubmission, Test, TestQuestion, TestResult, TestSubmission};
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{ListQuery, Resource};
use crate::utils::error::Result;
use serde_json::json;

impl<T: Transport> PortalClient<T> {
    pub async fn list_tests(&self, query: &ListQuery) -> Result<Vec<Test>> {
        self.list(Resource::Tests, query).await
    }

    pub async fn get_test(&self, id: i64) -> Result<Option<Test>> {
        self.call_optional(ApiRequest::get(Resource::Tests.item_path(id)))
            .await
    }

    pub async fn featured_tests(&self) -> Result<Vec<Test>> {
        self.list_path("/tests/featured/", Vec::new()).await
    }

    pub async fn test_questions(&self, test_id: i64) -> Result<Vec<TestQuestion>> {
        self.list_path(&format!("/tests/{}/questions/", test_id), Vec::new())
            .await
    }

    pub async fn submit_test_answers(
        &self,
        test_id: i64,
        answers: &[AnswerSubmission],
    ) -> Result<TestSubmission> {
        self.call_as(ApiRequest::post(
            format!("/tests/{}/submit_answers/", test_id),
            json!({ "answers": answers }),
        ))
        .await
    }

    pub async fn test_results(&self, test_id: i64) -> Result<Vec<TestResult>> {
        self.list_path(&format!("/tests/{}/results/", test_id), Vec::new())
            .await
    }
}
