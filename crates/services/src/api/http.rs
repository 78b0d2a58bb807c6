use std::env;

use async_trait::async_trait;
use lms_core::model::{CourseId, Exam, ExamId, ExamResult, Submission};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::ExamApi;
use super::dto::{ExamRecord, ExamResultRecord, SubmissionRecord};
use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Reads `LMS_API_BASE_URL` and `LMS_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("LMS_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let config = Self::new(base_url);
        match env::var("LMS_API_TOKEN") {
            Ok(token) => config.with_token(token),
            Err(_) => config,
        }
    }

    fn exams_url(&self, path: &str) -> String {
        format!("{}/exams/{path}", self.base_url.trim_end_matches('/'))
    }
}

/// `ExamApi` backed by the platform's REST endpoints.
#[derive(Clone)]
pub struct HttpExamApi {
    client: Client,
    config: ApiConfig,
}

impl HttpExamApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, resource: String) -> Result<T, ApiError> {
        let url = self.config.exams_url(path);
        tracing::debug!(%url, "GET");
        let response = self.authorized(self.client.get(url)).send().await?;
        decode(response, resource).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, resource: String) -> Result<T, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound { resource });
    }
    if !status.is_success() {
        return Err(ApiError::HttpStatus(status));
    }
    Ok(response.json().await?)
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn get_exam(&self, exam_id: ExamId) -> Result<Exam, ApiError> {
        let record: ExamRecord = self
            .fetch(&exam_id.to_string(), format!("exam {exam_id}"))
            .await?;
        record.into_exam()
    }

    async fn submit_exam(
        &self,
        exam_id: ExamId,
        submission: &Submission,
    ) -> Result<ExamResult, ApiError> {
        let url = self.config.exams_url(&format!("submit/{exam_id}"));
        tracing::debug!(%url, "POST");
        let body = SubmissionRecord::from_submission(submission);
        let response = self
            .authorized(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        let record: ExamResultRecord = decode(response, format!("exam {exam_id}")).await?;
        record.into_result()
    }

    async fn get_exam_result(&self, exam_id: ExamId) -> Result<ExamResult, ApiError> {
        let record: ExamResultRecord = self
            .fetch(
                &format!("results/{exam_id}"),
                format!("result for exam {exam_id}"),
            )
            .await?;
        record.into_result()
    }

    async fn list_course_exams(&self, course_id: CourseId) -> Result<Vec<Exam>, ApiError> {
        let records: Vec<ExamRecord> = self
            .fetch(&format!("course/{course_id}"), format!("course {course_id}"))
            .await?;
        records.into_iter().map(ExamRecord::into_exam).collect()
    }

    async fn list_my_results(&self, course_id: CourseId) -> Result<Vec<ExamResult>, ApiError> {
        let records: Vec<ExamResultRecord> = self
            .fetch(
                &format!("my-results/{course_id}"),
                format!("results for course {course_id}"),
            )
            .await?;
        records
            .into_iter()
            .map(ExamResultRecord::into_result)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_exam_urls_without_double_slashes() {
        let config = ApiConfig::new("https://lms.example.com/api/");
        assert_eq!(
            config.exams_url("submit/4"),
            "https://lms.example.com/api/exams/submit/4"
        );
        assert_eq!(
            ApiConfig::new("http://localhost:8080/api").exams_url("course/2"),
            "http://localhost:8080/api/exams/course/2"
        );
    }

    #[test]
    fn blank_tokens_are_ignored() {
        assert_eq!(ApiConfig::new("http://x").with_token("  ").token, None);
        assert_eq!(
            ApiConfig::new("http://x").with_token("abc").token.as_deref(),
            Some("abc")
        );
    }
}
