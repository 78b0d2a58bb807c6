mod dto;
mod http;
mod memory;

use async_trait::async_trait;
use lms_core::model::{CourseId, Exam, ExamId, ExamResult, Submission};

use crate::error::ApiError;

pub use dto::{ExamRecord, ExamResultRecord, QuestionRecord, SubmissionRecord};
pub use http::{ApiConfig, HttpExamApi};
pub use memory::InMemoryExamApi;

/// Remote exam endpoints. All scoring and persistence happens behind this seam.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Fetch an exam definition.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the exam does not exist, or transport/decoding errors.
    async fn get_exam(&self, exam_id: ExamId) -> Result<Exam, ApiError>;

    /// Submit final answers and receive the scored result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the server rejects it.
    async fn submit_exam(
        &self,
        exam_id: ExamId,
        submission: &Submission,
    ) -> Result<ExamResult, ApiError>;

    /// Fetch the learner's latest result for an exam.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when no attempt exists.
    async fn get_exam_result(&self, exam_id: ExamId) -> Result<ExamResult, ApiError>;

    /// List the exams attached to a course.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport/decoding errors.
    async fn list_course_exams(&self, course_id: CourseId) -> Result<Vec<Exam>, ApiError>;

    /// List the learner's results across a course's exams.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport/decoding errors.
    async fn list_my_results(&self, course_id: CourseId) -> Result<Vec<ExamResult>, ApiError>;
}
