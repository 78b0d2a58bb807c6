//! Shared error types for the services crate.

use thiserror::Error;

use lms_core::access::Destination;
use lms_core::model::{AnswerError, ExamError, ExamId};

/// Errors emitted by `ExamApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid exam payload: {0}")]
    InvalidExam(#[from] ExamError),
    #[error("invalid response payload: {0}")]
    InvalidPayload(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by the exam session subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("failed to load exam {exam_id}")]
    Load {
        exam_id: ExamId,
        #[source]
        source: ApiError,
    },
    #[error("failed to submit exam {exam_id}")]
    Submission {
        exam_id: ExamId,
        #[source]
        source: ApiError,
    },
    #[error("answers are locked while a submission is in flight or done")]
    Locked,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl SessionError {
    /// Load failures end the session; everything else leaves it usable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    /// Where the learner should be sent when this error ends the session.
    #[must_use]
    pub fn fallback(&self) -> Option<Destination> {
        self.is_fatal().then_some(Destination::StudentCourses)
    }
}
