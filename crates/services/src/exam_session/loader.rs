use std::sync::Arc;

use lms_core::Clock;
use lms_core::model::ExamId;

use super::session::ExamSession;
use crate::api::ExamApi;
use crate::error::SessionError;

/// Fetches an exam and opens a fresh session for it.
#[derive(Clone)]
pub struct ExamLoader {
    api: Arc<dyn ExamApi>,
    clock: Clock,
}

impl ExamLoader {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    /// Load the exam and start its countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` when the exam cannot be fetched or decoded.
    /// The caller must abandon the exam screen (see [`SessionError::fallback`]).
    pub async fn load(&self, exam_id: ExamId) -> Result<ExamSession, SessionError> {
        match self.api.get_exam(exam_id).await {
            Ok(exam) => {
                tracing::info!(
                    %exam_id,
                    questions = exam.question_count(),
                    time_limit_secs = exam.time_limit_secs(),
                    "exam session started"
                );
                Ok(ExamSession::start(exam, self.clock.now()))
            }
            Err(source) => {
                tracing::warn!(%exam_id, error = %source, "failed to load exam");
                Err(SessionError::Load { exam_id, source })
            }
        }
    }
}
