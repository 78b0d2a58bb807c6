use std::sync::Arc;

use lms_core::model::{ExamResult, Submission};

use super::session::{ExamSession, SubmitDecision, SubmitTrigger};
use crate::api::ExamApi;
use crate::error::SessionError;

/// Result of a submit attempt driven through the dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The learner must confirm submitting with unanswered questions.
    NeedsConfirmation { unanswered: usize },
    /// Another submission is in flight or already accepted.
    Suppressed,
    Submitted(ExamResult),
}

/// Posts answer snapshots to the API and reports the outcome back to the session.
#[derive(Clone)]
pub struct SubmissionDispatcher {
    api: Arc<dyn ExamApi>,
}

impl SubmissionDispatcher {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>) -> Self {
        Self { api }
    }

    /// Send a snapshot. Does not touch any session; pair with
    /// `complete_submission` / `fail_submission` when the session lives elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submission` when the API call fails.
    pub async fn send(&self, submission: &Submission) -> Result<ExamResult, SessionError> {
        let exam_id = submission.exam_id();
        tracing::info!(
            %exam_id,
            unanswered = submission.unanswered_count(),
            "submitting exam"
        );
        match self.api.submit_exam(exam_id, submission).await {
            Ok(result) => {
                tracing::info!(
                    %exam_id,
                    score = result.score,
                    passed = result.passed,
                    "exam submitted"
                );
                Ok(result)
            }
            Err(source) => {
                tracing::warn!(%exam_id, error = %source, "exam submission failed");
                Err(SessionError::Submission { exam_id, source })
            }
        }
    }

    /// Handle a submit trigger end to end for a session owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submission` when the API call fails; the session is
    /// back in `Taking` with its answers intact.
    pub async fn submit(
        &self,
        session: &mut ExamSession,
        trigger: SubmitTrigger,
    ) -> Result<SubmitOutcome, SessionError> {
        match session.request_submit(trigger) {
            SubmitDecision::Confirm { unanswered } => {
                Ok(SubmitOutcome::NeedsConfirmation { unanswered })
            }
            SubmitDecision::Suppressed => Ok(SubmitOutcome::Suppressed),
            SubmitDecision::Dispatch(submission) => self.deliver(session, &submission).await,
        }
    }

    /// Send a snapshot the session already committed to (manual dispatch or auto-submit).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submission` when the API call fails.
    pub async fn deliver(
        &self,
        session: &mut ExamSession,
        submission: &Submission,
    ) -> Result<SubmitOutcome, SessionError> {
        match self.send(submission).await {
            Ok(result) => {
                let stored = session.complete_submission(result)?.clone();
                Ok(SubmitOutcome::Submitted(stored))
            }
            Err(err) => {
                session.fail_submission()?;
                Err(err)
            }
        }
    }
}
