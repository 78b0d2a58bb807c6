use chrono::{DateTime, Utc};
use lms_core::model::{AnswerSheet, Exam, ExamId, ExamResult, Submission};
use lms_core::Clock;

use super::timer::{Countdown, CountdownTick};
use super::tracker::AnswerTracker;
use crate::error::SessionError;

//
// ─── PHASES AND DECISIONS ──────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Answers are editable and the countdown runs.
    Taking,
    /// A submission is in flight; further submit triggers are suppressed.
    Submitting,
    /// The server accepted a submission. Terminal.
    Submitted,
}

/// Who asked for the submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitTrigger {
    /// The learner pressed submit.
    Manual,
    /// The learner accepted the unanswered-questions warning.
    Confirmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Unanswered questions remain and time is left; ask the learner first.
    /// Nothing changed in the session.
    Confirm { unanswered: usize },
    /// Send this snapshot. The session is now `Submitting`.
    Dispatch(Submission),
    /// A submission is already in flight or done.
    Suppressed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionTick {
    Running { remaining: u32 },
    /// Time ran out: send this snapshot without asking. The session is now `Submitting`.
    AutoSubmit(Submission),
    /// The countdown is not running (submission in flight, expired, or done).
    Idle,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's timed attempt at an exam, from load to accepted submission.
///
/// The session is a plain state machine: it never performs I/O itself. Callers
/// drive it with ticks and submit requests and report the API outcome back via
/// [`ExamSession::complete_submission`] / [`ExamSession::fail_submission`].
#[derive(Clone, Debug)]
pub struct ExamSession {
    exam: Exam,
    tracker: AnswerTracker,
    countdown: Countdown,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    result: Option<ExamResult>,
}

impl ExamSession {
    /// Start a session with all questions unanswered and the countdown running.
    ///
    /// `started_at` should come from the services layer clock.
    #[must_use]
    pub fn start(exam: Exam, started_at: DateTime<Utc>) -> Self {
        let tracker = AnswerTracker::new(&exam);
        let countdown = Countdown::new(exam.time_limit_secs());
        Self {
            exam,
            tracker,
            countdown,
            phase: SessionPhase::Taking,
            started_at,
            result: None,
        }
    }

    #[must_use]
    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    #[must_use]
    pub fn exam_id(&self) -> ExamId {
        self.exam.id()
    }

    #[must_use]
    pub fn tracker(&self) -> &AnswerTracker {
        &self.tracker
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        self.tracker.sheet()
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.countdown.is_expired()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    /// How long the learner has spent on this attempt so far.
    #[must_use]
    pub fn elapsed_secs(&self, clock: &Clock) -> u64 {
        clock.seconds_since(self.started_at)
    }

    #[must_use]
    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    //
    // ─── ANSWERS AND NAVIGATION ────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `SessionError::Locked` once submission has begun, or
    /// `SessionError::Answer` for out-of-range indices.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.tracker.select(question, option)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`ExamSession::select_answer`].
    pub fn select_current(&mut self, option: usize) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.tracker.select_current(option)?;
        Ok(())
    }

    pub fn next(&mut self) -> bool {
        self.tracker.next()
    }

    pub fn previous(&mut self) -> bool {
        self.tracker.previous()
    }

    /// # Errors
    ///
    /// Returns `SessionError::Answer` for an index past the last question.
    pub fn jump_to(&mut self, question: usize) -> Result<(), SessionError> {
        self.tracker.jump_to(question)?;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Taking {
            Ok(())
        } else {
            Err(SessionError::Locked)
        }
    }

    //
    // ─── CLOCK ─────────────────────────────────────────────────────────────────
    //

    /// Advance the countdown by one second.
    ///
    /// The tick that reaches zero begins submission of the current answers,
    /// unanswered entries included, with no confirmation.
    pub fn tick(&mut self) -> SessionTick {
        if self.phase != SessionPhase::Taking {
            return SessionTick::Idle;
        }
        match self.countdown.tick() {
            CountdownTick::Running { remaining } => SessionTick::Running { remaining },
            CountdownTick::Expired => {
                tracing::info!(
                    exam_id = %self.exam.id(),
                    unanswered = self.answers().unanswered_count(),
                    "exam time expired, auto-submitting"
                );
                SessionTick::AutoSubmit(self.begin_submission())
            }
            CountdownTick::Inactive => SessionTick::Idle,
        }
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────────
    //

    /// Decide what a submit trigger should do.
    ///
    /// Once time has expired no confirmation is asked for.
    pub fn request_submit(&mut self, trigger: SubmitTrigger) -> SubmitDecision {
        if self.phase != SessionPhase::Taking {
            return SubmitDecision::Suppressed;
        }
        let unanswered = self.answers().unanswered_count();
        if trigger == SubmitTrigger::Manual && unanswered > 0 && !self.is_expired() {
            return SubmitDecision::Confirm { unanswered };
        }
        SubmitDecision::Dispatch(self.begin_submission())
    }

    fn begin_submission(&mut self) -> Submission {
        self.phase = SessionPhase::Submitting;
        self.countdown.pause();
        Submission::from_sheet(self.exam.id(), self.answers())
    }

    /// Record the server's result. The session becomes `Submitted` for good.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` if no submission was in flight.
    pub fn complete_submission(&mut self, result: ExamResult) -> Result<&ExamResult, SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }
        self.phase = SessionPhase::Submitted;
        self.countdown.stop();
        Ok(&*self.result.insert(result))
    }

    /// Return to `Taking` after a failed send, keeping every answer so the
    /// learner can retry. A paused countdown resumes; an expired one stays expired.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitting` if no submission was in flight.
    pub fn fail_submission(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }
        self.phase = SessionPhase::Taking;
        self.countdown.resume();
        Ok(())
    }
}
