#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod exam_session;

pub use lms_core::Clock;

pub use api::{ApiConfig, ExamApi, HttpExamApi, InMemoryExamApi};
pub use error::{ApiError, SessionError};
pub use exam_session::{
    AnswerTracker, Countdown, CountdownState, CountdownTick, CountdownTicker, ExamLoader,
    ExamSession, SessionPhase, SessionTick, SubmissionDispatcher, SubmitDecision, SubmitOutcome,
    SubmitTrigger,
};
