mod dispatcher;
mod loader;
mod session;
mod ticker;
mod timer;
mod tracker;

// Public API of the exam session subsystem.
pub use crate::error::SessionError;
pub use dispatcher::{SubmissionDispatcher, SubmitOutcome};
pub use loader::ExamLoader;
pub use session::{ExamSession, SessionPhase, SessionTick, SubmitDecision, SubmitTrigger};
pub use ticker::CountdownTicker;
pub use timer::{Countdown, CountdownState, CountdownTick};
pub use tracker::AnswerTracker;
