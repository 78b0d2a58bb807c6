use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use lms_core::model::{ExamId, ExamResult, User};
use services::{Clock, ExamApi, ExamLoader, SubmissionDispatcher};

pub trait UiApp: Send + Sync {
    fn exam_api(&self) -> Arc<dyn ExamApi>;
    fn clock(&self) -> Clock;
    fn current_user(&self) -> Option<User>;
    /// Exam to open right after launch, if any.
    fn launch_exam(&self) -> Option<ExamId>;
}

#[derive(Clone)]
pub struct AppContext {
    exam_api: Arc<dyn ExamApi>,
    clock: Clock,
    current_user: Option<User>,
    launch_exam_once: Arc<Mutex<Option<ExamId>>>,
    handed_off_result: Arc<Mutex<Option<CarriedResult>>>,
}

/// A fresh result on its way from the exam screen to the results screen.
#[derive(Clone, Debug, PartialEq)]
pub struct CarriedResult {
    pub result: ExamResult,
    pub duration_secs: u64,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam_api: app.exam_api(),
            clock: app.clock(),
            current_user: app.current_user(),
            launch_exam_once: Arc::new(Mutex::new(app.launch_exam())),
            handed_off_result: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::clone(&self.exam_api)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn loader(&self) -> ExamLoader {
        ExamLoader::new(self.exam_api(), self.clock)
    }

    #[must_use]
    pub fn dispatcher(&self) -> SubmissionDispatcher {
        SubmissionDispatcher::new(self.exam_api())
    }

    /// One-shot: the first call returns the configured exam, later calls `None`.
    #[must_use]
    pub fn take_launch_exam(&self) -> Option<ExamId> {
        self.launch_exam_once
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }

    /// Carry a fresh result over to the results view so it is not fetched again.
    pub fn hand_off_result(&self, result: ExamResult, duration_secs: u64) {
        if let Ok(mut slot) = self.handed_off_result.lock() {
            *slot = Some(CarriedResult {
                result,
                duration_secs,
            });
        }
    }

    /// Take the carried result if it belongs to `exam_id`.
    #[must_use]
    pub fn take_result(&self, exam_id: ExamId) -> Option<CarriedResult> {
        let mut slot = self.handed_off_result.lock().ok()?;
        if slot
            .as_ref()
            .is_some_and(|carried| carried.result.exam_id == exam_id)
        {
            slot.take()
        } else {
            None
        }
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(&app)
}

/// User-visible notice shown above the routed page.
///
/// Lives in the router layout so it survives navigation, e.g. a load failure
/// notice posted right before redirecting to the course list.
#[derive(Clone, Copy, PartialEq)]
pub struct Notices(Signal<Option<String>>);

impl Notices {
    pub fn post(mut self, message: impl Into<String>) {
        self.0.set(Some(message.into()));
    }

    pub fn dismiss(mut self) {
        self.0.set(None);
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.0.read().clone()
    }
}

/// Provide a fresh notice slot for the current component subtree.
pub fn use_notices_provider() -> Notices {
    use_context_provider(|| Notices(Signal::new(None)))
}
