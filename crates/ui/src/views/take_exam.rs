use dioxus::prelude::*;
use dioxus_router::use_navigator;
use lms_core::model::{ExamId, ExamResult};
use services::{
    CountdownTicker, ExamSession, SessionError, SessionPhase, SessionTick, SubmitDecision,
    SubmitTrigger,
};

use crate::context::{AppContext, Notices};
use crate::routes::{Route, route_for};
use crate::views::ViewError;
use crate::vm::{ExamIntent, TakeExamVm, confirmation_message};

const TIME_UP_NOTICE: &str = "Time is up. Your answers are being submitted.";

#[component]
pub fn TakeExamView(exam_id: u64) -> Element {
    let exam = use_take_exam(ExamId::new(exam_id));
    render_take_exam(exam)
}

/// Signals behind the exam page plus the intent dispatcher that drives them.
#[derive(Clone, Copy)]
pub(crate) struct TakeExamState {
    session: Signal<Option<ExamSession>>,
    pending_confirmation: Signal<Option<usize>>,
    error: Signal<Option<ViewError>>,
    load_error: Signal<Option<ViewError>>,
    pub(crate) dispatch: Callback<ExamIntent>,
}

/// Load the exam, run its countdown and handle intents for the current scope.
pub(crate) fn use_take_exam(exam_id: ExamId) -> TakeExamState {
    let ctx = use_context::<AppContext>();
    let notices = use_context::<Notices>();
    let navigator = use_navigator();

    let mut session = use_signal(|| None::<ExamSession>);
    let mut pending_confirmation = use_signal(|| None::<usize>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut load_error = use_signal(|| None::<ViewError>);

    let finish = {
        let ctx = ctx.clone();
        use_callback(move |outcome: Result<ExamResult, SessionError>| {
            let mut guard = session.write();
            let Some(active) = guard.as_mut() else {
                return;
            };
            match outcome {
                Ok(result) => {
                    if active.complete_submission(result.clone()).is_err() {
                        return;
                    }
                    let duration_secs = active.elapsed_secs(&ctx.clock());
                    drop(guard);
                    ctx.hand_off_result(result, duration_secs);
                    let _ = navigator.push(Route::ExamResults {
                        exam_id: exam_id.value(),
                    });
                }
                Err(_) => {
                    if active.fail_submission().is_ok() {
                        error.set(Some(ViewError::SubmissionFailed));
                    }
                }
            }
        })
    };

    // Owned by the component: unmounting drops the ticker with it.
    let loader = ctx.loader();
    let dispatcher = ctx.dispatcher();
    use_future(move || {
        let loader = loader.clone();
        let dispatcher = dispatcher.clone();
        async move {
            match loader.load(exam_id).await {
                Ok(loaded) => session.set(Some(loaded)),
                Err(err) => {
                    notices.post(ViewError::ExamUnavailable.message());
                    load_error.set(Some(ViewError::ExamUnavailable));
                    if let Some(fallback) = err.fallback() {
                        let _ = navigator.replace(route_for(fallback));
                    }
                    return;
                }
            }

            // The first second is counted from when the exam is on screen.
            let mut ticker = CountdownTicker::every_second();
            while ticker.next_tick().await.is_some() {
                let step = session.write().as_mut().map(ExamSession::tick);
                if let Some(SessionTick::AutoSubmit(submission)) = step {
                    notices.post(TIME_UP_NOTICE);
                    let outcome = dispatcher.send(&submission).await;
                    finish.call(outcome);
                }
                // Expired leaves only a manual retry, which needs no clock.
                let done = session.peek().as_ref().is_none_or(|active| {
                    active.phase() == SessionPhase::Submitted || active.is_expired()
                });
                if done {
                    ticker.stop();
                }
            }
        }
    });

    let dispatcher = ctx.dispatcher();
    let dispatch_intent = use_callback(move |intent: ExamIntent| {
        let trigger = match intent {
            ExamIntent::Select(option) => {
                if let Some(active) = session.write().as_mut()
                    && let Err(err) = active.select_current(option)
                {
                    tracing::debug!(error = %err, "selection ignored");
                }
                return;
            }
            ExamIntent::Next => {
                if let Some(active) = session.write().as_mut() {
                    active.next();
                }
                return;
            }
            ExamIntent::Previous => {
                if let Some(active) = session.write().as_mut() {
                    active.previous();
                }
                return;
            }
            ExamIntent::Jump(index) => {
                if let Some(active) = session.write().as_mut() {
                    let _ = active.jump_to(index);
                }
                return;
            }
            ExamIntent::CancelSubmit => {
                pending_confirmation.set(None);
                return;
            }
            ExamIntent::Submit => SubmitTrigger::Manual,
            ExamIntent::ConfirmSubmit => {
                pending_confirmation.set(None);
                SubmitTrigger::Confirmed
            }
        };

        let decision = session
            .write()
            .as_mut()
            .map(|active| active.request_submit(trigger));
        match decision {
            Some(SubmitDecision::Confirm { unanswered }) => {
                pending_confirmation.set(Some(unanswered));
            }
            Some(SubmitDecision::Dispatch(submission)) => {
                error.set(None);
                let dispatcher = dispatcher.clone();
                spawn(async move {
                    let outcome = dispatcher.send(&submission).await;
                    finish.call(outcome);
                });
            }
            Some(SubmitDecision::Suppressed) | None => {}
        }
    });

    TakeExamState {
        session,
        pending_confirmation,
        error,
        load_error,
        dispatch: dispatch_intent,
    }
}

pub(crate) fn render_take_exam(exam: TakeExamState) -> Element {
    let vm = exam.session.read().as_ref().map(TakeExamVm::from_session);
    let on_intent = exam.dispatch;
    let load_error = *exam.load_error.read();
    let error = *exam.error.read();
    let pending = *exam.pending_confirmation.read();

    rsx! {
        div { class: "page exam-page",
            match (load_error, vm) {
                (Some(err), _) => rsx! {
                    p { "{err.message()}" }
                },
                (_, Some(vm)) => rsx! {
                    ExamScreen { vm, on_intent, error }
                },
                _ => rsx! {
                    p { "Loading exam..." }
                },
            }
            if let Some(unanswered) = pending {
                ConfirmSubmitDialog { unanswered, on_intent }
            }
        }
    }
}

#[component]
pub fn ExamScreen(
    vm: TakeExamVm,
    on_intent: Callback<ExamIntent>,
    error: Option<ViewError>,
) -> Element {
    let countdown_class = if vm.urgent {
        "countdown countdown--urgent"
    } else {
        "countdown"
    };

    rsx! {
        div { class: "exam",
            header { class: "exam__header",
                div { class: "exam__heading",
                    h2 { class: "exam__title", "{vm.title}" }
                    if !vm.description.is_empty() {
                        p { class: "exam__description", "{vm.description}" }
                    }
                }
                span { class: countdown_class, id: "exam-countdown", "{vm.countdown_label}" }
            }
            div { class: "exam__progress",
                span { class: "exam__position", "{vm.position_label}" }
                div { class: "progress",
                    div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
                }
            }
            div { class: "exam__body",
                section { class: "question",
                    p { class: "question__text", "{vm.question_text}" }
                    div { class: "question__options",
                        {vm.options.iter().map(|option| {
                            let index = option.index;
                            let class = if option.selected { "option option--selected" } else { "option" };
                            rsx! {
                                button {
                                    key: "{index}",
                                    class,
                                    r#type: "button",
                                    disabled: vm.submitting,
                                    onclick: move |_| on_intent.call(ExamIntent::Select(index)),
                                    "{option.label}"
                                }
                            }
                        })}
                    }
                    if vm.show_unanswered_warning {
                        p { class: "question__warning", "Please select an answer before proceeding" }
                    }
                }
                aside { class: "picker",
                    p { class: "picker__summary", "{vm.answered} of {vm.total} answered" }
                    div { class: "picker__grid",
                        {vm.picker.iter().map(|item| {
                            let index = item.index;
                            rsx! {
                                button {
                                    key: "{index}",
                                    class: item.state.class(),
                                    r#type: "button",
                                    onclick: move |_| on_intent.call(ExamIntent::Jump(index)),
                                    "{item.label}"
                                }
                            }
                        })}
                    }
                }
            }
            if let Some(err) = error {
                p { class: "exam__error", role: "alert", "{err.message()}" }
            }
            footer { class: "exam__footer",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_previous,
                    onclick: move |_| on_intent.call(ExamIntent::Previous),
                    "Previous"
                }
                if !vm.is_last {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: !vm.can_next,
                        onclick: move |_| on_intent.call(ExamIntent::Next),
                        "Next"
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "exam-submit",
                    r#type: "button",
                    disabled: vm.submitting,
                    onclick: move |_| on_intent.call(ExamIntent::Submit),
                    "{vm.submit_label}"
                }
            }
        }
    }
}

#[component]
fn ConfirmSubmitDialog(unanswered: usize, on_intent: Callback<ExamIntent>) -> Element {
    let message = confirmation_message(unanswered);

    rsx! {
        div { class: "overlay",
            div {
                class: "dialog",
                role: "dialog",
                aria_modal: "true",
                p { class: "dialog__message", "{message}" }
                div { class: "dialog__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(ExamIntent::CancelSubmit),
                        "Keep answering"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(ExamIntent::ConfirmSubmit),
                        "Submit anyway"
                    }
                }
            }
        }
    }
}
