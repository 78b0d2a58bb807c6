use dioxus::prelude::*;
use dioxus_router::use_navigator;
use lms_core::model::{CourseId, ExamId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ExamResultVm;

#[derive(Clone, Debug, PartialEq)]
struct ResultsData {
    vm: ExamResultVm,
    course_id: Option<CourseId>,
}

#[component]
pub fn ExamResultsView(exam_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let exam_id = ExamId::new(exam_id);
    let carried = use_hook(|| ctx.take_result(exam_id));
    let api = ctx.exam_api();

    let resource = use_resource(move || {
        let api = api.clone();
        let carried = carried.clone();
        async move {
            let (result, duration_secs) = match carried {
                Some(carried) => (carried.result, Some(carried.duration_secs)),
                None => {
                    let result = api.get_exam_result(exam_id).await.map_err(|err| {
                        tracing::warn!(%exam_id, error = %err, "failed to fetch exam result");
                        ViewError::ResultUnavailable
                    })?;
                    (result, None)
                }
            };
            // The review is optional; a failed exam fetch only hides it.
            let exam = match api.get_exam(exam_id).await {
                Ok(exam) => Some(exam),
                Err(err) => {
                    tracing::warn!(%exam_id, error = %err, "exam unavailable, review hidden");
                    None
                }
            };
            Ok::<_, ViewError>(ResultsData {
                vm: ExamResultVm::new(&result, exam.as_ref(), duration_secs),
                course_id: exam.map(|exam| exam.course_id()),
            })
        }
    });
    let state = view_state_from_resource(resource);

    let back_route = move |course_id: Option<CourseId>| {
        course_id.map_or(Route::StudentCourses {}, |course_id| Route::StudentCourse {
            course_id: course_id.value(),
        })
    };

    rsx! {
        div { class: "page results-page",
            h2 { "Exam results" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::StudentCourses {});
                        },
                        "Back to courses"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    ResultSummary { vm: data.vm.clone() }
                    footer { class: "results__actions",
                        if data.vm.can_retake {
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::TakeExam { exam_id: exam_id.value() });
                                },
                                "Retake exam"
                            }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(back_route(data.course_id));
                            },
                            "Back to course"
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ResultSummary(vm: ExamResultVm) -> Element {
    rsx! {
        section { class: "result",
            div { class: "result__headline",
                span { class: "result__score", "{vm.score_label}" }
                span { class: vm.status_class, "{vm.status_label}" }
            }
            p { "{vm.correct_label}" }
            p { "{vm.passing_label}" }
            p { class: "result__date", "{vm.submitted_label}" }
            if let Some(duration) = vm.duration_label.as_ref() {
                p { class: "result__duration", "{duration}" }
            }
            if let Some(feedback) = vm.feedback.as_ref() {
                blockquote { class: "result__feedback", "{feedback}" }
            }
            if !vm.review.is_empty() {
                h3 { "Review" }
                ol { class: "review",
                    for row in vm.review.iter() {
                        li { key: "{row.number}", class: row.class,
                            p { class: "review__question", "{row.question}" }
                            p { "Your answer: {row.selected}" }
                            if let Some(correct) = row.correct.as_ref() {
                                p { "Correct answer: {correct}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
