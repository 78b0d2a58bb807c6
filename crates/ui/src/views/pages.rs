use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use lms_core::model::{CourseId, ExamId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn LoginView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Sign in" }
            p { "Start the client with an API token (--token or LMS_API_TOKEN) and your roles (--roles or LMS_USER_ROLES)." }
        }
    }
}

#[component]
pub fn AdminHomeView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Administration" }
        }
    }
}

#[component]
pub fn InstructorDashboardView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Instructor dashboard" }
        }
    }
}

#[component]
pub fn StudentDashboardView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Student dashboard" }
            Link { to: Route::StudentCourses {}, "My courses" }
        }
    }
}

#[component]
pub fn StudentCoursesView() -> Element {
    let navigator = use_navigator();
    let mut course_input = use_signal(String::new);
    let parsed = course_input.read().parse::<CourseId>().ok();

    rsx! {
        div { class: "page",
            h2 { "My courses" }
            div { class: "course-open",
                input {
                    class: "course-open__input",
                    placeholder: "Course id",
                    value: "{course_input}",
                    oninput: move |evt| course_input.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: parsed.is_none(),
                    onclick: move |_| {
                        if let Some(course_id) = parsed {
                            let _ = navigator.push(Route::StudentCourse {
                                course_id: course_id.value(),
                            });
                        }
                    },
                    "Open course"
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct CourseExamRow {
    exam_id: ExamId,
    title: String,
    details: String,
    last_score: Option<String>,
}

#[component]
pub fn StudentCourseView(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let course_id = CourseId::new(course_id);
    let api = ctx.exam_api();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            let exams = api.list_course_exams(course_id).await.map_err(|err| {
                tracing::warn!(%course_id, error = %err, "failed to list course exams");
                ViewError::Unknown
            })?;
            let results = api.list_my_results(course_id).await.unwrap_or_else(|err| {
                tracing::warn!(%course_id, error = %err, "failed to list my results");
                Vec::new()
            });
            let rows = exams
                .iter()
                .map(|exam| CourseExamRow {
                    exam_id: exam.id(),
                    title: exam.title().to_string(),
                    details: format!(
                        "{} questions, {} min, pass at {}%",
                        exam.question_count(),
                        exam.time_limit_minutes(),
                        exam.passing_score()
                    ),
                    last_score: results
                        .iter()
                        .filter(|result| result.exam_id == exam.id())
                        .max_by_key(|result| result.submitted_at)
                        .map(|result| format!("Last score: {:.0}%", result.score)),
                })
                .collect::<Vec<_>>();
            Ok::<_, ViewError>(rows)
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Course {course_id}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(rows) if rows.is_empty() => rsx! {
                    p { "No exams in this course yet." }
                },
                ViewState::Ready(rows) => rsx! {
                    ul { class: "exam-list",
                        for row in rows {
                            li { key: "{row.exam_id}", class: "exam-list__item",
                                h3 { "{row.title}" }
                                p { "{row.details}" }
                                if let Some(score) = row.last_score.as_ref() {
                                    p { class: "exam-list__score", "{score}" }
                                }
                                Link {
                                    to: Route::TakeExam { exam_id: row.exam_id.value() },
                                    "Take exam"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
