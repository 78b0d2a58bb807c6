use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use lms_core::access::{Access, Destination, authorize, landing_destination};
use lms_core::model::Role;

use crate::context::{AppContext, use_notices_provider};
use crate::views::{
    AdminHomeView, ExamResultsView, HomeView, InstructorDashboardView, LoginView,
    NoticeBanner, StudentCourseView, StudentCoursesView, StudentDashboardView, TakeExamView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/admin", AdminHomeView)] AdminHome {},
        #[route("/instructor/dashboard", InstructorDashboardView)] InstructorDashboard {},
        #[route("/student/dashboard", StudentDashboardView)] StudentDashboard {},
        #[route("/student/courses", StudentCoursesView)] StudentCourses {},
        #[route("/student/courses/:course_id", StudentCourseView)] StudentCourse { course_id: u64 },
        #[layout(StudentGuard)]
            #[route("/student/exams/take/:exam_id", TakeExamView)] TakeExam { exam_id: u64 },
            #[route("/student/exams/results/:exam_id", ExamResultsView)] ExamResults { exam_id: u64 },
}

/// Router target for a destination chosen by the access rules.
#[must_use]
pub fn route_for(destination: Destination) -> Route {
    match destination {
        Destination::Login => Route::Login {},
        Destination::Home => Route::Home {},
        Destination::AdminHome => Route::AdminHome {},
        Destination::InstructorDashboard => Route::InstructorDashboard {},
        Destination::StudentDashboard => Route::StudentDashboard {},
        Destination::StudentCourses => Route::StudentCourses {},
        Destination::StudentCourse(course_id) => Route::StudentCourse {
            course_id: course_id.value(),
        },
        Destination::TakeExam(exam_id) => Route::TakeExam {
            exam_id: exam_id.value(),
        },
        Destination::ExamResults(exam_id) => Route::ExamResults {
            exam_id: exam_id.value(),
        },
    }
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_notices_provider();
    let home = ctx
        .current_user()
        .map_or(Destination::Login, |user| landing_destination(&user.roles));
    let username = ctx
        .current_user()
        .map(|user| user.username.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { class: "topbar__title", "LMS" }
                nav { class: "topbar__nav",
                    Link { to: route_for(home), "Home" }
                    Link { to: Route::StudentCourses {}, "Courses" }
                }
                if !username.is_empty() {
                    span { class: "topbar__user", "{username}" }
                }
            }
            NoticeBanner {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

/// Lets students through; everyone else is sent to login or their own landing page.
#[component]
fn StudentGuard() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let access = authorize(ctx.current_user(), &[Role::Student]);
    let redirect = match access {
        Access::Granted => None,
        Access::Login => Some(Route::Login {}),
        Access::Redirect(destination) => Some(route_for(destination)),
    };

    use_effect({
        let redirect = redirect.clone();
        move || {
            if let Some(target) = redirect.clone() {
                tracing::info!(path = %target, "student route denied");
                let _ = navigator.replace(target);
            }
        }
    });

    if redirect.is_some() {
        return rsx! {};
    }
    rsx! { Outlet::<Route> {} }
}
