//! Role gating and post-login destinations.
//!
//! Every "where should this user go" decision in the client goes through
//! [`landing_destination`] and [`authorize`].

use crate::model::{CourseId, ExamId, Role, User};

/// A place in the client a user can be sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Login,
    Home,
    AdminHome,
    InstructorDashboard,
    StudentDashboard,
    StudentCourses,
    StudentCourse(CourseId),
    TakeExam(ExamId),
    ExamResults(ExamId),
}

impl Destination {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Home => "/".into(),
            Self::AdminHome => "/admin".into(),
            Self::InstructorDashboard => "/instructor/dashboard".into(),
            Self::StudentDashboard => "/student/dashboard".into(),
            Self::StudentCourses => "/student/courses".into(),
            Self::StudentCourse(course_id) => format!("/student/courses/{course_id}"),
            Self::TakeExam(exam_id) => format!("/student/exams/take/{exam_id}"),
            Self::ExamResults(exam_id) => format!("/student/exams/results/{exam_id}"),
        }
    }
}

/// Where a user with the given roles lands by default.
///
/// Precedence is admin, then instructor, then student; anything else goes home.
#[must_use]
pub fn landing_destination(roles: &[Role]) -> Destination {
    if roles.contains(&Role::Admin) {
        Destination::AdminHome
    } else if roles.contains(&Role::Instructor) {
        Destination::InstructorDashboard
    } else if roles.contains(&Role::Student) {
        Destination::StudentDashboard
    } else {
        Destination::Home
    }
}

/// Outcome of checking a user against a route's allowed roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    Login,
    Redirect(Destination),
}

/// Check a (possibly anonymous) user against the roles a route allows.
///
/// An empty `allowed` list only requires authentication.
#[must_use]
pub fn authorize(user: Option<&User>, allowed: &[Role]) -> Access {
    let Some(user) = user else {
        return Access::Login;
    };
    if allowed.is_empty() || user.has_any_role(allowed) {
        Access::Granted
    } else {
        Access::Redirect(landing_destination(&user.roles))
    }
}
