mod exam_results;
mod home;
mod notice;
mod pages;
mod state;
mod take_exam;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use exam_results::{ExamResultsView, ResultSummary};
pub use home::HomeView;
pub use notice::NoticeBanner;
pub use pages::{
    AdminHomeView, InstructorDashboardView, LoginView, StudentCourseView, StudentCoursesView,
    StudentDashboardView,
};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use take_exam::{ExamScreen, TakeExamView};
