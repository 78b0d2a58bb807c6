use std::time::Duration;

use dioxus::prelude::*;
use lms_core::model::{
    AnswerSheet, CourseId, Exam, ExamId, ExamResult, ExamResultId, Question, QuestionId,
    Submission, UserId,
};
use lms_core::time::{fixed_clock, fixed_now};
use services::{ExamApi, ExamSession, InMemoryExamApi, SubmitTrigger};

use super::test_harness::{
    ViewKind, drive_dom, setup_view_harness, setup_view_harness_with_result,
};
use crate::views::{ExamScreen, ViewError};
use crate::vm::{ExamIntent, TakeExamVm, confirmation_message};

fn exam() -> Exam {
    Exam::new(
        ExamId::new(12),
        "Lifetimes",
        "Borrowing across scopes",
        CourseId::new(3),
        vec![
            Question::new(
                QuestionId::new(1),
                "How long does a static borrow live?",
                vec!["Lives for the whole program".into(), "Stack only".into()],
            )
            .with_correct_option(0),
            Question::new(
                QuestionId::new(2),
                "Can a reference outlive its referent?",
                vec!["Yes".into(), "No".into()],
            )
            .with_correct_option(1),
        ],
        1,
        50,
    )
    .unwrap()
}

fn api_with_exam() -> InMemoryExamApi {
    let api = InMemoryExamApi::new().with_clock(fixed_clock());
    api.insert_exam(exam()).unwrap();
    api
}

#[tokio::test(flavor = "current_thread")]
async fn take_exam_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::TakeExam(12), api_with_exam());
    harness.rebuild();

    let html = harness.drive_until("Question 1 of 2").await;

    assert!(html.contains("Lifetimes"), "missing title in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(
        html.contains("How long does a static borrow live?"),
        "missing question in {html}"
    );
    assert!(
        html.contains("Please select an answer before proceeding"),
        "missing warning in {html}"
    );
    assert_eq!(harness.api.exam_lookups().unwrap(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn take_exam_view_sends_learner_back_to_courses_when_exam_is_missing() {
    let mut harness = setup_view_harness(ViewKind::TakeExam(99), api_with_exam());
    harness.rebuild();

    let html = harness.drive_until("Course list").await;

    assert!(html.contains("Course list"), "no redirect in {html}");
    assert!(
        html.contains(ViewError::ExamUnavailable.message()),
        "missing notice in {html}"
    );
    assert!(!html.contains("Question 1 of"), "exam screen still shown in {html}");
    assert!(harness.api.submissions().unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn submit_with_gaps_asks_first_and_cancel_sends_nothing() {
    let mut harness = setup_view_harness(ViewKind::TakeExam(12), api_with_exam());
    harness.rebuild();
    harness.drive_until("Question 1 of 2").await;

    harness.dispatch(ExamIntent::Select(0));
    harness.dispatch(ExamIntent::Submit);
    let html = harness.render();
    assert!(
        html.contains(&confirmation_message(1)),
        "missing dialog in {html}"
    );

    harness.dispatch(ExamIntent::CancelSubmit);
    let html = harness.render();
    assert!(!html.contains("Submit anyway"), "dialog still open in {html}");
    assert!(harness.api.submissions().unwrap().is_empty());

    harness.dispatch(ExamIntent::Submit);
    harness.dispatch(ExamIntent::ConfirmSubmit);
    let html = harness.drive_until("Results for exam 12").await;

    assert!(html.contains("Results for exam 12"), "no navigation in {html}");
    let submissions = harness.api.submissions().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].answers(), &[0, -1]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_expiry_submits_once_without_asking() {
    let mut harness = setup_view_harness(ViewKind::TakeExam(12), api_with_exam());
    harness.rebuild();
    harness.drive_until("Question 1 of 2").await;
    harness.dispatch(ExamIntent::Select(1));

    let html = harness.drive_for(Duration::from_secs(65)).await;

    let submissions = harness.api.submissions().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].answers(), &[1, -1]);
    assert!(html.contains("Time is up"), "missing notice in {html}");
    assert!(html.contains("Results for exam 12"), "no navigation in {html}");
    assert!(!html.contains("Submit anyway"), "unexpected dialog in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_auto_submit_keeps_answers_for_a_manual_retry() {
    let api = api_with_exam();
    api.fail_next_submissions(1).unwrap();
    let mut harness = setup_view_harness(ViewKind::TakeExam(12), api);
    harness.rebuild();
    harness.drive_until("Question 1 of 2").await;
    harness.dispatch(ExamIntent::Select(1));

    let html = harness.drive_for(Duration::from_secs(65)).await;
    assert!(
        html.contains(ViewError::SubmissionFailed.message()),
        "missing failure in {html}"
    );
    assert!(html.contains("0:00"), "countdown moved in {html}");

    // No further ticks means no second automatic attempt.
    harness.drive_for(Duration::from_secs(10)).await;
    assert_eq!(harness.api.submissions().unwrap().len(), 1);

    harness.dispatch(ExamIntent::Submit);
    let html = harness.drive_until("Results for exam 12").await;

    assert!(!html.contains("Submit anyway"), "unexpected dialog in {html}");
    let submissions = harness.api.submissions().unwrap();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[1].answers(), &[1, -1]);
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_uses_carried_result() {
    let carried = ExamResult {
        id: ExamResultId::new(1),
        exam_id: ExamId::new(12),
        student_id: UserId::new(1),
        score: 100.0,
        passing_score: 50.0,
        submitted_at: fixed_now(),
        correct_answers: 2,
        total_questions: 2,
        feedback: "Great work".into(),
        passed: true,
        answers: vec![0, 1],
    };
    // Nothing was submitted to the api, so a refetch would fail.
    let mut harness = setup_view_harness_with_result(
        ViewKind::Results(12),
        api_with_exam(),
        Some((carried, 83)),
    );
    harness.rebuild();

    let html = harness.drive_until("Passed").await;

    assert!(html.contains("100%"), "missing score in {html}");
    assert!(html.contains("Great work"), "missing feedback in {html}");
    assert!(html.contains("Time taken: 1:23"), "missing duration in {html}");
    assert!(html.contains("Correct answer: No"), "missing review in {html}");
    assert!(!html.contains("Retake exam"), "unexpected retake in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_hides_review_when_exam_is_gone() {
    let carried = ExamResult {
        id: ExamResultId::new(2),
        exam_id: ExamId::new(12),
        student_id: UserId::new(1),
        score: 50.0,
        passing_score: 50.0,
        submitted_at: fixed_now(),
        correct_answers: 1,
        total_questions: 2,
        feedback: String::new(),
        passed: true,
        answers: vec![0, -1],
    };
    let api = InMemoryExamApi::new().with_clock(fixed_clock());
    let mut harness =
        setup_view_harness_with_result(ViewKind::Results(12), api, Some((carried, 5)));
    harness.rebuild();

    let html = harness.drive_until("Passed").await;

    assert!(html.contains("1 of 2 correct"), "missing counts in {html}");
    assert!(!html.contains("Review"), "unexpected review in {html}");
    assert!(html.contains("Back to course"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_fetches_when_nothing_was_carried() {
    let api = api_with_exam();
    let sheet = AnswerSheet::for_exam(&exam());
    api.submit_exam(ExamId::new(12), &Submission::from_sheet(ExamId::new(12), &sheet))
        .await
        .unwrap();
    let mut harness = setup_view_harness(ViewKind::Results(12), api);
    harness.rebuild();

    let html = harness.drive_until("Failed").await;

    assert!(html.contains("0 of 2 correct"), "missing counts in {html}");
    assert!(html.contains("Retake exam"), "missing retake in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_reports_missing_result() {
    let mut harness = setup_view_harness(ViewKind::Results(12), api_with_exam());
    harness.rebuild();

    let html = harness
        .drive_until("The exam result could not be loaded.")
        .await;

    assert!(html.contains("Back to courses"), "missing fallback link in {html}");
}

#[derive(Props, Clone, PartialEq)]
struct ScreenProps {
    vm: TakeExamVm,
}

#[component]
fn ScreenHarness(props: ScreenProps) -> Element {
    let on_intent = use_callback(|_: ExamIntent| {});
    rsx! { ExamScreen { vm: props.vm.clone(), on_intent } }
}

fn render_screen(session: &ExamSession) -> String {
    let mut dom = VirtualDom::new_with_props(
        ScreenHarness,
        ScreenProps {
            vm: TakeExamVm::from_session(session),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}

#[test]
fn exam_screen_hides_warning_once_answered() {
    let mut session = ExamSession::start(exam(), fixed_now());
    session.select_current(1).unwrap();

    let html = render_screen(&session);

    assert!(!html.contains("Please select an answer before proceeding"));
    assert!(html.contains("1 of 2 answered"), "missing summary in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
}

#[test]
fn exam_screen_shows_submitting_label_while_in_flight() {
    let mut session = ExamSession::start(exam(), fixed_now());
    session.request_submit(SubmitTrigger::Confirmed);

    let html = render_screen(&session);

    assert!(html.contains("Submitting..."), "missing label in {html}");
}
