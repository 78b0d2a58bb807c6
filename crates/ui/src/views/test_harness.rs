use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lms_core::model::{ExamId, ExamResult, Role, User, UserId};
use lms_core::time::fixed_clock;
use services::{Clock, ExamApi, InMemoryExamApi};

use super::take_exam::{render_take_exam, use_take_exam};
use crate::context::{AppContext, UiApp, build_app_context, use_notices_provider};
use crate::views::{ExamResultsView, NoticeBanner};
use crate::vm::ExamIntent;

struct TestApp {
    api: InMemoryExamApi,
}

impl UiApp for TestApp {
    fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::new(self.api.clone())
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }

    fn current_user(&self) -> Option<User> {
        Some(User {
            id: UserId::new(1),
            username: "student".into(),
            email: None,
            roles: vec![Role::Student],
        })
    }

    fn launch_exam(&self) -> Option<ExamId> {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    TakeExam(u64),
    Results(u64),
}

/// Filled in once the exam page has mounted.
#[derive(Clone, Default)]
pub struct IntentSlot(Rc<RefCell<Option<Callback<ExamIntent>>>>);

impl IntentSlot {
    pub fn dispatch(&self) -> Callback<ExamIntent> {
        let dispatch = *self.0.borrow();
        dispatch.expect("exam page mounted")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    ctx: AppContext,
    view: ViewKind,
    intents: IntentSlot,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    use_context_provider(|| props.view);
    use_context_provider(|| props.intents.clone());
    use_notices_provider();
    rsx! {
        NoticeBanner {}
        Router::<TestRoute> {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/student/courses")]
    CoursesLanding {},
    #[route("/student/exams/results/:exam_id")]
    ResultsLanding { exam_id: u64 },
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::TakeExam(exam_id) => rsx! { TakeExamHarness { exam_id } },
        ViewKind::Results(exam_id) => rsx! { ExamResultsView { exam_id } },
    }
}

#[component]
fn TakeExamHarness(exam_id: u64) -> Element {
    let exam = use_take_exam(ExamId::new(exam_id));
    let slot = use_context::<IntentSlot>();
    *slot.0.borrow_mut() = Some(exam.dispatch);
    render_take_exam(exam)
}

#[component]
fn CoursesLanding() -> Element {
    rsx! { p { "Course list" } }
}

#[component]
fn ResultsLanding(exam_id: u64) -> Element {
    rsx! { p { "Results for exam {exam_id}" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryExamApi,
    pub intents: IntentSlot,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the rendered html contains `needle` or attempts run out.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        let mut html = self.render();
        for _ in 0..10 {
            if html.contains(needle) {
                break;
            }
            self.drive_async().await;
            html = self.render();
        }
        html
    }

    /// Keep driving while `span` of tokio time passes. Meant for paused-clock tests.
    pub async fn drive_for(&mut self, span: Duration) -> String {
        let until = tokio::time::Instant::now() + span;
        while tokio::time::Instant::now() < until {
            self.drive_async().await;
        }
        self.render()
    }

    pub fn dispatch(&mut self, intent: ExamIntent) {
        self.intents.dispatch().call(intent);
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: InMemoryExamApi) -> ViewHarness {
    setup_view_harness_with_result(view, api, None)
}

pub fn setup_view_harness_with_result(
    view: ViewKind,
    api: InMemoryExamApi,
    carried: Option<(ExamResult, u64)>,
) -> ViewHarness {
    let ctx = build_app_context(Arc::new(TestApp { api: api.clone() }));
    if let Some((result, duration_secs)) = carried {
        ctx.hand_off_result(result, duration_secs);
    }
    let intents = IntentSlot::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            ctx,
            view,
            intents: intents.clone(),
        },
    );
    ViewHarness { dom, api, intents }
}
