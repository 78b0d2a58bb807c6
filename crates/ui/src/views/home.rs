use dioxus::prelude::*;
use dioxus_router::use_navigator;
use lms_core::access::{Destination, landing_destination};
use lms_core::model::Role;

use crate::context::AppContext;
use crate::routes::route_for;

/// Where the root path sends the current user, if anywhere.
fn start_destination(ctx: &AppContext) -> Option<Destination> {
    let Some(user) = ctx.current_user() else {
        return Some(Destination::Login);
    };
    if user.has_role(&Role::Student)
        && let Some(exam_id) = ctx.take_launch_exam()
    {
        return Some(Destination::TakeExam(exam_id));
    }
    match landing_destination(&user.roles) {
        Destination::Home => None,
        other => Some(other),
    }
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let target = use_hook(|| start_destination(&ctx));

    use_effect(move || {
        if let Some(destination) = target {
            let _ = navigator.replace(route_for(destination));
        }
    });

    let username = ctx
        .current_user()
        .map(|user| user.username.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "page",
            h2 { "Home" }
            if target.is_none() {
                p { "Signed in as {username}. There is nothing assigned to your role here yet." }
            }
        }
    }
}
