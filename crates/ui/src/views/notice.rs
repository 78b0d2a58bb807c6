use dioxus::prelude::*;

use crate::context::Notices;

#[component]
pub fn NoticeBanner() -> Element {
    let notices = use_context::<Notices>();
    let Some(message) = notices.current() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice", role: "alert",
            span { class: "notice__text", "{message}" }
            button {
                class: "notice__dismiss",
                r#type: "button",
                onclick: move |_| notices.dismiss(),
                "Dismiss"
            }
        }
    }
}
