//! Routes anyone can open.

use dioxus::prelude::*;
use ui::views::{ConfirmAttendanceView, LoginView, PublicFeedView};

use super::use_navigate;

#[component]
pub fn Login() -> Element {
    let on_navigate = use_navigate();
    rsx! { LoginView { on_navigate } }
}

#[component]
pub fn Feed() -> Element {
    let on_navigate = use_navigate();
    rsx! { PublicFeedView { on_navigate } }
}

#[component]
pub fn ConfirmAttendance() -> Element {
    let on_navigate = use_navigate();
    rsx! { ConfirmAttendanceView { on_navigate } }
}
