//! Routes behind the sign-in guard.

use dioxus::prelude::*;
use ui::views::{DashboardView, NewPostView, PostSuccessView, ProtectedRoute, SettingsView};

use super::use_navigate;
use crate::Route;

/// Layout of every admin route: nothing renders until the session resolves
/// to a signed-in user.
#[component]
pub fn AdminShell() -> Element {
    let on_navigate = use_navigate();
    rsx! {
        ProtectedRoute {
            on_navigate,
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let on_navigate = use_navigate();
    rsx! { DashboardView { on_navigate } }
}

#[component]
pub fn NewPost() -> Element {
    let on_navigate = use_navigate();
    rsx! { NewPostView { on_navigate } }
}

#[component]
pub fn Settings() -> Element {
    let on_navigate = use_navigate();
    rsx! { SettingsView { on_navigate } }
}

#[component]
pub fn PostSuccess() -> Element {
    let on_navigate = use_navigate();
    rsx! { PostSuccessView { on_navigate } }
}
