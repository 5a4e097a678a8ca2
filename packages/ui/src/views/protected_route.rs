use api::navigation::{guard, GuardDecision};
use api::Navigation;
use dioxus::prelude::*;

use crate::auth::use_auth;

/// Renders `children` only for a signed-in user.
///
/// While the session resolves a spinner is shown; a visitor without a
/// session is sent to the login page with the history entry replaced.
#[component]
pub fn ProtectedRoute(on_navigate: EventHandler<Navigation>, children: Element) -> Element {
    let auth = use_auth();

    use_effect(move || {
        if let GuardDecision::Redirect(to) = guard(&auth()) {
            tracing::info!(to = to.to.path(), "not signed in");
            on_navigate.call(to);
        }
    });

    match guard(&auth()) {
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Wait | GuardDecision::Redirect(_) => rsx! { Spinner {} },
    }
}

/// Neutral waiting indicator.
#[component]
pub fn Spinner() -> Element {
    rsx! {
        div {
            class: "spinner-page",
            div { class: "spinner", role: "status", aria_label: "Carregando" }
        }
    }
}
