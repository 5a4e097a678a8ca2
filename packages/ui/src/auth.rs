//! Authentication context and hooks for the UI.

use api::SessionState;
use dioxus::prelude::*;

use crate::services::use_services;

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that owns the session signal.
///
/// Resolves the session once on mount (picking up a login link landing),
/// then mirrors every change the [`api::AuthService`] publishes, including
/// sign-ins and sign-outs made in other tabs. Nothing else writes the signal.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_services();
    let mut auth_state = use_context_provider(|| Signal::new(SessionState::Resolving));

    // Must run before the router reads the location.
    let landing = use_hook(take_landing_fragment);

    let auth = services.auth.clone();
    use_future(move || {
        let auth = auth.clone();
        let landing = landing.clone();
        async move {
            let mut changes = auth.subscribe();
            auth.resolve(landing.as_deref()).await;
            loop {
                let next = changes.borrow_and_update().clone();
                if *auth_state.peek() != next {
                    auth_state.set(next);
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let auth = services.auth.clone();
    use_future(move || {
        let auth = auth.clone();
        async move {
            let mut other_tabs = listen_for_session_changes();
            while other_tabs.recv().await.is_some() {
                tracing::info!("session changed in another tab");
                auth.resolve(None).await;
            }
        }
    });

    rsx! {
        {children}
    }
}

/// The `#access_token=...` (or `#error=...`) fragment a login link lands on.
///
/// The fragment is removed from the address bar so the hash router sees
/// `/login` instead of an unknown path.
#[cfg(target_arch = "wasm32")]
fn take_landing_fragment() -> Option<String> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    if !(hash.contains("access_token=") || hash.contains("error_description=")) {
        return None;
    }
    if let Ok(history) = window.history() {
        let login = format!("#{}", api::Destination::Login.path());
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(login.as_str())) {
            tracing::warn!(error = ?e, "could not clear login fragment");
        }
    }
    Some(hash)
}

#[cfg(not(target_arch = "wasm32"))]
fn take_landing_fragment() -> Option<String> {
    None
}

/// A channel that yields whenever another tab changes the stored session.
///
/// The browser fires `storage` only in the tabs that did not make the change.
/// A `None` key means the whole storage was cleared.
#[cfg(target_arch = "wasm32")]
fn listen_for_session_changes() -> tokio::sync::mpsc::UnboundedReceiver<()> {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let Some(window) = web_sys::window() else {
        return rx;
    };
    let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
        let relevant = event
            .key()
            .map_or(true, |key| key == api::auth::SESSION_KEY);
        if relevant {
            let _ = tx.send(());
        }
    });
    if let Err(e) =
        window.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
    {
        tracing::warn!(error = ?e, "could not listen for storage events");
    }
    // Lives as long as the page.
    on_storage.forget();
    rx
}

#[cfg(not(target_arch = "wasm32"))]
fn listen_for_session_changes() -> tokio::sync::mpsc::UnboundedReceiver<()> {
    let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
    rx
}
