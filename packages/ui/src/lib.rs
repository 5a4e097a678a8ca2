//! This crate contains all shared UI for the workspace.
//!
//! Views receive an `on_navigate` handler and never touch the router; the
//! app crate maps each [`api::Destination`] to its route.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaWhatsapp;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod services;
pub use services::{login_redirect_target, make_storage, public_feed_url, use_services, AppServices, Auth, Storage};

mod auth;
pub use auth::{use_auth, AuthProvider};

mod handoff;
pub use handoff::{use_handed_post, use_handoff, Handoff};

mod notice;
pub use notice::{use_notice, Notice, NoticeHost};

mod upload;

pub mod views;

/// Provides services, the handoff slot and notices, then the session context.
#[component]
pub fn AppProvider(children: Element) -> Element {
    use_context_provider(AppServices::from_env);
    use_context_provider(Handoff::new);
    use_context_provider(Notice::new);

    rsx! {
        AuthProvider {
            {children}
            NoticeHost {}
        }
    }
}
