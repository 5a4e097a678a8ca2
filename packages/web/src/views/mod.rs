use api::Navigation;
use dioxus::prelude::*;

use crate::Route;

mod admin;
pub use admin::{AdminShell, Dashboard, NewPost, PostSuccess, Settings};

mod public;
pub use public::{ConfirmAttendance, Feed, Login};

/// Turns a view's navigation request into a router call.
pub(crate) fn use_navigate() -> EventHandler<Navigation> {
    let nav = use_navigator();
    use_callback(move |request: Navigation| {
        let route = Route::from(request.to);
        if request.replace {
            nav.replace(route);
        } else {
            nav.push(route);
        }
    })
}
