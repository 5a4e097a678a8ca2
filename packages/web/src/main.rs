use api::Destination;
use dioxus::prelude::*;

use ui::AppProvider;
use views::{AdminShell, ConfirmAttendance, Dashboard, Feed, Login, NewPost, PostSuccess, Settings};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[layout(AdminShell)]
        #[route("/admin")]
        Dashboard {},
        #[route("/new-post")]
        NewPost {},
        #[route("/settings")]
        Settings {},
        #[route("/post-success")]
        PostSuccess {},
    #[end_layout]
    #[route("/feed")]
    Feed {},
    #[route("/confirm-attendance")]
    ConfirmAttendance {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Route::Login {},
            Destination::Dashboard => Route::Dashboard {},
            Destination::NewPost => Route::NewPost {},
            Destination::Settings => Route::Settings {},
            Destination::PostSuccess => Route::PostSuccess {},
            Destination::Feed => Route::Feed {},
            Destination::ConfirmAttendance => Route::ConfirmAttendance {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Hash routes, so any static host can serve the app from one index.html.
    #[cfg(feature = "web")]
    {
        use std::rc::Rc;

        let history = Rc::new(dioxus::web::HashHistory::new(false));
        dioxus::LaunchBuilder::new()
            .with_cfg(dioxus::web::Config::new().history(history))
            .launch(App);
    }

    #[cfg(not(feature = "web"))]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Status Pro" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/login`
#[component]
fn Root() -> Element {
    redirect_to_fallback()
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::info!(path = %segments.join("/"), "unknown route");
    redirect_to_fallback()
}

fn redirect_to_fallback() -> Element {
    let nav = use_navigator();
    let fallback = api::navigation::fallback();
    nav.replace(Route::from(fallback.to));
    rsx! {}
}
