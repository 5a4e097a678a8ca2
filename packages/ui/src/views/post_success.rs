use api::navigation::{require_handoff, GuardDecision};
use api::{Destination, Navigation};
use dioxus::prelude::*;

use crate::handoff::use_handed_post;
use crate::icons::FaCircleCheck;
use crate::views::Spinner;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Confirmation after publishing, showing the post that was just created.
#[component]
pub fn PostSuccessView(on_navigate: EventHandler<Navigation>) -> Element {
    let post = use_handed_post();
    let decision = require_handoff(Destination::PostSuccess, post.is_some());

    use_effect(move || {
        if let GuardDecision::Redirect(to) = decision {
            on_navigate.call(to);
        }
    });

    let Some(post) = post else {
        return rsx! { Spinner {} };
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page page-centered",
            div {
                class: "success-icon",
                Icon { icon: FaCircleCheck, width: 48, height: 48 }
            }
            h1 { class: "page-title", "Status publicado!" }
            p { class: "muted", "Seu post já aparece no feed para os clientes." }

            article {
                class: "post-card post-card-preview",
                img { class: "post-thumb", src: "{post.image_url}", alt: "{post.title}" }
                div {
                    class: "post-body",
                    h3 { class: "post-title", "{post.title}" }
                    p { class: "post-text", "{post.description}" }
                }
            }

            button {
                class: "btn btn-primary btn-block",
                onclick: move |_| on_navigate.call(Navigation::replace(Destination::Dashboard)),
                "Voltar ao painel"
            }
        }
    }
}
