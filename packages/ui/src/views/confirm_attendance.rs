use api::navigation::{require_handoff, GuardDecision};
use api::{Destination, Navigation};
use dioxus::prelude::*;
use store::whatsapp;

use crate::handoff::use_handed_post;
use crate::icons::{FaArrowLeft, FaWhatsapp};
use crate::services::use_services;
use crate::views::Spinner;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Last step before the customer opens a WhatsApp chat about a post.
#[component]
pub fn ConfirmAttendanceView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let post = use_handed_post();
    let decision = require_handoff(Destination::ConfirmAttendance, post.is_some());
    let business = use_hook(|| services.local.get_business());

    use_effect(move || {
        if let GuardDecision::Redirect(to) = decision {
            on_navigate.call(to);
        }
    });

    let Some(post) = post else {
        return rsx! { Spinner {} };
    };
    let chat = whatsapp::chat_link(&business.whatsapp, &whatsapp::interest_message(&post.title));

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page page-centered",
            header {
                class: "page-header",
                button {
                    class: "icon-btn",
                    title: "Voltar",
                    onclick: move |_| on_navigate.call(Navigation::push(Destination::Feed)),
                    Icon { icon: FaArrowLeft, width: 18, height: 18 }
                }
                h1 { class: "page-title", "{business.name}" }
            }

            article {
                class: "post-card post-card-preview",
                img { class: "post-thumb", src: "{post.image_url}", alt: "{post.title}" }
                div {
                    class: "post-body",
                    h3 { class: "post-title", "{post.title}" }
                    p { class: "post-text", "{post.description}" }
                }
            }

            p { class: "muted", "Você será levado ao WhatsApp com uma mensagem sobre este post." }
            a {
                class: "btn btn-whatsapp btn-block",
                href: "{chat}",
                target: "_blank",
                rel: "noopener noreferrer",
                Icon { icon: FaWhatsapp, width: 18, height: 18 }
                " Chamar no WhatsApp"
            }
        }
    }
}
