//! Public feed: the business profile and its active posts.
//!
//! Reads the device-local store only, the posts through its
//! [`PostStore`], so it renders the same whether or not an owner is signed
//! in on this device.

use api::{Destination, Navigation};
use dioxus::prelude::*;
use store::{clock, whatsapp, Post, PostStore};

use crate::handoff::use_handoff;
use crate::icons::{FaCircleCheck, FaWhatsapp};
use crate::services::use_services;
use crate::views::Spinner;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn PublicFeedView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let handoff = use_handoff();
    let business = use_hook(|| services.local.get_business());
    let store = services.posts.clone();
    let posts = use_resource(move || {
        let store = store.clone();
        async move {
            store.list_active_posts().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not read local posts");
                Vec::new()
            })
        }
    });

    let contact = whatsapp::contact_link(&business.whatsapp);
    let theme = format!("feed theme-{}", business.theme.as_str());

    let on_interest = move |post: Post| {
        handoff.give(post);
        on_navigate.call(Navigation::push(Destination::ConfirmAttendance));
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "{theme}",
            header {
                class: "feed-header",
                if !business.logo_url.is_empty() {
                    img { class: "feed-logo", src: "{business.logo_url}", alt: "{business.name}" }
                }
                h1 {
                    class: "feed-name",
                    "{business.name}"
                    if business.is_verified {
                        span {
                            class: "verified",
                            title: "Verificado",
                            Icon { icon: FaCircleCheck, width: 16, height: 16 }
                        }
                    }
                }
                if !business.bio.is_empty() {
                    p { class: "feed-bio", "{business.bio}" }
                }
                a {
                    class: "btn btn-whatsapp",
                    href: "{contact}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    Icon { icon: FaWhatsapp, width: 16, height: 16 }
                    " Falar no WhatsApp"
                }
            }

            {match posts() {
                None => rsx! { Spinner {} },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-state muted", "Nenhum status no momento." }
                },
                Some(list) => rsx! {
                    for post in list {
                        FeedPost {
                            key: "{post.id}",
                            post,
                            on_interest,
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn FeedPost(post: Post, on_interest: EventHandler<Post>) -> Element {
    let posted = clock::posted_on(post.created_at);
    let chosen = post.clone();

    rsx! {
        article {
            class: "feed-post",
            div {
                class: "feed-media",
                img { src: "{post.image_url}", alt: "{post.title}" }
                if post.is_new {
                    span { class: "badge badge-new", "Novo" }
                }
                if post.is_offer {
                    span { class: "badge badge-offer", "Oferta" }
                }
            }
            div {
                class: "post-body",
                h2 { class: "post-title", "{post.title}" }
                p { class: "post-text", "{post.description}" }
                p { class: "muted small", "Postado em {posted}" }
                button {
                    class: "btn btn-whatsapp btn-block",
                    onclick: move |_| on_interest.call(chosen.clone()),
                    "Tenho interesse"
                }
            }
        }
    }
}
