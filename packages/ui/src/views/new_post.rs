use api::admin::publish_post;
use api::{Destination, Navigation, PublishError};
use dioxus::prelude::*;
use store::NewPost;

use crate::auth::use_auth;
use crate::handoff::use_handoff;
use crate::icons::FaArrowLeft;
use crate::notice::use_notice;
use crate::services::use_services;
use crate::upload::{picked_image, url_field_text};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn NewPostView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let notice = use_notice();
    let handoff = use_handoff();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut image_url = use_signal(String::new);
    let mut publishing = use_signal(|| false);

    let draft = move || NewPost::new(title(), description()).with_image(image_url());

    let handle_publish = move |evt: FormEvent| {
        evt.prevent_default();
        if publishing() {
            return;
        }
        let Some(email) = auth.peek().email().map(str::to_string) else {
            return;
        };
        let remote = services.remote.clone();
        let session = services.auth.clone();
        let draft = draft();
        spawn(async move {
            publishing.set(true);
            match session.authorized(|| publish_post(&remote, &email, &draft)).await {
                Ok(post) => {
                    handoff.give(post);
                    on_navigate.call(Navigation::push(Destination::PostSuccess));
                }
                Err(PublishError::BusinessNotFound) => {
                    notice.show("Erro: Negócio não encontrado.");
                }
                Err(PublishError::Invalid(e)) => notice.show(e.to_string()),
                Err(e) => {
                    tracing::error!(error = %e, "publish failed");
                    notice.show(format!("Erro ao publicar: {e}"));
                }
            }
            publishing.set(false);
        });
    };

    let can_publish = draft().is_publishable() && !publishing();
    let preview = image_url();
    let typed_url = url_field_text(&preview).to_string();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page",
            header {
                class: "page-header",
                button {
                    class: "icon-btn",
                    title: "Voltar",
                    onclick: move |_| on_navigate.call(Navigation::push(Destination::Dashboard)),
                    Icon { icon: FaArrowLeft, width: 18, height: 18 }
                }
                h1 { class: "page-title", "Novo post" }
            }

            form {
                class: "form",
                onsubmit: handle_publish,

                label { r#for: "post-title", "Título" }
                input {
                    id: "post-title",
                    placeholder: "Ex.: Promoção de sexta",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }

                label { r#for: "post-description", "Descrição" }
                textarea {
                    id: "post-description",
                    rows: 4,
                    placeholder: "Conte os detalhes da oferta",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }

                label { r#for: "post-image-file", "Imagem (opcional)" }
                input {
                    id: "post-image-file",
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |evt| async move {
                        if let Some(uri) = picked_image(evt).await {
                            image_url.set(uri);
                        }
                    },
                }
                input {
                    id: "post-image",
                    r#type: "url",
                    placeholder: "ou cole o link: https://...",
                    value: "{typed_url}",
                    oninput: move |evt| image_url.set(evt.value()),
                }
                if !preview.trim().is_empty() {
                    img { class: "image-preview", src: "{preview}", alt: "Prévia" }
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: !can_publish,
                    if publishing() { "Publicando..." } else { "Publicar status" }
                }
            }
        }
    }
}
