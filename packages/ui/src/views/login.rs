//! Login page: passwordless sign-in by email link.

use api::navigation::login_redirect;
use api::{AuthError, Navigation};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::FaEnvelope;
use crate::notice::use_notice;
use crate::services::{login_redirect_target, use_services};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn LoginView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let notice = use_notice();
    let mut email = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut sent_to = use_signal(|| Option::<String>::None);

    // An already signed-in visitor goes straight to the dashboard.
    use_effect(move || {
        if let Some(to) = login_redirect(&auth()) {
            on_navigate.call(to);
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if sending() {
            return;
        }
        let auth_service = services.auth.clone();
        spawn(async move {
            sending.set(true);
            match auth_service
                .request_login_link(&email(), &login_redirect_target())
                .await
            {
                Ok(address) => sent_to.set(Some(address)),
                Err(AuthError::EmptyEmail) => notice.show("Informe seu e-mail."),
                Err(e) => {
                    tracing::error!(error = %e, "login link request failed");
                    notice.show(format!("Erro ao enviar link: {e}"));
                }
            }
            sending.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { class: "brand", "Status Pro" }

                if let Some(address) = sent_to() {
                    div {
                        class: "login-sent",
                        Icon { icon: FaEnvelope, width: 32, height: 32 }
                        h2 { "Verifique seu e-mail" }
                        p { "Enviamos um link de acesso para " strong { "{address}" } "." }
                        button {
                            class: "btn btn-ghost",
                            onclick: move |_| sent_to.set(None),
                            "Usar outro e-mail"
                        }
                    }
                } else {
                    p { class: "muted", "Entre com seu e-mail para gerenciar seus status." }
                    form {
                        class: "form",
                        onsubmit: handle_submit,
                        label { r#for: "login-email", "E-mail" }
                        input {
                            id: "login-email",
                            r#type: "email",
                            required: true,
                            placeholder: "voce@sualoja.com.br",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary btn-block",
                            r#type: "submit",
                            disabled: sending(),
                            if sending() { "Enviando..." } else { "Enviar link de acesso" }
                        }
                    }
                }
            }
        }
    }
}
