use api::admin::{load_settings, save_settings, SettingsForm};
use api::{Destination, Navigation, SaveOutcome};
use dioxus::prelude::*;
use store::{BusinessProfile, Theme};

use crate::auth::use_auth;
use crate::icons::{FaArrowLeft, FaCopy, FaRightFromBracket};
use crate::notice::use_notice;
use crate::services::{public_feed_url, use_services};
use crate::upload::{picked_image, url_field_text};
use crate::views::Spinner;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Business profile form.
///
/// Loads the owner's record, or a blank form bound to their email when there
/// is none yet. Saving creates or updates that record.
#[component]
pub fn SettingsView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let notice = use_notice();
    let mut form = use_signal(|| Option::<BusinessProfile>::None);
    let mut saving = use_signal(|| false);

    let remote = services.remote.clone();
    let session = services.auth.clone();
    let _loader = use_resource(move || {
        let remote = remote.clone();
        let session = session.clone();
        let email = auth().email().map(str::to_string);
        async move {
            let Some(email) = email else {
                return;
            };
            let loaded = match session.authorized(|| load_settings(&remote, &email)).await {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::error!(error = %e, "settings load failed");
                    notice.show(format!("Erro ao carregar configurações: {e}"));
                    SettingsForm::blank(&email)
                }
            };
            form.set(Some(loaded.profile));
        }
    });

    let remote = services.remote.clone();
    let save_session = services.auth.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let (Some(email), Some(profile)) = (auth.peek().email().map(str::to_string), form()) else {
            return;
        };
        let remote = remote.clone();
        let session = save_session.clone();
        spawn(async move {
            saving.set(true);
            match session.authorized(|| save_settings(&remote, &email, &profile)).await {
                Ok(outcome) => {
                    tracing::info!(created = outcome == SaveOutcome::Created, "settings saved");
                    notice.show("Configurações salvas!");
                    on_navigate.call(Navigation::push(Destination::Dashboard));
                }
                Err(e) if e.is_validation() => notice.show(e.to_string()),
                Err(e) => {
                    tracing::error!(error = %e, "settings save failed");
                    notice.show(format!("Erro ao salvar: {e}"));
                }
            }
            saving.set(false);
        });
    };

    let auth_service = services.auth.clone();
    let handle_sign_out = move |_| {
        let auth_service = auth_service.clone();
        spawn(async move {
            auth_service.sign_out().await;
            on_navigate.call(Navigation::replace(Destination::Login));
        });
    };

    let handle_copy = move |_| {
        let url = public_feed_url();
        spawn(async move {
            if copy_to_clipboard(url).await {
                notice.show("Link copiado!");
            } else {
                notice.show("Não foi possível copiar o link.");
            }
        });
    };

    let Some(profile) = form() else {
        return rsx! { Spinner {} };
    };
    let feed_url = public_feed_url();
    let typed_logo = url_field_text(&profile.logo_url).to_string();

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
                h1 { class: "page-title", "Configurações" }
            }

            form {
                class: "form",
                onsubmit: handle_save,

                label { r#for: "business-name", "Nome do negócio" }
                input {
                    id: "business-name",
                    value: "{profile.name}",
                    oninput: move |evt| edit(form, |p| p.name = evt.value()),
                }

                label { r#for: "business-whatsapp", "WhatsApp" }
                input {
                    id: "business-whatsapp",
                    r#type: "tel",
                    placeholder: "(99) 99999-9999",
                    value: "{profile.whatsapp}",
                    oninput: move |evt| edit(form, |p| p.whatsapp = evt.value()),
                }

                label { r#for: "business-logo-file", "Logo" }
                if !profile.logo_url.trim().is_empty() {
                    img { class: "logo-preview", src: "{profile.logo_url}", alt: "Logo" }
                }
                input {
                    id: "business-logo-file",
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |evt| async move {
                        if let Some(uri) = picked_image(evt).await {
                            edit(form, |p| p.logo_url = uri);
                        }
                    },
                }
                input {
                    id: "business-logo",
                    r#type: "url",
                    placeholder: "ou cole o link: https://...",
                    value: "{typed_logo}",
                    oninput: move |evt| edit(form, |p| p.logo_url = evt.value()),
                }

                label { r#for: "business-email", "E-mail" }
                input {
                    id: "business-email",
                    value: "{profile.email}",
                    readonly: true,
                }

                fieldset {
                    class: "theme-picker",
                    legend { "Tema do feed" }
                    for theme in Theme::ALL {
                        button {
                            key: "{theme.as_str()}",
                            r#type: "button",
                            class: if profile.theme == theme { "chip chip-selected" } else { "chip" },
                            onclick: move |_| edit(form, |p| p.theme = theme),
                            "{theme.label()}"
                        }
                    }
                }

                label { r#for: "feed-link", "Link do seu feed" }
                div {
                    class: "copy-row",
                    input {
                        id: "feed-link",
                        value: "{feed_url}",
                        readonly: true,
                    }
                    button {
                        class: "icon-btn",
                        r#type: "button",
                        title: "Copiar link",
                        onclick: handle_copy,
                        Icon { icon: FaCopy, width: 16, height: 16 }
                    }
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Salvando..." } else { "Salvar" }
                }
            }

            button {
                class: "btn btn-ghost btn-block",
                onclick: handle_sign_out,
                Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                " Sair"
            }
        }
    }
}

async fn copy_to_clipboard(text: String) -> bool {
    let copy = document::eval(
        "const text = await dioxus.recv(); await navigator.clipboard.writeText(text); return true;",
    );
    if let Err(e) = copy.send(text) {
        tracing::warn!(error = ?e, "clipboard unavailable");
        return false;
    }
    match copy.join::<bool>().await {
        Ok(copied) => copied,
        Err(e) => {
            tracing::warn!(error = ?e, "copy failed");
            false
        }
    }
}

fn edit(mut form: Signal<Option<BusinessProfile>>, change: impl FnOnce(&mut BusinessProfile)) {
    if let Some(profile) = form.write().as_mut() {
        change(profile);
    }
}
