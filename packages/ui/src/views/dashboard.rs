use api::admin::{load_dashboard, Dashboard};
use api::rows::BusinessAccount;
use api::navigation;
use api::{Destination, Navigation, RemotePostStore};
use dioxus::prelude::*;
use store::post_store::{delete_and_reload, toggle_and_reload};
use store::{clock, Post, PostStatus};

use crate::auth::use_auth;
use crate::icons::{FaEye, FaGear, FaPause, FaPlay, FaPlus, FaTrashCan};
use crate::notice::use_notice;
use crate::services::use_services;
use crate::views::{ConfirmDialog, Spinner};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The owner's post list with status toggles and deletion.
///
/// Every mutation is followed by a fresh fetch; when a call fails the list on
/// screen stays as it was.
#[component]
pub fn DashboardView(on_navigate: EventHandler<Navigation>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let notice = use_notice();
    let mut business = use_signal(|| Option::<BusinessAccount>::None);
    let mut posts = use_signal(Vec::<Post>::new);
    let mut busy = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Post>::None);

    let remote = services.remote.clone();
    let session = services.auth.clone();
    let loader = use_resource(move || {
        let remote = remote.clone();
        let session = session.clone();
        let email = auth().email().map(str::to_string);
        async move {
            let Some(email) = email else {
                return;
            };
            match session.authorized(|| load_dashboard(&remote, &email)).await {
                Ok(Dashboard::NeedsSetup) => on_navigate.call(navigation::setup_redirect()),
                Ok(Dashboard::Ready { business: account, posts: list }) => {
                    business.set(Some(account));
                    posts.set(list);
                }
                Err(e) => {
                    tracing::error!(error = %e, "dashboard load failed");
                    notice.show(format!("Erro ao carregar posts: {e}"));
                }
            }
        }
    });

    let remote = services.remote.clone();
    let store_for = move || {
        business
            .peek()
            .as_ref()
            .map(|b| RemotePostStore::new(remote.clone(), b.id.clone()))
    };

    let toggle_store = store_for.clone();
    let toggle_session = services.auth.clone();
    let handle_toggle = use_callback(move |post: Post| {
        let Some(store) = toggle_store() else {
            return;
        };
        let session = toggle_session.clone();
        spawn(async move {
            busy.set(true);
            match session.authorized(|| toggle_and_reload(&store, &post)).await {
                Ok(list) => posts.set(list),
                Err(e) => {
                    tracing::error!(error = %e, id = %post.id, "status toggle failed");
                    notice.show(format!("Erro ao atualizar status: {e}"));
                }
            }
            busy.set(false);
        });
    });

    let delete_session = services.auth.clone();
    let handle_delete = move |_| {
        let Some(post) = pending_delete.take() else {
            return;
        };
        let Some(store) = store_for() else {
            return;
        };
        let session = delete_session.clone();
        spawn(async move {
            busy.set(true);
            match session.authorized(|| delete_and_reload(&store, &post.id)).await {
                Ok(list) => posts.set(list),
                Err(e) => {
                    tracing::error!(error = %e, id = %post.id, "delete failed");
                    notice.show(format!("Erro ao excluir post: {e}"));
                }
            }
            busy.set(false);
        });
    };

    let loading = loader.read().is_none();
    let name = business()
        .map(|b| b.profile.name)
        .unwrap_or_else(|| "Meus status".to_string());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page",
            header {
                class: "page-header",
                div {
                    h1 { class: "page-title", "{name}" }
                    p { class: "muted", "Painel de status" }
                }
                div {
                    class: "header-actions",
                    button {
                        class: "icon-btn",
                        title: "Ver feed público",
                        onclick: move |_| on_navigate.call(Navigation::push(Destination::Feed)),
                        Icon { icon: FaEye, width: 18, height: 18 }
                    }
                    button {
                        class: "icon-btn",
                        title: "Configurações",
                        onclick: move |_| on_navigate.call(Navigation::push(Destination::Settings)),
                        Icon { icon: FaGear, width: 18, height: 18 }
                    }
                }
            }

            if loading {
                Spinner {}
            } else if posts().is_empty() {
                div {
                    class: "empty-state",
                    h2 { "Nenhum status publicado" }
                    p { class: "muted", "Publique seu primeiro post para aparecer no feed." }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_navigate.call(Navigation::push(Destination::NewPost)),
                        "Criar post"
                    }
                }
            } else {
                ul {
                    class: "post-list",
                    for post in posts() {
                        PostCard {
                            key: "{post.id}",
                            post: post.clone(),
                            busy: busy(),
                            on_toggle: handle_toggle,
                            on_delete: move |post: Post| pending_delete.set(Some(post)),
                        }
                    }
                }
            }

            button {
                class: "fab",
                title: "Novo post",
                onclick: move |_| on_navigate.call(Navigation::push(Destination::NewPost)),
                Icon { icon: FaPlus, width: 22, height: 22 }
            }

            if let Some(post) = pending_delete() {
                ConfirmDialog {
                    message: format!("Excluir o post \"{}\"? Esta ação não pode ser desfeita.", post.title),
                    confirm_label: "Excluir",
                    on_confirm: handle_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

#[component]
fn PostCard(
    post: Post,
    busy: bool,
    on_toggle: EventHandler<Post>,
    on_delete: EventHandler<Post>,
) -> Element {
    let status_class = match post.status {
        PostStatus::Active => "badge badge-active",
        PostStatus::Paused => "badge badge-paused",
    };
    let when = clock::time_label(post.created_at);
    let toggle_title = match post.status {
        PostStatus::Active => "Pausar",
        PostStatus::Paused => "Ativar",
    };
    let toggled = post.clone();
    let deleted = post.clone();

    rsx! {
        li {
            class: "post-card",
            img { class: "post-thumb", src: "{post.image_url}", alt: "{post.title}" }
            div {
                class: "post-body",
                div {
                    class: "post-meta",
                    span { class: "{status_class}", "{post.status.label()}" }
                    span { class: "muted", "{when}" }
                }
                h3 { class: "post-title", "{post.title}" }
                p { class: "post-text", "{post.description}" }
            }
            div {
                class: "post-actions",
                button {
                    class: "icon-btn",
                    title: "{toggle_title}",
                    disabled: busy,
                    onclick: move |_| on_toggle.call(toggled.clone()),
                    if post.status.is_active() {
                        Icon { icon: FaPause, width: 14, height: 14 }
                    } else {
                        Icon { icon: FaPlay, width: 14, height: 14 }
                    }
                }
                button {
                    class: "icon-btn icon-btn-danger",
                    title: "Excluir",
                    disabled: busy,
                    onclick: move |_| on_delete.call(deleted.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}
