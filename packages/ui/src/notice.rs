//! Blocking notices: one message at a time, dismissed by the user.

use dioxus::prelude::*;

use crate::views::ModalOverlay;

#[derive(Clone, Copy, PartialEq)]
pub struct Notice(Signal<Option<String>>);

impl Notice {
    pub fn new() -> Self {
        Self(Signal::new(None))
    }

    pub fn show(mut self, message: impl Into<String>) {
        self.0.set(Some(message.into()));
    }

    pub fn dismiss(mut self) {
        self.0.set(None);
    }

    pub fn message(&self) -> Option<String> {
        (self.0)()
    }
}

pub fn use_notice() -> Notice {
    use_context::<Notice>()
}

/// Renders the current notice, if any, above everything else.
#[component]
pub fn NoticeHost() -> Element {
    let notice = use_notice();
    let Some(message) = notice.message() else {
        return rsx! {};
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| notice.dismiss(),
            div {
                class: "notice",
                role: "alertdialog",
                p { class: "notice-message", "{message}" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| notice.dismiss(),
                    "OK"
                }
            }
        }
    }
}
