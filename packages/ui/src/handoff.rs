//! The post handed from one page to the next.

use dioxus::prelude::*;
use store::Post;

/// Transient navigation state: one post, taken once by the page it was given to.
#[derive(Clone, Copy, PartialEq)]
pub struct Handoff(Signal<Option<Post>>);

impl Handoff {
    pub fn new() -> Self {
        Self(Signal::new(None))
    }

    pub fn give(mut self, post: Post) {
        self.0.set(Some(post));
    }

    pub fn take(mut self) -> Option<Post> {
        self.0.write().take()
    }
}

pub fn use_handoff() -> Handoff {
    use_context::<Handoff>()
}

/// The handed-over post, taken at mount and kept for the life of the page.
pub fn use_handed_post() -> Option<Post> {
    let handoff = use_handoff();
    use_hook(move || handoff.take())
}
