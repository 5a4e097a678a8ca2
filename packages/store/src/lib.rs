pub mod clock;
pub mod local;
pub mod media;
pub mod models;
pub mod post_store;
pub mod seed;
pub mod whatsapp;

mod kv;
pub use kv::{KeyValueStore, MemoryStorage};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserStorage;

pub use local::LocalStore;
pub use models::{BusinessProfile, DraftError, NewPost, Post, PostStatus, Theme};
pub use post_store::{LocalPostStore, PostStore};
