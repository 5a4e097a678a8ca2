//! # Local persistence adapter
//!
//! [`LocalStore`] is the synchronous data source of the public pages. It keeps
//! the business profile and the post list as JSON under two fixed keys of a
//! [`KeyValueStore`] (`localStorage` on the web).
//!
//! | Key | Value |
//! |-----|-------|
//! | [`BUSINESS_KEY`] | one [`BusinessProfile`] |
//! | [`POSTS_KEY`] | `[Post]`, newest first |
//!
//! Absent and malformed values are treated the same way: the getters return
//! the seed data from [`crate::seed`]. Nothing here returns an error. There is
//! no locking either, so two tabs writing at once keep whichever write lands
//! last.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock;
use crate::kv::KeyValueStore;
use crate::models::{BusinessProfile, Post, PostStatus};
use crate::seed;

pub const BUSINESS_KEY: &str = "status_pro_business";
pub const POSTS_KEY: &str = "status_pro_posts";

/// Default-seeded access to the locally stored profile and posts.
#[derive(Clone, Debug, Default)]
pub struct LocalStore<K: KeyValueStore> {
    storage: K,
}

impl<K: KeyValueStore> LocalStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    pub fn get_business(&self) -> BusinessProfile {
        self.read(BUSINESS_KEY).unwrap_or_else(seed::default_business)
    }

    pub fn save_business(&self, profile: &BusinessProfile) {
        self.write(BUSINESS_KEY, profile);
    }

    pub fn get_posts(&self) -> Vec<Post> {
        self.read(POSTS_KEY)
            .unwrap_or_else(|| seed::default_posts(clock::now_millis()))
    }

    pub fn save_posts(&self, posts: &[Post]) {
        self.write(POSTS_KEY, &posts);
    }

    /// Prepend a post, keeping newest-first order.
    pub fn add_post(&self, post: Post) {
        let mut posts = self.get_posts();
        posts.insert(0, post);
        self.save_posts(&posts);
    }

    pub fn delete_post(&self, id: &str) {
        let mut posts = self.get_posts();
        posts.retain(|p| p.id != id);
        self.save_posts(&posts);
    }

    /// Replace the status of the matching post; every other field and post is kept.
    pub fn update_post_status(&self, id: &str, status: PostStatus) {
        let mut posts = self.get_posts();
        for post in posts.iter_mut().filter(|p| p.id == id) {
            post.status = status;
        }
        self.save_posts(&posts);
    }

    /// What the public feed shows: active posts in stored order.
    pub fn active_posts(&self) -> Vec<Post> {
        self.get_posts()
            .into_iter()
            .filter(|p| p.status.is_active())
            .collect()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed local data");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.set_item(key, &json),
            Err(e) => tracing::error!(key, error = %e, "failed to encode local data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStorage;
    use crate::models::Theme;

    fn make_store() -> LocalStore<MemoryStorage> {
        LocalStore::new(MemoryStorage::new())
    }

    fn post(id: &str, status: PostStatus) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            description: format!("About {id}"),
            image_url: format!("https://img/{id}"),
            created_at: 1_000 + id.len() as i64,
            status,
            is_offer: id == "b",
            is_new: false,
        }
    }

    #[test]
    fn test_empty_store_returns_seeds() {
        let store = make_store();
        assert_eq!(store.get_business(), seed::default_business());

        let posts = store.get_posts();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(posts[0].created_at > posts[1].created_at);
        assert!(posts[1].created_at > posts[2].created_at);
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let store = make_store();

        let profile = BusinessProfile {
            name: "Ateliê Maria".to_string(),
            bio: "Roupas sob medida".to_string(),
            logo_url: "data:image/png;base64,AAAA".to_string(),
            whatsapp: "+55 11 91234-5678".to_string(),
            email: "maria@example.com".to_string(),
            is_verified: false,
            theme: Theme::Boutique,
        };
        store.save_business(&profile);
        assert_eq!(store.get_business(), profile);

        let posts = vec![post("a", PostStatus::Active), post("b", PostStatus::Paused)];
        store.save_posts(&posts);
        assert_eq!(store.get_posts(), posts);
    }

    #[test]
    fn test_saving_an_empty_list_is_not_reseeded() {
        let store = make_store();
        store.save_posts(&[]);
        assert!(store.get_posts().is_empty());
    }

    #[test]
    fn test_malformed_data_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set_item(BUSINESS_KEY, "{not json");
        storage.set_item(POSTS_KEY, r#"[{"id":1}]"#);
        let store = LocalStore::new(storage);

        assert_eq!(store.get_business(), seed::default_business());
        assert_eq!(store.get_posts().len(), 3);
    }

    #[test]
    fn test_add_post_prepends() {
        let store = make_store();
        store.save_posts(&[post("a", PostStatus::Active)]);
        store.add_post(post("new", PostStatus::Active));

        let ids: Vec<String> = store.get_posts().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["new", "a"]);
    }

    #[test]
    fn test_delete_removes_exactly_one_and_keeps_order() {
        let store = make_store();
        let posts = vec![
            post("a", PostStatus::Active),
            post("b", PostStatus::Active),
            post("c", PostStatus::Paused),
            post("d", PostStatus::Active),
        ];
        store.save_posts(&posts);

        store.delete_post("b");

        let remaining = store.get_posts();
        assert_eq!(
            remaining,
            vec![posts[0].clone(), posts[2].clone(), posts[3].clone()]
        );
    }

    #[test]
    fn test_delete_unknown_id_changes_nothing() {
        let store = make_store();
        let posts = vec![post("a", PostStatus::Active)];
        store.save_posts(&posts);
        store.delete_post("zzz");
        assert_eq!(store.get_posts(), posts);
    }

    #[test]
    fn test_status_update_changes_only_status() {
        let store = make_store();
        let posts = vec![post("a", PostStatus::Active), post("b", PostStatus::Active)];
        store.save_posts(&posts);

        store.update_post_status("b", PostStatus::Paused);

        let after = store.get_posts();
        assert_eq!(after[0], posts[0]);
        let expected = Post {
            status: PostStatus::Paused,
            ..posts[1].clone()
        };
        assert_eq!(after[1], expected);
    }

    #[test]
    fn test_active_posts_hides_paused() {
        let store = make_store();
        store.save_posts(&[
            post("a", PostStatus::Paused),
            post("b", PostStatus::Active),
            post("c", PostStatus::Active),
        ]);
        let ids: Vec<String> = store.active_posts().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["b", "c"]);
    }
}
