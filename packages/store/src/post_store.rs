//! # `PostStore`: the post data source a page depends on
//!
//! Pages never branch on "local or remote". They are handed something that
//! implements [`PostStore`] and call it. Two implementations exist:
//!
//! | Implementation | Crate | Backing |
//! |----------------|-------|---------|
//! | [`LocalPostStore`] | `store` | [`LocalStore`] over `localStorage`, never fails; what the public pages read |
//! | `RemotePostStore` | `api` | the `posts` table of the hosted backend, scoped to one business |
//!
//! The free functions [`toggle_and_reload`] and [`delete_and_reload`] are the
//! dashboard's mutation protocol: mutate, then read the list again. There is no
//! optimistic update, so a failed mutation leaves the caller's list untouched.

use std::future::Future;

use crate::clock;
use crate::kv::KeyValueStore;
use crate::local::LocalStore;
use crate::models::{DraftError, NewPost, Post, PostStatus};

/// Async interface over a list of posts.
pub trait PostStore {
    type Error: std::error::Error;

    /// Posts, newest first.
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, Self::Error>>;

    /// The posts customers see: active ones, order kept.
    fn list_active_posts(&self) -> impl Future<Output = Result<Vec<Post>, Self::Error>> {
        async {
            let mut posts = self.list_posts().await?;
            posts.retain(|p| p.status.is_active());
            Ok(posts)
        }
    }

    fn create_post(&self, draft: &NewPost) -> impl Future<Output = Result<Post, Self::Error>>;

    fn set_status(
        &self,
        id: &str,
        status: PostStatus,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    fn delete_post(&self, id: &str) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Flip a post between active and paused, then reload the list.
pub async fn toggle_and_reload<S: PostStore>(
    store: &S,
    post: &Post,
) -> Result<Vec<Post>, S::Error> {
    store.set_status(&post.id, post.status.toggled()).await?;
    store.list_posts().await
}

/// Delete a post, then reload the list.
pub async fn delete_and_reload<S: PostStore>(
    store: &S,
    id: &str,
) -> Result<Vec<Post>, S::Error> {
    store.delete_post(id).await?;
    store.list_posts().await
}

/// Placeholder image for a draft that has none.
pub fn placeholder_image(now_ms: i64) -> String {
    format!("https://picsum.photos/seed/{now_ms}/800/1000")
}

/// [`PostStore`] over the device-local adapter.
#[derive(Clone, Debug, Default)]
pub struct LocalPostStore<K: KeyValueStore> {
    local: LocalStore<K>,
}

impl<K: KeyValueStore> LocalPostStore<K> {
    pub fn new(local: LocalStore<K>) -> Self {
        Self { local }
    }

    /// Build a post from a draft the way the local store stamps it.
    fn make_post(draft: &NewPost) -> Result<Post, DraftError> {
        draft.validate()?;
        let now = clock::now_millis();
        Ok(Post {
            id: clock::next_local_id(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image_url: draft
                .image_url
                .clone()
                .unwrap_or_else(|| placeholder_image(now)),
            created_at: now,
            status: PostStatus::Active,
            is_offer: false,
            is_new: true,
        })
    }
}

impl<K: KeyValueStore> PostStore for LocalPostStore<K> {
    /// The only way a local call fails is an invalid draft.
    type Error = DraftError;

    async fn list_posts(&self) -> Result<Vec<Post>, Self::Error> {
        Ok(self.local.get_posts())
    }

    async fn list_active_posts(&self) -> Result<Vec<Post>, Self::Error> {
        Ok(self.local.active_posts())
    }

    async fn create_post(&self, draft: &NewPost) -> Result<Post, Self::Error> {
        let post = Self::make_post(draft)?;
        self.local.add_post(post.clone());
        Ok(post)
    }

    async fn set_status(&self, id: &str, status: PostStatus) -> Result<(), Self::Error> {
        self.local.update_post_status(id, status);
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), Self::Error> {
        self.local.delete_post(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStorage;
    use crate::seed;

    // Seeds are aged from the read time, so pin them once.
    fn make_store() -> LocalPostStore<MemoryStorage> {
        let local = LocalStore::new(MemoryStorage::new());
        local.save_posts(&seed::default_posts(1_750_000_000_000));
        LocalPostStore::new(local)
    }

    #[tokio::test]
    async fn test_toggle_changes_only_status() {
        let store = make_store();
        let before = store.list_posts().await.unwrap();
        let target = before[1].clone();

        let after = toggle_and_reload(&store, &target).await.unwrap();

        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].status, PostStatus::Paused);
        assert_eq!(
            Post {
                status: target.status,
                ..after[1].clone()
            },
            target
        );

        let again = toggle_and_reload(&store, &after[1]).await.unwrap();
        assert_eq!(again[1], target);
    }

    #[tokio::test]
    async fn test_delete_and_reload_keeps_others_in_order() {
        let store = make_store();
        let after = delete_and_reload(&store, "2").await.unwrap();
        let ids: Vec<&str> = after.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_create_prepends_active_new_post() {
        let store = make_store();
        let post = store
            .create_post(&NewPost::new("  Queima de estoque ", "Tudo 50%"))
            .await
            .unwrap();

        assert_eq!(post.title, "Queima de estoque");
        assert_eq!(post.status, PostStatus::Active);
        assert!(post.is_new);
        assert!(post.image_url.starts_with("https://picsum.photos/seed/"));

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts[0], post);
        assert_eq!(posts.len(), 4);
    }

    #[tokio::test]
    async fn test_active_posts_skip_paused_and_keep_order() {
        let store = make_store();
        let posts = store.list_posts().await.unwrap();
        toggle_and_reload(&store, &posts[0]).await.unwrap();

        let active = store.list_active_posts().await.unwrap();

        let ids: Vec<&str> = active.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<&str> = posts[1..]
            .iter()
            .filter(|p| p.status.is_active())
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, expected);
        assert!(active.iter().all(|p| p.status.is_active()));
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_draft() {
        let store = make_store();
        let err = store.create_post(&NewPost::new("", "x")).await.unwrap_err();
        assert_eq!(err, DraftError::MissingTitle);
        assert_eq!(store.list_posts().await.unwrap().len(), 3);
    }
}
