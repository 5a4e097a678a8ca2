use store::post_store::placeholder_image;
use store::{clock, NewPost, Post, PostStatus, PostStore};

use crate::error::RemoteError;
use crate::remote::{Filter, Order, RemoteData, POSTS_TABLE};
use crate::rows::{posts_from_rows, NewPostRow, PostRow, StatusPatch};

/// [`PostStore`] over the `posts` table, scoped to one business.
///
/// Every read and write filters on `business_id`, so a post id belonging to
/// another business behaves as not found.
#[derive(Clone, Debug)]
pub struct RemotePostStore<R> {
    remote: R,
    business_id: String,
}

impl<R: RemoteData> RemotePostStore<R> {
    pub fn new(remote: R, business_id: impl Into<String>) -> Self {
        Self {
            remote,
            business_id: business_id.into(),
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    fn owned(&self, id: &str) -> Filter {
        Filter::eq("id", id).and_eq("business_id", self.business_id.clone())
    }
}

impl<R: RemoteData> PostStore for RemotePostStore<R> {
    type Error = RemoteError;

    async fn list_posts(&self) -> Result<Vec<Post>, Self::Error> {
        let rows: Vec<PostRow> = self
            .remote
            .select_many(
                POSTS_TABLE,
                &Filter::eq("business_id", self.business_id.clone()),
                Some(&Order::desc("created_at")),
            )
            .await?;
        posts_from_rows(rows)
    }

    /// The draft must already be valid; see [`crate::admin::publish_post`].
    async fn create_post(&self, draft: &NewPost) -> Result<Post, Self::Error> {
        let record = NewPostRow::from_draft(
            &self.business_id,
            draft,
            placeholder_image(clock::now_millis()),
        );
        let row: PostRow = self.remote.insert(POSTS_TABLE, &record).await?;
        let mut post = Post::try_from(row)?;
        post.is_new = true;
        tracing::info!(id = %post.id, business = %self.business_id, "post published");
        Ok(post)
    }

    async fn set_status(&self, id: &str, status: PostStatus) -> Result<(), Self::Error> {
        let changed = self
            .remote
            .update(POSTS_TABLE, &self.owned(id), &StatusPatch::from(status))
            .await?;
        if changed == 0 {
            return Err(RemoteError::NotFound);
        }
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), Self::Error> {
        let removed = self.remote.delete(POSTS_TABLE, &self.owned(id)).await?;
        if removed == 0 {
            return Err(RemoteError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRemote, Op};
    use store::post_store::{delete_and_reload, toggle_and_reload};

    async fn store_with_posts(titles: &[&str]) -> (MemoryRemote, RemotePostStore<MemoryRemote>) {
        let remote = MemoryRemote::new();
        let store = RemotePostStore::new(remote.clone(), "b-1");
        for title in titles {
            store
                .create_post(&NewPost::new(*title, "texto"))
                .await
                .unwrap();
        }
        (remote, store)
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped_to_business() {
        let (remote, store) = store_with_posts(&["a", "b", "c"]).await;
        let other = RemotePostStore::new(remote, "b-2");
        other.create_post(&NewPost::new("x", "y")).await.unwrap();

        let titles: Vec<String> = store
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_created_post_gets_placeholder_and_is_active() {
        let (_remote, store) = store_with_posts(&[]).await;
        let post = store.create_post(&NewPost::new("a", "b")).await.unwrap();
        assert!(post.image_url.starts_with("https://picsum.photos/seed/"));
        assert!(post.image_url.ends_with("/800/1000"));
        assert_eq!(post.status, PostStatus::Active);
        assert!(post.is_new);
    }

    #[tokio::test]
    async fn test_toggle_changes_exactly_status() {
        let (_remote, store) = store_with_posts(&["a", "b"]).await;
        let before = store.list_posts().await.unwrap();

        let after = toggle_and_reload(&store, &before[0]).await.unwrap();

        assert_eq!(after[0].status, PostStatus::Paused);
        assert_eq!(after[0].title, before[0].title);
        assert_eq!(after[0].created_at, before[0].created_at);
        assert_eq!(after[1], before[1]);
    }

    #[tokio::test]
    async fn test_active_posts_leave_out_paused_ones() {
        let (_remote, store) = store_with_posts(&["a", "b", "c"]).await;
        let before = store.list_posts().await.unwrap();
        toggle_and_reload(&store, &before[1]).await.unwrap();

        let titles: Vec<String> = store
            .list_active_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["c", "a"]);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_the_rest() {
        let (_remote, store) = store_with_posts(&["a", "b", "c"]).await;
        let before = store.list_posts().await.unwrap();

        let after = delete_and_reload(&store, &before[1].id).await.unwrap();

        assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
    }

    #[tokio::test]
    async fn test_foreign_post_is_not_found() {
        let (remote, store) = store_with_posts(&["a"]).await;
        let id = store.list_posts().await.unwrap()[0].id.clone();
        let intruder = RemotePostStore::new(remote.clone(), "b-2");

        let result = intruder.delete_post(&id).await;

        assert!(matches!(result, Err(RemoteError::NotFound)));
        assert_eq!(remote.rows(POSTS_TABLE).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_list_unchanged() {
        let (remote, store) = store_with_posts(&["a", "b"]).await;
        let before = store.list_posts().await.unwrap();
        remote.reject_writes(POSTS_TABLE);

        let result = toggle_and_reload(&store, &before[0]).await;

        assert!(matches!(result, Err(RemoteError::Rejected { .. })));
        assert_eq!(store.list_posts().await.unwrap(), before);
        // the failed toggle is not followed by a reload
        let selects = remote.count_calls(Op::SelectMany, POSTS_TABLE);
        assert_eq!(selects, 2);
    }
}
