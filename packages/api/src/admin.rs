//! # Admin page flows
//!
//! What the Dashboard, New Post and Settings pages do against the backend,
//! independent of any UI. Every flow starts from the signed-in email, which is
//! how the owner's business is found.
//!
//! | Flow | Calls |
//! |------|-------|
//! | [`load_dashboard`] | business by email, then its posts (skipped when there is no business) |
//! | [`publish_post`] | nothing for an invalid draft; else business by email, then insert |
//! | [`load_settings`] | business by email |
//! | [`save_settings`] | nothing for an invalid form; else update by email, insert when no row changed |

use store::{seed, BusinessProfile, NewPost, Post, PostStore};

use crate::error::{PublishError, RemoteError, SettingsError};
use crate::posts::RemotePostStore;
use crate::remote::{Filter, RemoteData, BUSINESS_TABLE};
use crate::rows::{BusinessAccount, BusinessRow, BusinessWrite};

/// The business whose `email` column is `email`, if any.
pub async fn find_business<R: RemoteData>(
    remote: &R,
    email: &str,
) -> Result<Option<BusinessAccount>, RemoteError> {
    let row: Option<BusinessRow> = remote
        .select_one(BUSINESS_TABLE, &Filter::eq("email", email))
        .await?;
    Ok(row.map(BusinessAccount::from))
}

/// What the dashboard should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dashboard {
    /// No business for this email yet: send the owner to Settings.
    NeedsSetup,
    Ready {
        business: BusinessAccount,
        posts: Vec<Post>,
    },
}

pub async fn load_dashboard<R: RemoteData + Clone>(
    remote: &R,
    email: &str,
) -> Result<Dashboard, RemoteError> {
    let Some(business) = find_business(remote, email).await? else {
        tracing::info!(%email, "no business yet, dashboard needs setup");
        return Ok(Dashboard::NeedsSetup);
    };
    let posts = RemotePostStore::new(remote.clone(), business.id.clone())
        .list_posts()
        .await?;
    Ok(Dashboard::Ready { business, posts })
}

/// Validate the draft, find the owner's business and insert the post.
pub async fn publish_post<R: RemoteData + Clone>(
    remote: &R,
    email: &str,
    draft: &NewPost,
) -> Result<Post, PublishError> {
    draft.validate()?;
    let business = find_business(remote, email)
        .await?
        .ok_or(PublishError::BusinessNotFound)?;
    let post = RemotePostStore::new(remote.clone(), business.id)
        .create_post(draft)
        .await?;
    Ok(post)
}

/// The Settings form as first shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub profile: BusinessProfile,
    /// Whether a business record already exists for this email.
    pub exists: bool,
}

impl SettingsForm {
    /// Editable defaults for an owner without a record.
    pub fn blank(email: &str) -> Self {
        Self {
            profile: seed::blank_business_for(email),
            exists: false,
        }
    }
}

pub async fn load_settings<R: RemoteData>(
    remote: &R,
    email: &str,
) -> Result<SettingsForm, RemoteError> {
    Ok(match find_business(remote, email).await? {
        Some(account) => SettingsForm {
            profile: account.profile,
            exists: true,
        },
        None => SettingsForm::blank(email),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Name and WhatsApp must be non-blank.
pub fn validate_settings(profile: &BusinessProfile) -> Result<(), SettingsError> {
    if profile.name.trim().is_empty() {
        return Err(SettingsError::MissingName);
    }
    if profile.whatsapp.trim().is_empty() {
        return Err(SettingsError::MissingWhatsapp);
    }
    Ok(())
}

/// Upsert the business of `email`: update by email, insert when nothing matched.
///
/// The record is always bound to `email`, whatever the form's email field says.
pub async fn save_settings<R: RemoteData>(
    remote: &R,
    email: &str,
    profile: &BusinessProfile,
) -> Result<SaveOutcome, SettingsError> {
    validate_settings(profile)?;
    let mut record = BusinessWrite::from(profile);
    record.email = email.to_string();

    let by_email = Filter::eq("email", email);
    if remote.update(BUSINESS_TABLE, &by_email, &record).await? > 0 {
        return Ok(SaveOutcome::Updated);
    }
    let created: BusinessRow = remote.insert(BUSINESS_TABLE, &record).await?;
    tracing::info!(id = %created.id, %email, "business created");
    Ok(SaveOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRemote, Op};
    use crate::remote::POSTS_TABLE;
    use store::{PostStatus, Theme};

    const EMAIL: &str = "dono@loja.com";

    fn profile(name: &str, whatsapp: &str) -> BusinessProfile {
        BusinessProfile {
            name: name.to_string(),
            whatsapp: whatsapp.to_string(),
            ..seed::blank_business_for(EMAIL)
        }
    }

    async fn remote_with_business() -> MemoryRemote {
        let remote = MemoryRemote::new();
        save_settings(&remote, EMAIL, &profile("Loja", "(11) 5555-0000"))
            .await
            .unwrap();
        remote
    }

    #[tokio::test]
    async fn test_dashboard_without_business_skips_posts_fetch() {
        let remote = MemoryRemote::new();

        let dashboard = load_dashboard(&remote, EMAIL).await.unwrap();

        assert_eq!(dashboard, Dashboard::NeedsSetup);
        assert_eq!(remote.count_calls(Op::SelectMany, POSTS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_dashboard_shows_only_own_posts_newest_first() {
        let remote = remote_with_business().await;
        publish_post(&remote, EMAIL, &NewPost::new("a", "1")).await.unwrap();
        publish_post(&remote, EMAIL, &NewPost::new("b", "2")).await.unwrap();
        save_settings(&remote, "outro@loja.com", &profile("Outra", "1"))
            .await
            .unwrap();
        publish_post(&remote, "outro@loja.com", &NewPost::new("x", "3"))
            .await
            .unwrap();

        let Dashboard::Ready { business, posts } = load_dashboard(&remote, EMAIL).await.unwrap()
        else {
            panic!("expected a ready dashboard");
        };

        assert_eq!(business.profile.name, "Loja");
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["b", "a"]);
        assert!(posts.iter().all(|p| p.status == PostStatus::Active));
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_remote_call() {
        let remote = remote_with_business().await;
        let calls_before = remote.calls().len();

        let missing_title = publish_post(&remote, EMAIL, &NewPost::new("  ", "texto")).await;
        let missing_text = publish_post(&remote, EMAIL, &NewPost::new("título", "")).await;

        assert!(matches!(
            missing_title,
            Err(PublishError::Invalid(store::DraftError::MissingTitle))
        ));
        assert!(matches!(
            missing_text,
            Err(PublishError::Invalid(store::DraftError::MissingDescription))
        ));
        assert_eq!(remote.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_publish_without_business_is_not_found() {
        let remote = MemoryRemote::new();

        let result = publish_post(&remote, EMAIL, &NewPost::new("a", "b")).await;

        assert!(matches!(result, Err(PublishError::BusinessNotFound)));
        assert_eq!(remote.count_calls(Op::Insert, POSTS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_is_remote_error() {
        let remote = remote_with_business().await;
        remote.reject_writes(POSTS_TABLE);

        let result = publish_post(&remote, EMAIL, &NewPost::new("a", "b")).await;

        assert!(matches!(result, Err(PublishError::Remote(_))));
        assert!(remote.rows(POSTS_TABLE).is_empty());
    }

    #[tokio::test]
    async fn test_settings_for_unknown_email_is_blank_form() {
        let remote = MemoryRemote::new();

        let form = load_settings(&remote, EMAIL).await.unwrap();

        assert!(!form.exists);
        assert_eq!(form.profile.email, EMAIL);
        assert!(form.profile.name.is_empty());
        assert!(form.profile.whatsapp.is_empty());
    }

    #[tokio::test]
    async fn test_first_save_creates_and_later_load_returns_it() {
        let remote = MemoryRemote::new();
        let mut edited = profile("Loja Nova", "(11) 98888-7777");
        edited.theme = Theme::Boutique;
        edited.logo_url = "https://img/logo.png".to_string();

        let outcome = save_settings(&remote, EMAIL, &edited).await.unwrap();
        let form = load_settings(&remote, EMAIL).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Created);
        assert!(form.exists);
        assert_eq!(form.profile.name, "Loja Nova");
        assert_eq!(form.profile.whatsapp, "(11) 98888-7777");
        assert_eq!(form.profile.theme, Theme::Boutique);
        assert_eq!(form.profile.logo_url, "https://img/logo.png");
    }

    #[tokio::test]
    async fn test_repeated_saves_keep_a_single_record() {
        let remote = MemoryRemote::new();
        let first = save_settings(&remote, EMAIL, &profile("Loja", "1")).await.unwrap();
        let second = save_settings(&remote, EMAIL, &profile("Loja 2", "2")).await.unwrap();

        assert_eq!(first, SaveOutcome::Created);
        assert_eq!(second, SaveOutcome::Updated);
        let rows = remote.rows(BUSINESS_TABLE);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Loja 2");
    }

    #[tokio::test]
    async fn test_save_binds_record_to_signed_in_email() {
        let remote = MemoryRemote::new();
        let mut edited = profile("Loja", "1");
        edited.email = "someone@else.com".to_string();

        save_settings(&remote, EMAIL, &edited).await.unwrap();

        assert!(find_business(&remote, EMAIL).await.unwrap().is_some());
        assert!(find_business(&remote, "someone@else.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_settings_make_no_remote_call() {
        let remote = MemoryRemote::new();

        let no_name = save_settings(&remote, EMAIL, &profile(" ", "1")).await;
        let no_phone = save_settings(&remote, EMAIL, &profile("Loja", "")).await;

        assert!(matches!(no_name, Err(SettingsError::MissingName)));
        assert!(matches!(no_phone, Err(SettingsError::MissingWhatsapp)));
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_save_leaves_record_unchanged() {
        let remote = remote_with_business().await;
        remote.reject_writes(BUSINESS_TABLE);

        let result = save_settings(&remote, EMAIL, &profile("Outro nome", "2")).await;

        assert!(matches!(result, Err(SettingsError::Remote(_))));
        let form = load_settings(&remote, EMAIL).await.unwrap();
        assert_eq!(form.profile.name, "Loja");
    }
}
