//! # Table rows and their mapping to the domain model
//!
//! The backend's column names differ from the domain's field names. All of
//! the translation lives here:
//!
//! | Domain | `business` column | `posts` column |
//! |--------|-------------------|----------------|
//! | `whatsapp` | `whatsapp_number` | |
//! | `logo_url` | `logo_url` | |
//! | `description` | | `caption` |
//! | `image_url` | | `media_url` |
//! | `status` | | `is_active` |
//! | `created_at` (epoch ms) | | `created_at` (RFC 3339) |
//!
//! `is_new`/`is_offer` are display flags and have no column. Ids are opaque:
//! a uuid column reads as text, an identity column as a number, and both
//! become text.

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use store::{BusinessProfile, NewPost, Post, PostStatus, Theme};

use crate::error::RemoteError;

/// A row of the `business` table as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRow {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub whatsapp_number: String,
    pub email: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

/// The columns written by a Settings save.
///
/// `bio` and `is_verified` are not editable and are left to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessWrite {
    pub name: String,
    pub whatsapp_number: String,
    pub email: String,
    pub logo_url: String,
    pub theme: String,
}

/// A business together with its backend id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessAccount {
    pub id: String,
    pub profile: BusinessProfile,
}

impl From<BusinessRow> for BusinessAccount {
    fn from(row: BusinessRow) -> Self {
        let profile = BusinessProfile {
            name: row.name,
            bio: row.bio.unwrap_or_default(),
            logo_url: row.logo_url.unwrap_or_default(),
            whatsapp: row.whatsapp_number,
            email: row.email,
            is_verified: row.is_verified.unwrap_or(false),
            theme: row.theme.as_deref().map(Theme::from_name).unwrap_or_default(),
        };
        Self { id: row.id, profile }
    }
}

impl From<&BusinessProfile> for BusinessWrite {
    fn from(profile: &BusinessProfile) -> Self {
        Self {
            name: profile.name.trim().to_string(),
            whatsapp_number: profile.whatsapp.trim().to_string(),
            email: profile.email.clone(),
            logo_url: profile.logo_url.trim().to_string(),
            theme: profile.theme.as_str().to_string(),
        }
    }
}

/// A row of the `posts` table as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRow {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(deserialize_with = "id_text")]
    pub business_id: String,
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub media_type: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// The columns written when publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPostRow {
    pub business_id: String,
    pub title: String,
    pub caption: String,
    pub media_url: String,
    pub media_type: &'static str,
    pub is_active: bool,
}

impl NewPostRow {
    /// Row for a validated draft; `fallback_image` is used when it has none.
    pub fn from_draft(business_id: &str, draft: &NewPost, fallback_image: String) -> Self {
        Self {
            business_id: business_id.to_string(),
            title: draft.title.trim().to_string(),
            caption: draft.description.trim().to_string(),
            media_url: draft.image_url.clone().unwrap_or(fallback_image),
            media_type: "image",
            is_active: true,
        }
    }
}

/// Partial row of a status toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub is_active: bool,
}

impl From<PostStatus> for StatusPatch {
    fn from(status: PostStatus) -> Self {
        Self {
            is_active: status.is_active(),
        }
    }
}

impl TryFrom<PostRow> for Post {
    type Error = RemoteError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| RemoteError::decode(format!("created_at {:?}: {e}", row.created_at)))?
            .timestamp_millis();
        Ok(Post {
            id: row.id,
            title: row.title,
            description: row.caption,
            image_url: row.media_url,
            created_at,
            status: PostStatus::from_active(row.is_active),
            is_offer: false,
            is_new: false,
        })
    }
}

/// Map fetched rows, failing on the first one that does not decode.
pub fn posts_from_rows(rows: Vec<PostRow>) -> Result<Vec<Post>, RemoteError> {
    rows.into_iter().map(Post::try_from).collect()
}

fn id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_row() -> PostRow {
        PostRow {
            id: "p-1".to_string(),
            business_id: "b-1".to_string(),
            title: "Promo".to_string(),
            caption: "Tudo pela metade".to_string(),
            media_url: "https://img/1.png".to_string(),
            media_type: Some("image".to_string()),
            is_active: false,
            created_at: "2026-10-14T12:30:00.250+00:00".to_string(),
        }
    }

    #[test]
    fn test_post_row_maps_columns_to_fields() {
        let post = Post::try_from(post_row()).unwrap();
        assert_eq!(post.id, "p-1");
        assert_eq!(post.description, "Tudo pela metade");
        assert_eq!(post.image_url, "https://img/1.png");
        assert_eq!(post.status, PostStatus::Paused);
        assert_eq!(post.created_at, 1_791_981_000_250);
        assert!(!post.is_new && !post.is_offer);
    }

    #[test]
    fn test_numeric_ids_read_as_text() {
        let business: BusinessRow = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Loja",
            "email": "dono@loja.com"
        }))
        .unwrap();
        assert_eq!(BusinessAccount::from(business).id, "3");

        let row: PostRow = serde_json::from_value(serde_json::json!({
            "id": 41,
            "business_id": 3,
            "title": "Promo",
            "is_active": true,
            "created_at": "2026-10-14T12:30:00+00:00"
        }))
        .unwrap();
        assert_eq!(row.business_id, "3");
        assert_eq!(Post::try_from(row).unwrap().id, "41");
    }

    #[test]
    fn test_text_ids_are_kept() {
        let row: PostRow = serde_json::from_value(serde_json::json!({
            "id": "9b2f0c1e-uuid",
            "business_id": "b-1",
            "title": "Promo",
            "is_active": false,
            "created_at": "2026-10-14T12:30:00Z"
        }))
        .unwrap();
        assert_eq!(row.id, "9b2f0c1e-uuid");
        assert_eq!(row.business_id, "b-1");
    }

    #[test]
    fn test_unparseable_created_at_is_a_decode_error() {
        let row = PostRow {
            created_at: "yesterday".to_string(),
            ..post_row()
        };
        assert!(matches!(Post::try_from(row), Err(RemoteError::Decode(_))));
    }

    #[test]
    fn test_business_row_defaults_missing_columns() {
        let row: BusinessRow = serde_json::from_value(serde_json::json!({
            "id": "b-1",
            "name": "Loja",
            "whatsapp_number": "(11) 5555-0000",
            "email": "dono@loja.com",
            "logo_url": null,
            "theme": "boutique"
        }))
        .unwrap();
        let account = BusinessAccount::from(row);
        assert_eq!(account.id, "b-1");
        assert_eq!(account.profile.whatsapp, "(11) 5555-0000");
        assert_eq!(account.profile.logo_url, "");
        assert_eq!(account.profile.theme, Theme::Boutique);
        assert!(!account.profile.is_verified);
    }

    #[test]
    fn test_business_write_sends_editable_columns_only() {
        let profile = BusinessProfile {
            name: " Loja ".to_string(),
            whatsapp: "11 5555".to_string(),
            theme: Theme::Dark,
            ..store::seed::default_business()
        };
        let value = serde_json::to_value(BusinessWrite::from(&profile)).unwrap();
        assert_eq!(value["name"], "Loja");
        assert_eq!(value["whatsapp_number"], "11 5555");
        assert_eq!(value["theme"], "dark");
        assert!(value.get("bio").is_none());
        assert!(value.get("is_verified").is_none());
    }

    #[test]
    fn test_new_post_row_uses_fallback_image_and_is_active() {
        let draft = NewPost::new(" Título ", "Texto");
        let row = NewPostRow::from_draft("b-1", &draft, "https://fallback".to_string());
        assert_eq!(row.title, "Título");
        assert_eq!(row.media_url, "https://fallback");
        assert_eq!(row.media_type, "image");
        assert!(row.is_active);

        let with_image = draft.with_image("data:image/png;base64,AAAA");
        let row = NewPostRow::from_draft("b-1", &with_image, "https://fallback".to_string());
        assert_eq!(row.media_url, "data:image/png;base64,AAAA");
    }
}
