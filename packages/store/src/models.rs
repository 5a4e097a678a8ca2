//! # Domain models for posts and the business profile
//!
//! These are the view-side shapes shared by every crate in the workspace. They
//! are `Serialize + Deserialize` because the local adapter stores them as JSON
//! in the browser's `localStorage` using the camelCase names below.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Post`] | One promotional item (title, description, image, creation time, status and two display-only flags). |
//! | [`PostStatus`] | `ACTIVE` or `PAUSED`. Only active posts reach the public feed. |
//! | [`BusinessProfile`] | The shop owner's public identity, also carrying the login email. |
//! | [`Theme`] | Visual theme chosen in Settings. |
//! | [`NewPost`] | A draft typed into the New Post page, validated before any store call. |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Publication status of a post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Active,
    Paused,
}

impl PostStatus {
    /// Map the remote `is_active` column onto a status.
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Paused
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// The status a toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }

    /// Badge text shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Paused => "Pausado",
        }
    }
}

/// A promotional post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque id assigned by whichever store created the post.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Remote URL or inline `data:` URI.
    pub image_url: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_offer: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
}

fn is_false(flag: &bool) -> bool {
    !flag
}

/// Visual theme of the public page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Boutique,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Boutique];

    /// Lowercase name, as stored locally and remotely.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Boutique => "boutique",
        }
    }

    /// Parse a stored theme name; unknown names fall back to [`Theme::Light`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::Dark,
            "boutique" => Self::Boutique,
            _ => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Claro",
            Self::Dark => "Escuro",
            Self::Boutique => "Boutique",
        }
    }
}

/// The shop owner's public profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub logo_url: String,
    /// Contact number, in whatever format the owner typed it.
    pub whatsapp: String,
    /// Also the authentication identity.
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub theme: Theme,
}

/// Why a draft cannot be published yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("o título é obrigatório")]
    MissingTitle,
    #[error("a descrição é obrigatória")]
    MissingDescription,
}

/// A post being written on the New Post page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    /// URL or data URI; `None` lets the store pick a placeholder.
    pub image_url: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        let image_url = image_url.into();
        self.image_url = if image_url.trim().is_empty() {
            None
        } else {
            Some(image_url)
        };
        self
    }

    /// Whitespace-only text counts as empty.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        Ok(())
    }

    pub fn is_publishable(&self) -> bool {
        self.validate().is_ok()
    }
}
