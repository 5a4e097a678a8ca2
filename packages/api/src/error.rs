//! Error types of the remote data service.

use thiserror::Error;

/// A failed call to the hosted backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never got a response (network, CORS, DNS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    /// A filtered update or delete matched no row.
    #[error("record not found")]
    NotFound,

    /// An update or delete without any filter would touch the whole table.
    #[error("refusing to {0} without a filter")]
    UnfilteredWrite(&'static str),

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Errors that can carry the backend refusing the caller's access token.
///
/// Only a 401 counts: that is what the backend answers for an expired JWT.
/// A 403 is a permission decision a new token would not change.
pub trait Unauthorized {
    fn is_unauthorized(&self) -> bool;
}

impl Unauthorized for RemoteError {
    fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(e)
    }
}

/// Missing or invalid backend configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

/// A failed magic-link request or session call.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("informe um e-mail")]
    EmptyEmail,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Why a New Post submission did not publish.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Invalid(#[from] store::DraftError),

    #[error("Negócio não encontrado.")]
    BusinessNotFound,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Why a Settings save did not go through.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Por favor, preencha o Nome e o WhatsApp.")]
    MissingName,

    #[error("Por favor, preencha o Nome e o WhatsApp.")]
    MissingWhatsapp,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SettingsError {
    /// Caught before any call; shown as is.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingName | Self::MissingWhatsapp)
    }
}

impl Unauthorized for PublishError {
    fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_unauthorized())
    }
}

impl Unauthorized for SettingsError {
    fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> RemoteError {
        RemoteError::Rejected {
            status,
            message: "JWT expired".to_string(),
        }
    }

    #[test]
    fn test_only_401_means_the_token_is_refused() {
        assert!(rejected(401).is_unauthorized());
        assert!(!rejected(403).is_unauthorized());
        assert!(!RemoteError::NotFound.is_unauthorized());
        assert!(PublishError::Remote(rejected(401)).is_unauthorized());
        assert!(!PublishError::BusinessNotFound.is_unauthorized());
        assert!(SettingsError::Remote(rejected(401)).is_unauthorized());
        assert!(!SettingsError::MissingName.is_unauthorized());
    }
}
