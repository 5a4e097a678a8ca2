//! Session types and magic-link fragment parsing.

use serde::{Deserialize, Serialize};

/// Local storage key of the persisted session.
pub const SESSION_KEY: &str = "status_pro_session";

/// Refresh this many seconds before the access token actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Tab-wide authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The stored session has not been checked yet.
    #[default]
    Resolving,
    Resolved(Option<AuthUser>),
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Resolved(user) => user.as_ref(),
            Self::Resolving => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub fn email(&self) -> Option<&str> {
        self.user().map(|u| u.email.as_str())
    }
}

/// Tokens kept in local storage between page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds since the Unix epoch.
    pub expires_at: i64,
}

impl StoredSession {
    /// Tokens from the `#access_token=...` fragment the login link lands on.
    pub fn from_fragment(fragment: &str, now_secs: i64) -> Option<Self> {
        let params = fragment_params(fragment);
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };

        let access_token = get("access_token")?;
        let refresh_token = get("refresh_token").unwrap_or_default();
        let expires_at = get("expires_at")
            .and_then(|v| v.parse().ok())
            .or_else(|| {
                get("expires_in")
                    .and_then(|v| v.parse::<i64>().ok())
                    .map(|secs| now_secs + secs)
            })
            .unwrap_or(now_secs);

        Some(Self {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    pub fn is_expired(&self, now_secs: i64) -> bool {
        now_secs + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

/// The `error_description` of a failed login link (e.g. an expired one).
pub fn fragment_error(fragment: &str) -> Option<String> {
    let params = fragment_params(fragment);
    let find = |name: &str| params.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());
    find("error_description").or_else(|| find("error"))
}

/// Decoded `key=value` pairs of a URL fragment. A leading `#` is ignored, and
/// so is a route prefix like `/admin#` left by hash routing.
fn fragment_params(fragment: &str) -> Vec<(String, String)> {
    let fragment = fragment.rsplit('#').next().unwrap_or(fragment);
    fragment
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let value = value.replace('+', " ");
            let value = urlencoding::decode(&value).ok()?.into_owned();
            Some((key.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_791_981_000;

    #[test]
    fn test_fragment_with_tokens_becomes_session() {
        let fragment =
            "#access_token=eyJ.a.b&expires_in=3600&refresh_token=r-1&token_type=bearer&type=magiclink";
        let session = StoredSession::from_fragment(fragment, NOW).unwrap();
        assert_eq!(session.access_token, "eyJ.a.b");
        assert_eq!(session.refresh_token, "r-1");
        assert_eq!(session.expires_at, NOW + 3600);
        assert!(!session.is_expired(NOW));
    }

    #[test]
    fn test_expires_at_wins_over_expires_in() {
        let fragment = "access_token=t&expires_at=1791990000&expires_in=10";
        let session = StoredSession::from_fragment(fragment, NOW).unwrap();
        assert_eq!(session.expires_at, 1_791_990_000);
    }

    #[test]
    fn test_fragment_without_token_is_none() {
        assert!(StoredSession::from_fragment("", NOW).is_none());
        assert!(StoredSession::from_fragment("#/admin", NOW).is_none());
        assert!(StoredSession::from_fragment("#access_token=", NOW).is_none());
    }

    #[test]
    fn test_error_fragment_is_decoded() {
        let fragment = "#error=access_denied&error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired";
        assert_eq!(
            fragment_error(fragment).as_deref(),
            Some("Email link is invalid or has expired")
        );
        assert!(StoredSession::from_fragment(fragment, NOW).is_none());
    }

    #[test]
    fn test_expiry_has_a_margin() {
        let session = StoredSession {
            access_token: "t".to_string(),
            refresh_token: "r".to_string(),
            expires_at: NOW + 30,
        };
        assert!(session.is_expired(NOW));
        assert!(!session.is_expired(NOW - 120));
    }

    #[test]
    fn test_state_accessors() {
        let user = AuthUser {
            id: "u-1".to_string(),
            email: "dono@loja.com".to_string(),
        };
        assert!(SessionState::Resolving.is_loading());
        assert_eq!(SessionState::Resolving.user(), None);
        let signed_in = SessionState::Resolved(Some(user.clone()));
        assert!(!signed_in.is_loading());
        assert_eq!(signed_in.email(), Some("dono@loja.com"));
        assert_eq!(SessionState::Resolved(None).user(), None);
    }
}
