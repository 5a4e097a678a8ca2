//! Backend configuration from environment variables.

use crate::error::ConfigError;

const URL_VAR: &str = "SUPABASE_URL";
const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Address and public key of the hosted backend project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// The project's public "anon" key, sent as `apikey` on every request.
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// The process environment wins (after loading `.env` on native targets);
    /// otherwise the values baked in at compile time are used, which is the
    /// only source a WASM build has.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        dotenvy::dotenv().ok();

        let url = lookup(URL_VAR, option_env!("SUPABASE_URL"))
            .ok_or(ConfigError::Missing(URL_VAR))?;
        let anon_key = lookup(ANON_KEY_VAR, option_env!("SUPABASE_ANON_KEY"))
            .ok_or(ConfigError::Missing(ANON_KEY_VAR))?;

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl {
                name: URL_VAR,
                value: url,
            });
        }

        Ok(Self::new(url, anon_key))
    }

    /// The defaults of a `supabase start` local stack, with no key.
    pub fn local_dev() -> Self {
        Self::new("http://localhost:54321", "")
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.url)
    }
}

fn lookup(name: &str, baked: Option<&'static str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_without_double_slash() {
        let config = SupabaseConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(config.rest_url("posts"), "https://abc.supabase.co/rest/v1/posts");
        assert_eq!(config.auth_url("otp"), "https://abc.supabase.co/auth/v1/otp");
    }
}
