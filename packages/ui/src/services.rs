//! Service construction for all platforms.
//!
//! One [`AppServices`] is built at launch and shared through context. The
//! storage backend is picked by target:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::BrowserStorage`]
//! - **Native**: [`store::MemoryStorage`], nothing survives a restart

use api::{AuthService, SupabaseAuth, SupabaseClient, SupabaseConfig, TokenHandle};
use dioxus::prelude::*;
use store::{LocalPostStore, LocalStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type Storage = store::BrowserStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type Storage = store::MemoryStorage;

pub type Auth = AuthService<SupabaseAuth, Storage>;

/// Everything the pages talk to.
#[derive(Clone)]
pub struct AppServices {
    /// Tables of the hosted backend, for the admin pages.
    pub remote: SupabaseClient,
    pub auth: Auth,
    /// Device-local business profile, for the public pages.
    pub local: LocalStore<Storage>,
    /// Device-local posts, for the public pages.
    pub posts: LocalPostStore<Storage>,
}

impl AppServices {
    pub fn new(config: SupabaseConfig) -> Self {
        let token = TokenHandle::default();
        let storage = make_storage();
        let local = LocalStore::new(storage.clone());
        Self {
            remote: SupabaseClient::new(config.clone(), token.clone()),
            auth: AuthService::new(SupabaseAuth::new(config), storage, token),
            posts: LocalPostStore::new(local.clone()),
            local,
        }
    }

    /// Configuration from the environment, or the local development stack.
    pub fn from_env() -> Self {
        let config = SupabaseConfig::from_env().unwrap_or_else(|e| {
            tracing::error!(error = %e, "backend not configured, using local defaults");
            SupabaseConfig::local_dev()
        });
        tracing::info!(url = %config.url, "backend");
        Self::new(config)
    }
}

pub fn make_storage() -> Storage {
    Storage::default()
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// Where the emailed login link should land: this page, without its fragment.
pub fn login_redirect_target() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let page = web_sys::window().and_then(|w| {
            let location = w.location();
            Some(format!("{}{}", location.origin().ok()?, location.pathname().ok()?))
        });
        if let Some(page) = page {
            return page;
        }
    }
    "http://localhost:8080/".to_string()
}

/// Shareable address of the public feed.
pub fn public_feed_url() -> String {
    let base = login_redirect_target();
    format!("{base}#{}", api::Destination::Feed.path())
}
