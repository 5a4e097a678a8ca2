//! # API crate: the hosted backend of Status Pro
//!
//! Everything the admin pages need from the backend, with no UI in it. The
//! backend is a Supabase project: PostgREST for the `business` and `posts`
//! tables, GoTrue for passwordless email sign-in. Both are reached with
//! `reqwest`, so the same code runs in the browser (WASM `fetch`) and in
//! native tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`remote`] | The [`RemoteData`] contract: select/insert/update/delete with equality filters |
//! | [`supabase`] | [`SupabaseClient`], the PostgREST implementation, and the shared [`TokenHandle`] |
//! | [`memory`] | [`MemoryRemote`], an in-memory implementation that records its calls |
//! | [`rows`] | Table rows and the column/field mapping to the `store` model |
//! | [`posts`] | [`RemotePostStore`], the `PostStore` of one business |
//! | [`admin`] | Dashboard, New Post and Settings flows |
//! | [`auth`] | Magic-link auth backend, stored session, [`AuthService`] |
//! | [`navigation`] | Destinations and route guard decisions |
//! | [`config`] | [`SupabaseConfig`] from the environment |
//!
//! ## Wiring
//!
//! The app builds one [`TokenHandle`] and hands it to both the
//! [`AuthService`] and the [`SupabaseClient`]: the auth service writes the
//! access token after resolving or refreshing a session, and every table
//! request reads it. Admin calls go through [`AuthService::authorized`], which
//! refreshes an expired session and retries a call answered with 401 once.

pub mod admin;
pub mod auth;
pub mod config;
mod error;
pub mod memory;
pub mod navigation;
pub mod posts;
pub mod remote;
pub mod rows;
pub mod supabase;

pub use admin::{Dashboard, SaveOutcome, SettingsForm};
pub use auth::{AuthBackend, AuthService, AuthUser, SessionState, SupabaseAuth};
pub use config::SupabaseConfig;
pub use error::{AuthError, ConfigError, PublishError, RemoteError, SettingsError, Unauthorized};
pub use memory::MemoryRemote;
pub use navigation::{Destination, GuardDecision, Navigation};
pub use posts::RemotePostStore;
pub use remote::{Filter, Order, RemoteData};
pub use supabase::{SupabaseClient, TokenHandle};
