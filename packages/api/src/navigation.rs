//! # Where a view may go, and whether it may render
//!
//! Views do not know the router. They emit a [`Navigation`] and the app maps
//! each [`Destination`] to its route. The decisions a route guard makes are
//! plain functions of the [`SessionState`] here, so they can be tested
//! without a UI.
//!
//! | Destination | Path | Guarded | Needs a handed-over post |
//! |-------------|------|---------|--------------------------|
//! | `Login` | `/login` | no | no |
//! | `Dashboard` | `/admin` | yes | no |
//! | `NewPost` | `/new-post` | yes | no |
//! | `Settings` | `/settings` | yes | no |
//! | `PostSuccess` | `/post-success` | yes | yes, else `/admin` |
//! | `Feed` | `/feed` | no | no |
//! | `ConfirmAttendance` | `/confirm-attendance` | no | yes, else `/feed` |

use crate::auth::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    Dashboard,
    NewPost,
    Settings,
    PostSuccess,
    Feed,
    ConfirmAttendance,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/admin",
            Self::NewPost => "/new-post",
            Self::Settings => "/settings",
            Self::PostSuccess => "/post-success",
            Self::Feed => "/feed",
            Self::ConfirmAttendance => "/confirm-attendance",
        }
    }

    /// Where to go when this page is opened without the post it shows.
    pub fn without_handoff(self) -> Option<Self> {
        match self {
            Self::PostSuccess => Some(Self::Dashboard),
            Self::ConfirmAttendance => Some(Self::Feed),
            _ => None,
        }
    }
}

/// A navigation request emitted by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: Destination,
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

impl Navigation {
    pub fn push(to: Destination) -> Self {
        Self { to, replace: false }
    }

    pub fn replace(to: Destination) -> Self {
        Self { to, replace: true }
    }
}

/// Where the app lands for a path the route table does not know, `/` included.
pub fn fallback() -> Navigation {
    Navigation::replace(Destination::Login)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving: show a neutral indicator.
    Wait,
    Render,
    Redirect(Navigation),
}

/// Decision for a protected page.
pub fn guard(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Resolving => GuardDecision::Wait,
        SessionState::Resolved(None) => GuardDecision::Redirect(Navigation::replace(Destination::Login)),
        SessionState::Resolved(Some(_)) => GuardDecision::Render,
    }
}

/// The login page sends an already signed-in visitor to the dashboard.
pub fn login_redirect(state: &SessionState) -> Option<Navigation> {
    state
        .user()
        .map(|_| Navigation::replace(Destination::Dashboard))
}

/// Where the dashboard sends an owner who has no business yet.
///
/// Replaced, so Back from Settings does not land on the dashboard and bounce.
pub fn setup_redirect() -> Navigation {
    Navigation::replace(Destination::Settings)
}

/// Decision for a page that shows a handed-over post.
pub fn require_handoff(page: Destination, has_post: bool) -> GuardDecision {
    match page.without_handoff() {
        Some(to) if !has_post => {
            tracing::info!(page = page.path(), to = to.path(), "no post handed over, leaving");
            GuardDecision::Redirect(Navigation::replace(to))
        }
        _ => GuardDecision::Render,
    }
}
