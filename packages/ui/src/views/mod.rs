mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod protected_route;
pub use protected_route::{ProtectedRoute, Spinner};

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod new_post;
pub use new_post::NewPostView;

mod settings;
pub use settings::SettingsView;

mod post_success;
pub use post_success::PostSuccessView;

mod public_feed;
pub use public_feed::PublicFeedView;

mod confirm_attendance;
pub use confirm_attendance::ConfirmAttendanceView;
