pub mod auth_guard;
pub mod error;
pub mod loading;
pub mod navbar;
pub mod service_picker;
pub mod time_slot_picker;

pub use auth_guard::{login_path, use_api, use_session_state, AuthGuard, SessionState};
pub use error::ErrorView;
pub use loading::LoadingView;
pub use navbar::Navbar;
pub use service_picker::ServicePicker;
pub use time_slot_picker::TimeSlotPicker;
