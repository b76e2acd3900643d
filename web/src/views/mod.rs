pub mod appointments;
pub mod auth;
pub mod booking;
pub mod home;
pub mod not_found;

pub use appointments::AppointmentsPage;
pub use auth::{LoginPage, SignupPage};
pub use booking::BookingPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
