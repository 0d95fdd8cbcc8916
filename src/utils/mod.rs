pub mod auth;
pub mod mailer;

pub use auth::test_password;
