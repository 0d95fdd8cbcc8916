pub mod admin_handler;
pub mod auth_handler;
pub mod message_handler;
pub mod plan_handler;
