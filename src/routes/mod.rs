pub mod admin_routes;
pub mod auth_routes;
pub mod message_routes;
pub mod plan_routes;
