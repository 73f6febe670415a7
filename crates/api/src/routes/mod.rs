pub mod auth;
pub mod holding;
pub mod order;
pub mod position;
