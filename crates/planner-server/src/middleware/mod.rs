//! Request middleware for planner-server.

pub mod auth;

pub use auth::resolve_user;
