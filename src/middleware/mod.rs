//! Middleware for the credgate API

pub mod auth;

pub use auth::AuthenticatedUser;
