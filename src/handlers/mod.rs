//! HTTP handlers for the credgate API

pub mod auth;

pub use crate::middleware::AuthenticatedUser;
