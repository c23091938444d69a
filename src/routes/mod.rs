//! API route definitions

mod auth;

pub use auth::auth_routes;
