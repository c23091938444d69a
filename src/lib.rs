//! credgate - credential-based token issuance service
//!
//! Turns a verified email/password credential into a signed, time-bound access
//! token and validates that token on protected requests.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
