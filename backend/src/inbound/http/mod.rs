//! HTTP inbound adapter exposing the journal REST endpoints.

pub mod accounts;
pub mod auth;
pub mod entries;
pub mod error;
pub mod forms;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
