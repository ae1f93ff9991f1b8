//! Backend for a personal journaling service.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities,
//! ports, and use-case services; `inbound::http` adapts them to Actix
//! handlers; `outbound` provides the Diesel/SQLite and Argon2 adapters;
//! `server` wires everything into a running HTTP server.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::RequestId;
