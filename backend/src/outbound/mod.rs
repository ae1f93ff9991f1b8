//! Driven adapters: persistence and password hashing.

pub mod persistence;
pub mod security;
