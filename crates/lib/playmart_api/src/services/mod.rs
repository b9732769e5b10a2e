//! Request-level services bridging API bodies and the core orchestrator.

pub mod auth;
pub mod profile;
