//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: `reqwest`-backed client for the backend REST API.
//!
//! Adapters translate between transport details and the domain's error
//! taxonomy. They contain no screen logic.

pub mod http;
