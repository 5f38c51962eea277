//! Headless core of the admin console: associate picker, manager
//! registration and the adapters that connect them to the backend API.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
