//! HTTP adapters for the backend REST API.

mod api_client;

pub use api_client::ReqwestApiClient;
