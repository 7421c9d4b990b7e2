// omada-api: Async Rust client for the TP-Link Omada controller API
//
// Hand-written client for the controller's v2 web interface. Covers session
// authentication and the site-scoped resource endpoints, all wrapped in the
// standard `{ errorCode, msg, result }` envelope.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod settings;
pub mod sites;
pub mod transport;
pub mod wireless;

pub use client::OmadaClient;
pub use config::{ClientConfig, Credentials};
pub use error::Error;
pub use models::GroupType;
pub use transport::TransportConfig;
