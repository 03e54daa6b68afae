// dnac-api: Async Rust client for the Catalyst Center (DNA Center) REST API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod interfaces;
pub mod models;
pub mod transport;

pub use auth::{Credentials, Session};
pub use client::DnacClient;
pub use devices::find_device_by_ip;
pub use error::Error;
pub use models::{Device, Interface};
pub use transport::{TlsMode, TransportConfig};
