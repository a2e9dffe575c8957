pub mod client;
pub mod error;
pub mod types;

pub use client::ZabbixClient;
pub use error::ZabbixError;
