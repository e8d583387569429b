//! Domain layer for the static tenant store plugin.

pub mod client;
pub mod service;

pub use client::StaticStoreClient;
pub use service::{Service, StoreConfigError};
