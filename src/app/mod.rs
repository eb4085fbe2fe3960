pub mod client;
pub mod services;

pub use client::{FormatPolicy, PortalClient};
