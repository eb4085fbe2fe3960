pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{HttpSettings, HttpTransport};
pub use adapters::token_store::{FileTokenStore, MemoryTokenStore};
pub use app::{FormatPolicy, PortalClient};
pub use config::ClientConfig;
pub use crate::core::coercer::coerce_name;
pub use crate::core::normalizer::{normalize, normalize_or_empty};
pub use crate::core::session::{AuthStatus, Session};
pub use domain::query::{CategoryFilter, ListQuery, Resource};
pub use utils::error::{ClientError, FormatError, Result};
