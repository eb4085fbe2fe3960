pub mod coercer;
pub mod normalizer;
pub mod session;

pub use crate::domain::model::{Page, PolymorphicField, Record};
pub use crate::domain::ports::{ApiRequest, TokenStore, Transport};
pub use crate::utils::error::Result;
