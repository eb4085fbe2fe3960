// Adapters layer: concrete implementations of the domain ports (http transport, token storage).

pub mod http;
pub mod token_store;
