// Domain layer: records received from the API, list queries, and the ports the client talks through.

pub mod model;
pub mod ports;
pub mod query;
