//! Configuration loading and schema definitions

mod loader;
mod schema;

pub use loader::{Config, ENV_HTTP_TIMEOUT_SECS, ENV_TIMEOUT_SECS};
pub use schema::*;
