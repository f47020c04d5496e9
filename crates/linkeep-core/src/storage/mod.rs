//! SQLite persistence for the bookmark store
//!
//! - `schema`: table definitions and version tracking
//! - `error`: typed storage errors

mod error;
mod schema;

pub use error::{StorageError, StorageResult};
pub use schema::{get_schema_version, init_schema, needs_init, SCHEMA_VERSION};
