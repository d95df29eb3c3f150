//! Command catalog, schema validation and registry synchronization for the bingo bot.

pub mod catalog;
mod error;
pub mod invite;
pub mod report;
mod schema;
pub mod sync;

pub use catalog::Catalog;
pub use error::{RegistrarError, SchemaError};
pub use invite::InviteLink;
pub use report::{Report, SyncOutcome};
pub use schema::{validate, MAX_CHOICES, MAX_COMMANDS, MAX_DESCRIPTION_LEN, MAX_OPTIONS};
pub use sync::{Credentials, HttpTransport, Registered, RegistryResponse, RegistryTransport, Synchronizer};

/// Result type for registrar operations.
pub type Result<T> = std::result::Result<T, RegistrarError>;
