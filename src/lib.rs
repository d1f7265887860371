//! Get-one-record API
//!
//! Validates a record identifier from the request path, resolves the named
//! entity to a [`data::Model`] through an [`registry::EntityRegistry`], looks the
//! record up and shapes the result into an API response: the (optionally
//! formatted) record, or a 404 with `common.message.notFound`.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod handler;
pub mod logger;
pub mod registry;
pub mod server;

pub use data::{DataError, GetParams, Model, Record, RecordId};
pub use error::{ApiGetError, ErrorCode};
pub use handler::{ApiResponse, Formatter, GetData, ValidatedGetData};
pub use registry::{EntityRegistry, EntityResolver, ResolveError};
