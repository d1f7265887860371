//! Request handler module
//!
//! Fetches a single record by identifier and shapes it into an API response.

mod get_data;
mod response;

pub use get_data::{Formatter, GetData, ValidatedGetData, NOT_FOUND_MESSAGE};
pub use response::ApiResponse;
