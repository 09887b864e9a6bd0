//! Axum extractors and query parsing for the listing resource.
//!
//! - [`Caller`] - Extract caller tenant and roles from headers
//! - [`QueryParams`] - Extract raw, possibly repeated, query parameters
//! - [`parse_dimensions`], [`parse_sort_by`] - Parameter grammars
//! - [`build_list_logs_query`] - Turn raw parameters into a validated query

mod caller;
mod dimensions;
mod list_logs_query;
mod query_params;
mod sort_by;

pub use caller::{Caller, caller_from_headers};
pub use dimensions::parse_dimensions;
pub use list_logs_query::{
    KNOWN_PARAMETERS, ListLogsOptions, build_list_logs_query, parse_integer, parse_timestamp,
};
pub use query_params::QueryParams;
pub use sort_by::parse_sort_by;
