//! Elasticsearch search query translation.
//!
//! Translates log listing queries into Elasticsearch Query DSL.

pub mod request_builder;

pub use request_builder::SearchBuilder;
