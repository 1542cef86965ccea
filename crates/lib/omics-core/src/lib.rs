//! Core lookups and dispatch for mcp-omics.
//!
//! This crate owns the outbound HTTP client for the supported bioinformatics
//! databases, the record types each lookup produces, and the operation catalog
//! that maps tool names onto those lookups.

pub mod catalog;
pub mod client;
pub mod error;
pub mod providers;

pub use catalog::{Catalog, DispatchError, Operation, OperationInfo};
pub use client::{Endpoints, Lookup, ProviderClient, ResultMap};
pub use error::{Provider, ProviderError};
