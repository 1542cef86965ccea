//! MCP tool modules.
//!
//! Tools are grouped by domain: database lookups routed through the operation
//! catalog, and contextual help describing them.

pub mod lookup;
mod context;
