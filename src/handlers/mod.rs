//! MCP tool handlers for the daybook server
//!
//! Each handler is in a separate file; all of them only read records.

pub mod agenda;
pub mod occurs;
pub mod today;
