//! Request and response definitions for the leads CRM HTTP interface.
//!
//! Every operation is a single JSON POST. Field names are camelCase to match
//! the lead documents themselves.

mod error;
pub mod requests;
pub mod responses;

pub use error::*;
