//! Lead storage for the leads CRM.
//!
//! This crate provides the persistence gateway to the document store, the
//! lead repository (an in-memory store for tests and a SQLite document
//! store), the derived group directory, and the in-memory query facade used
//! to search and filter fetched leads.

mod error;
mod gateway;
mod groups;
mod memory;
mod query;
mod schema;
mod sqlite;
mod traits;
pub mod validate;

pub use error::*;
pub use gateway::*;
pub use groups::*;
pub use memory::*;
pub use query::*;
pub use sqlite::*;
pub use traits::*;
