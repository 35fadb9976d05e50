//! Core record definitions for the leads CRM.
//!
//! This crate defines the lead record stored in the document store, the
//! field sets accepted when creating or updating one, and the enumerated
//! pipeline status and temperature values.

mod lead;
mod status;

pub use lead::*;
pub use status::*;
