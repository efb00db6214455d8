//! SportsWorldCentral API surface
//!
//! - `types`: record types and their expected shapes
//! - `query`: paging and filter parameters for the list endpoints
//! - `client`: the resource operations
//! - `bulk`: whole-dataset file downloads

pub mod bulk;
pub mod client;
pub mod query;
pub mod types;
