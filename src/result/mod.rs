//! Submission results
//!
//! A `FormResult` is produced once, on a successful final submit, and is
//! never mutated afterwards.

mod aggregator;
mod types;

pub use aggregator::{aggregate, aggregate_at, FILE_TYPE};
pub use types::{FormInfo, FormResult, ResultField};
