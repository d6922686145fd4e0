//! Frame input schema
//!
//! This module accepts the capture pipeline's frame stream, either as a JSON
//! array or as newline-delimited JSON, and reports frames that break the
//! input assumptions without rejecting them.

mod adapter;
mod validation;

pub use adapter::*;
pub use validation::*;
