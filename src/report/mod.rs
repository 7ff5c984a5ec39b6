//! Report module - summarizing cleaning results

pub mod summary;

pub use summary::*;
