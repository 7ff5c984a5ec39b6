//! breachclean: Breach-Notification Dataset Cleaning Library
//!
//! Loads a breach-notification table, imputes and deduplicates it, coerces
//! dates and categoricals, derives calendar features, encodes categories and
//! summarizes individuals affected per breach type.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
