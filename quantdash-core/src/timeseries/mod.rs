//! Time-series utilities shared by the analytics and the orchestrator.
//!
//! - `resample`: down-sample daily closes to month-end and year-end buckets
/// Calendar resampling of dated values.
pub mod resample;
