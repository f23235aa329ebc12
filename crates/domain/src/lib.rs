//! # sensorhub-domain
//!
//! Pure domain model for the sensorhub reading-statistics service.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, epoch-second timestamps
//! - Define **Readings** (one sensor observation: device, type, value, time)
//! - Define **Filters** (conjunctive constraints narrowing a scan)
//! - The **aggregation engine**: mean, median, mode, quartiles (R-7
//!   interpolation) and the per-device summary rollup
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod filter;
pub mod reading;
pub mod stats;
pub mod time;
