//! # sensorhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters implement:
//!   - `ReadingStore` — insert one reading, scan by filter
//! - Provide the **use-case service**:
//!   - `ReadingService` — per-endpoint validation, filter construction,
//!     and dispatch into the domain aggregation engine
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `sensorhub-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
