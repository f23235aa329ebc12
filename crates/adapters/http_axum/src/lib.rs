//! # sensorhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the readings REST API (`/devices/{device_uuid}/readings/…`,
//!   `/devices/summary/`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses: JSON on success, a
//!   plain-text status line for validation failures, faults, and the
//!   `No records found` sentinel
//!
//! ## Dependency rule
//! Depends on `sensorhub-app` (for the port trait and service) and
//! `sensorhub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
