//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: one-time tracing
//! initialisation that plays well with cargo/nextest output capture.

pub mod logging;
