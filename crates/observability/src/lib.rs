//! Tracing/logging setup shared by hosts embedding the replay core.
//!
//! The core only emits `tracing` events; installing a subscriber is the
//! host's call.

pub mod tracing;

pub use self::tracing::{LogFormat, init, init_for_tests, init_with};
