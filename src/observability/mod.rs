//! Logging setup for the archmap binary.
//!
//! The analysis core never logs; orchestration in `builders` and `commands`
//! emits `tracing` events, and this module installs the subscriber that
//! writes them to stderr.

pub mod tracing;

pub use self::tracing::{init_tracing, verbosity_directive, LOG_ENV_VAR};
