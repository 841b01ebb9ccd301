//! Test module for trellis-router
//!
//! Property-based tests (proptest) for the route tree and error types, and
//! scenario tests (tokio) for the navigation protocol.

#[cfg(test)]
pub mod error_tests;


#[cfg(test)]
pub mod router_tests;
