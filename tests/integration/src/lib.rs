//! Integration test utilities for the reaction client
//!
//! This crate runs an in-process backend that speaks the social network's
//! reaction and content routes, so the real HTTP adapter can be exercised
//! end to end.


pub use fixtures::*;
pub use helpers::*;
