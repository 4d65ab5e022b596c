//! # IronROS Bench
//!
//! Benchmarking utilities for IronROS performance testing.

pub mod encoding;
