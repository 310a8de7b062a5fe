//! Shared test infrastructure for the end-to-end journey tests.

pub mod fixtures;
pub mod harness;
