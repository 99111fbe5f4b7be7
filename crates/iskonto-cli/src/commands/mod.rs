//! CLI command implementations.

pub mod batch;
pub mod discount;
pub mod process;
