// src/dag/mod.rs

//! Dependency graph construction and ordering.
//!
//! - [`graph`] holds the generic insertion-ordered directed graph used for
//!   both targets and invocations.
//! - [`sort`] derives the intra-target invocation graph from declared input
//!   and output file sets and orders it.

pub mod graph;
pub mod sort;

pub use graph::{CycleDetected, DirectedGraph};
pub use sort::sort_invocations;
