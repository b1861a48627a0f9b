// src/exec/mod.rs

//! Execution layer.
//!
//! - [`executor`] owns the sequential build pipeline: target ordering,
//!   auxiliary file materialisation, and the two invocation passes.
//! - [`subprocess`] abstracts how external tools are spawned so tests can
//!   substitute a runner that never touches the OS.

pub mod executor;
pub mod subprocess;

pub use executor::SimpleExecutor;
pub use subprocess::{ProcessRunner, SystemProcessRunner};
