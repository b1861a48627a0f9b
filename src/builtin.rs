// src/builtin.rs

//! In-process tool dispatch.
//!
//! Some invocations name a tool that runs inside the executor process
//! instead of being spawned. The registry maps tool names to drivers; the
//! catalogue of drivers is supplied by the embedding application.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A tool implemented inside the executor process.
pub trait BuiltinDriver {
    /// Tool name as referenced by invocations (e.g. `builtin-copy`).
    fn name(&self) -> &str;

    /// Run the tool. Zero means success.
    fn run(
        &self,
        arguments: &[String],
        environment: &BTreeMap<String, String>,
        working_directory: &Path,
    ) -> i32;
}

/// Name → driver lookup used for in-process dispatch.
///
/// Empty by default; an invocation naming an unregistered builtin fails.
#[derive(Default)]
pub struct BuiltinRegistry {
    drivers: HashMap<String, Box<dyn BuiltinDriver>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver under its own name. A later registration replaces
    /// an earlier one with the same name.
    pub fn register(&mut self, driver: Box<dyn BuiltinDriver>) {
        self.drivers.insert(driver.name().to_string(), driver);
    }

    pub fn driver(&self, name: &str) -> Option<&dyn BuiltinDriver> {
        self.drivers.get(name).map(|driver| driver.as_ref())
    }
}
