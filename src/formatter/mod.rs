// src/formatter/mod.rs

//! Build progress reporting.
//!
//! The executor narrates every phase boundary through a [`Formatter`]. Each
//! event returns a string (possibly empty) that the executor writes to
//! standard output verbatim; the formatter decides everything about
//! presentation and may keep state between events.

use std::io::{self, Write};
use std::path::Path;

use crate::invocation::Invocation;
use crate::types::{BuildContext, Target};

pub mod console;

pub use console::ConsoleFormatter;

/// Sink for build lifecycle events.
///
/// `begin`/`success`/`failure` bracket the whole run, the `*_target` pair
/// brackets one target, and the remaining events follow the per-target
/// pipeline: dependency check, auxiliary files, product structure, then the
/// individual invocations of both passes.
pub trait Formatter {
    fn begin(&mut self, context: &BuildContext) -> String;
    fn success(&mut self, context: &BuildContext) -> String;
    fn failure(&mut self, context: &BuildContext, failing: &[Invocation]) -> String;

    fn begin_target(&mut self, context: &BuildContext, target: &Target) -> String;
    fn finish_target(&mut self, context: &BuildContext, target: &Target) -> String;

    fn begin_check_dependencies(&mut self, target: &Target) -> String;
    fn finish_check_dependencies(&mut self, target: &Target) -> String;

    fn begin_write_auxiliary_files(&mut self, target: &Target) -> String;
    fn finish_write_auxiliary_files(&mut self, target: &Target) -> String;

    fn create_auxiliary_directory(&mut self, directory: &Path) -> String;
    fn write_auxiliary_file(&mut self, path: &Path) -> String;
    fn set_auxiliary_executable(&mut self, path: &Path) -> String;

    fn begin_create_product_structure(&mut self, target: &Target) -> String;
    fn finish_create_product_structure(&mut self, target: &Target) -> String;

    fn begin_invocation(
        &mut self,
        invocation: &Invocation,
        executable_display_name: &str,
        creates_product_structure: bool,
    ) -> String;
    fn finish_invocation(
        &mut self,
        invocation: &Invocation,
        executable_display_name: &str,
        creates_product_structure: bool,
    ) -> String;
}

/// Write formatter output verbatim to standard output.
pub fn print(output: &str) {
    if output.is_empty() {
        return;
    }
    print!("{output}");
    let _ = io::stdout().flush();
}
