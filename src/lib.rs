// src/lib.rs

pub mod builtin;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod formatter;
pub mod fs;
pub mod invocation;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use tracing::debug;

use crate::builtin::BuiltinRegistry;
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::resolver::ManifestResolver;
use crate::errors::Result;
use crate::exec::executor::SimpleExecutor;
use crate::formatter::console::ConsoleFormatter;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the manifest, resolves the target graph, and drives
/// the executor with the console formatter. Returns whether the build
/// succeeded; configuration problems surface as errors before any target
/// runs.
pub fn run(args: CliArgs) -> Result<bool> {
    let manifest_path = PathBuf::from(&args.manifest);
    let manifest = load_and_validate(&manifest_path)?;

    debug!(
        manifest = %manifest_path.display(),
        targets = manifest.target.len(),
        dry_run = args.dry_run,
        "manifest loaded"
    );

    let resolver = ManifestResolver::new(manifest);
    let build_environment = resolver.build_environment();
    let build_context = resolver.build_context();
    let target_graph = resolver.target_graph();

    let mut executor = SimpleExecutor::new(
        Box::new(ConsoleFormatter::new()),
        args.dry_run,
        BuiltinRegistry::new(),
    );

    Ok(executor.build(&build_environment, &build_context, &resolver, &target_graph))
}
