// src/exec/executor.rs

//! Sequential build executor.
//!
//! Targets run one at a time in topological order; within a target,
//! invocations run one at a time in data-dependency order, first the
//! product-structure pass and then the content pass. The first failure
//! aborts the run. Build progress goes through the formatter to stdout;
//! configuration errors (cycles, unresolvable targets) go to stderr
//! directly.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, error};

use crate::builtin::BuiltinRegistry;
use crate::dag::graph::DirectedGraph;
use crate::dag::sort::sort_invocations;
use crate::exec::subprocess::{ProcessRunner, SystemProcessRunner};
use crate::formatter::{self, Formatter};
use crate::fs::{FileSystem, RealFileSystem};
use crate::invocation::{Executable, Invocation};
use crate::types::{BuildContext, BuildEnvironment, Target, TargetResolver};

/// Executor that runs every invocation in order on the calling thread.
///
/// In dry-run mode every formatter event fires exactly as in a real run,
/// but no directory is created, no file is written, and no tool executes.
pub struct SimpleExecutor {
    formatter: Box<dyn Formatter>,
    dry_run: bool,
    builtins: BuiltinRegistry,
    fs: Box<dyn FileSystem>,
    processes: Box<dyn ProcessRunner>,
    // A dry run creates nothing on disk, so the directories and executable
    // bits a real run would have produced are remembered here; otherwise the
    // existence checks below would emit extra events and break the
    // dry-run/real-run event parity.
    created_directories: HashSet<PathBuf>,
    marked_executable: HashSet<PathBuf>,
}

impl SimpleExecutor {
    pub fn new(formatter: Box<dyn Formatter>, dry_run: bool, builtins: BuiltinRegistry) -> Self {
        Self::with_collaborators(
            formatter,
            dry_run,
            builtins,
            Box::new(RealFileSystem),
            Box::new(SystemProcessRunner),
        )
    }

    /// Full injection of the effect collaborators, used by tests.
    pub fn with_collaborators(
        formatter: Box<dyn Formatter>,
        dry_run: bool,
        builtins: BuiltinRegistry,
        fs: Box<dyn FileSystem>,
        processes: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            formatter,
            dry_run,
            builtins,
            fs,
            processes,
            created_directories: HashSet::new(),
            marked_executable: HashSet::new(),
        }
    }

    /// Run the whole target graph. Returns whether the build succeeded.
    ///
    /// A cycle in the target graph aborts before any target executes; the
    /// formatter sees `begin` but neither `success` nor `failure` in that
    /// case. A target whose environment cannot be resolved is skipped and
    /// the build continues; any other failure aborts the run with a
    /// `failure` event.
    pub fn build(
        &mut self,
        build_environment: &BuildEnvironment,
        build_context: &BuildContext,
        resolver: &dyn TargetResolver,
        target_graph: &DirectedGraph<Target>,
    ) -> bool {
        self.created_directories.clear();
        self.marked_executable.clear();

        formatter::print(&self.formatter.begin(build_context));

        let ordered_targets = match target_graph.ordered() {
            Ok(targets) => targets,
            Err(_) => {
                eprintln!("error: cycle detected in target dependencies");
                return false;
            }
        };

        debug!(targets = ordered_targets.len(), "target graph ordered");

        for target in &ordered_targets {
            formatter::print(&self.formatter.begin_target(build_context, target));

            let target_environment =
                match resolver.target_environment(build_environment, target) {
                    Some(environment) => environment,
                    None => {
                        eprintln!(
                            "error: couldn't create target environment for {}",
                            target.name()
                        );
                        formatter::print(&self.formatter.finish_target(build_context, target));
                        continue;
                    }
                };

            formatter::print(&self.formatter.begin_check_dependencies(target));
            let invocations = resolver.invocations(target, &target_environment);
            formatter::print(&self.formatter.finish_check_dependencies(target));

            if let Err(failing) = self.build_target(target, &invocations) {
                formatter::print(&self.formatter.finish_target(build_context, target));
                formatter::print(&self.formatter.failure(build_context, &failing));
                return false;
            }

            formatter::print(&self.formatter.finish_target(build_context, target));
        }

        formatter::print(&self.formatter.success(build_context));
        true
    }

    /// Per-target pipeline: auxiliary files, sort, structure pass, content
    /// pass. `Err` carries the failing invocations for the `failure` event;
    /// it is empty when no single invocation is to blame (auxiliary file
    /// errors, invocation graph cycles).
    fn build_target(
        &mut self,
        target: &Target,
        invocations: &[Invocation],
    ) -> Result<(), Vec<Invocation>> {
        if !self.write_auxiliary_files(target, invocations) {
            return Err(Vec::new());
        }

        let ordered = match sort_invocations(invocations) {
            Ok(ordered) => ordered,
            Err(_) => {
                eprintln!("error: cycle detected building invocation graph");
                return Err(Vec::new());
            }
        };

        formatter::print(&self.formatter.begin_create_product_structure(target));
        let structure_result = self.perform_invocations(&ordered, true);
        formatter::print(&self.formatter.finish_create_product_structure(target));
        structure_result?;

        self.perform_invocations(&ordered, false)
    }

    /// Materialise every invocation's auxiliary files, in target order.
    fn write_auxiliary_files(&mut self, target: &Target, invocations: &[Invocation]) -> bool {
        formatter::print(&self.formatter.begin_write_auxiliary_files(target));

        for invocation in invocations {
            for auxiliary_file in &invocation.auxiliary_files {
                let directory = auxiliary_file
                    .path
                    .parent()
                    .unwrap_or_else(|| Path::new("/"));
                if !self.fs.is_dir(directory) && !self.created_directories.contains(directory) {
                    formatter::print(&self.formatter.create_auxiliary_directory(directory));

                    if !self.dry_run {
                        if let Err(err) = self.fs.create_dir_all(directory) {
                            error!(error = %err, "failed to create auxiliary directory");
                            return false;
                        }
                    }
                    self.created_directories.insert(directory.to_path_buf());
                }

                formatter::print(&self.formatter.write_auxiliary_file(&auxiliary_file.path));

                if !self.dry_run {
                    if let Err(err) = self
                        .fs
                        .write(&auxiliary_file.path, &auxiliary_file.contents)
                    {
                        error!(error = %err, "failed to write auxiliary file");
                        return false;
                    }
                }

                if auxiliary_file.executable
                    && !self.fs.is_executable(&auxiliary_file.path)
                    && !self.marked_executable.contains(&auxiliary_file.path)
                {
                    formatter::print(
                        &self.formatter.set_auxiliary_executable(&auxiliary_file.path),
                    );

                    if !self.dry_run {
                        if let Err(err) = self.fs.set_executable(&auxiliary_file.path) {
                            error!(error = %err, "failed to mark auxiliary file executable");
                            return false;
                        }
                    }
                    self.marked_executable.insert(auxiliary_file.path.clone());
                }
            }
        }

        formatter::print(&self.formatter.finish_write_auxiliary_files(target));
        true
    }

    /// Run one pass over the ordered invocations.
    ///
    /// Phony invocations and invocations belonging to the other pass are
    /// skipped. `begin_invocation` and `finish_invocation` are paired
    /// unconditionally, on success and on failure alike.
    fn perform_invocations(
        &mut self,
        ordered: &[&Invocation],
        create_product_structure: bool,
    ) -> Result<(), Vec<Invocation>> {
        for &invocation in ordered {
            if invocation.executable.is_phony() {
                continue;
            }
            if invocation.creates_product_structure != create_product_structure {
                continue;
            }

            let display_name = invocation.executable.display_name().to_string();

            formatter::print(&self.formatter.begin_invocation(
                invocation,
                &display_name,
                create_product_structure,
            ));

            let outcome = if self.dry_run {
                Ok(())
            } else {
                self.dispatch(invocation)
            };

            formatter::print(&self.formatter.finish_invocation(
                invocation,
                &display_name,
                create_product_structure,
            ));

            if let Err(err) = outcome {
                error!(invocation = %display_name, error = %err, "invocation failed");
                return Err(vec![invocation.clone()]);
            }
        }

        Ok(())
    }

    /// Prepare output directories, then run the invocation's tool.
    fn dispatch(&self, invocation: &Invocation) -> Result<()> {
        for output in &invocation.outputs {
            let directory = output.parent().unwrap_or_else(|| Path::new("/"));
            self.fs
                .create_dir_all(directory)
                .with_context(|| format!("creating output directory for {:?}", output))?;
        }

        match &invocation.executable {
            Executable::Builtin { name } => {
                let driver = self
                    .builtins
                    .driver(name)
                    .ok_or_else(|| anyhow!("unknown builtin tool {:?}", name))?;

                let exit_code = driver.run(
                    &invocation.arguments,
                    &invocation.environment,
                    &invocation.working_directory,
                );
                if exit_code != 0 {
                    bail!("builtin tool {:?} failed with exit code {}", name, exit_code);
                }
                Ok(())
            }
            Executable::External { path, .. } => {
                let exit_code = self.processes.execute(
                    path,
                    &invocation.arguments,
                    &invocation.environment,
                    &invocation.working_directory,
                )?;
                if exit_code != 0 {
                    bail!("{:?} failed with exit code {}", path, exit_code);
                }
                Ok(())
            }
            // Filtered out by the caller.
            Executable::Phony => Ok(()),
        }
    }
}
