#![allow(dead_code)]

//! Shared fixtures for the executor integration tests: an event-recording
//! formatter, a scripted process runner, and a static target resolver.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use buildexec::builtin::BuiltinRegistry;
use buildexec::exec::executor::SimpleExecutor;
use buildexec::exec::subprocess::ProcessRunner;
use buildexec::formatter::Formatter;
use buildexec::fs::FileSystem;
use buildexec::invocation::{Executable, Invocation};
use buildexec::types::{
    BuildContext, BuildEnvironment, Target, TargetEnvironment, TargetResolver,
};

/// One recorded formatter event. Target-scoped events carry the target name;
/// invocation events carry the display name and pass flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin,
    Success,
    Failure(Vec<Invocation>),
    BeginTarget(String),
    FinishTarget(String),
    BeginCheckDependencies(String),
    FinishCheckDependencies(String),
    BeginWriteAuxiliaryFiles(String),
    FinishWriteAuxiliaryFiles(String),
    CreateAuxiliaryDirectory(PathBuf),
    WriteAuxiliaryFile(PathBuf),
    SetAuxiliaryExecutable(PathBuf),
    BeginCreateProductStructure(String),
    FinishCreateProductStructure(String),
    BeginInvocation(String, bool),
    FinishInvocation(String, bool),
}

/// Formatter that records events and emits no output. Clones share the
/// event log, so tests keep one handle while the executor owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingFormatter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) -> String {
        self.events.lock().unwrap().push(event);
        String::new()
    }
}

impl Formatter for RecordingFormatter {
    fn begin(&mut self, _context: &BuildContext) -> String {
        self.push(Event::Begin)
    }

    fn success(&mut self, _context: &BuildContext) -> String {
        self.push(Event::Success)
    }

    fn failure(&mut self, _context: &BuildContext, failing: &[Invocation]) -> String {
        self.push(Event::Failure(failing.to_vec()))
    }

    fn begin_target(&mut self, _context: &BuildContext, target: &Target) -> String {
        self.push(Event::BeginTarget(target.name().to_string()))
    }

    fn finish_target(&mut self, _context: &BuildContext, target: &Target) -> String {
        self.push(Event::FinishTarget(target.name().to_string()))
    }

    fn begin_check_dependencies(&mut self, target: &Target) -> String {
        self.push(Event::BeginCheckDependencies(target.name().to_string()))
    }

    fn finish_check_dependencies(&mut self, target: &Target) -> String {
        self.push(Event::FinishCheckDependencies(target.name().to_string()))
    }

    fn begin_write_auxiliary_files(&mut self, target: &Target) -> String {
        self.push(Event::BeginWriteAuxiliaryFiles(target.name().to_string()))
    }

    fn finish_write_auxiliary_files(&mut self, target: &Target) -> String {
        self.push(Event::FinishWriteAuxiliaryFiles(target.name().to_string()))
    }

    fn create_auxiliary_directory(&mut self, directory: &Path) -> String {
        self.push(Event::CreateAuxiliaryDirectory(directory.to_path_buf()))
    }

    fn write_auxiliary_file(&mut self, path: &Path) -> String {
        self.push(Event::WriteAuxiliaryFile(path.to_path_buf()))
    }

    fn set_auxiliary_executable(&mut self, path: &Path) -> String {
        self.push(Event::SetAuxiliaryExecutable(path.to_path_buf()))
    }

    fn begin_create_product_structure(&mut self, target: &Target) -> String {
        self.push(Event::BeginCreateProductStructure(target.name().to_string()))
    }

    fn finish_create_product_structure(&mut self, target: &Target) -> String {
        self.push(Event::FinishCreateProductStructure(
            target.name().to_string(),
        ))
    }

    fn begin_invocation(
        &mut self,
        _invocation: &Invocation,
        executable_display_name: &str,
        creates_product_structure: bool,
    ) -> String {
        self.push(Event::BeginInvocation(
            executable_display_name.to_string(),
            creates_product_structure,
        ))
    }

    fn finish_invocation(
        &mut self,
        _invocation: &Invocation,
        executable_display_name: &str,
        creates_product_structure: bool,
    ) -> String {
        self.push(Event::FinishInvocation(
            executable_display_name.to_string(),
            creates_product_structure,
        ))
    }
}

#[derive(Debug, Default)]
struct FakeRunnerState {
    executed: Vec<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

/// Process runner that records calls and scripts exit codes. Clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessRunner {
    state: Arc<Mutex<FakeRunnerState>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the tool at `path` exit with code 1.
    pub fn fail_for(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(path.as_ref().to_path_buf());
    }

    pub fn executed(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().executed.clone()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn execute(
        &self,
        path: &Path,
        _arguments: &[String],
        _environment: &BTreeMap<String, String>,
        _working_directory: &Path,
    ) -> Result<i32> {
        let mut state = self.state.lock().unwrap();
        state.executed.push(path.to_path_buf());
        if state.failing.contains(path) {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// Resolver with fixed invocation sets, keyed by target id.
#[derive(Default)]
pub struct StaticResolver {
    invocations: HashMap<String, Vec<Invocation>>,
    missing_environment: HashSet<String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: &Target, invocations: Vec<Invocation>) {
        self.invocations.insert(target.id().to_string(), invocations);
    }

    /// Make `target_environment` fail for this target.
    pub fn without_environment(&mut self, target: &Target) {
        self.missing_environment.insert(target.id().to_string());
    }
}

impl TargetResolver for StaticResolver {
    fn target_environment(
        &self,
        _build: &BuildEnvironment,
        target: &Target,
    ) -> Option<TargetEnvironment> {
        if self.missing_environment.contains(target.id()) {
            None
        } else {
            Some(TargetEnvironment::default())
        }
    }

    fn invocations(&self, target: &Target, _environment: &TargetEnvironment) -> Vec<Invocation> {
        self.invocations.get(target.id()).cloned().unwrap_or_default()
    }
}

pub fn target(id: &str) -> Target {
    Target::new(id, id)
}

pub fn build_context() -> BuildContext {
    BuildContext::new("build", "Debug")
}

pub fn phony_invocation() -> Invocation {
    Invocation::default()
}

pub fn external_invocation(tool: &str, label: &str) -> Invocation {
    Invocation {
        executable: Executable::External {
            path: PathBuf::from(tool),
            display_name: label.to_string(),
        },
        ..Invocation::default()
    }
}

/// Executor wired to the given shared-state fakes.
pub fn executor_with(
    formatter: &RecordingFormatter,
    fs: &impl ClonableFileSystem,
    runner: &FakeProcessRunner,
    dry_run: bool,
    builtins: BuiltinRegistry,
) -> SimpleExecutor {
    SimpleExecutor::with_collaborators(
        Box::new(formatter.clone()),
        dry_run,
        builtins,
        fs.boxed(),
        Box::new(runner.clone()),
    )
}

/// Helper so [`executor_with`] accepts both the mock and the real
/// filesystem.
pub trait ClonableFileSystem {
    fn boxed(&self) -> Box<dyn FileSystem>;
}

impl<F: FileSystem + Clone + 'static> ClonableFileSystem for F {
    fn boxed(&self) -> Box<dyn FileSystem> {
        Box::new(self.clone())
    }
}
