// src/invocation.rs

//! The unit of work the executor runs: one tool invocation with declared
//! input and output file sets.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// How an invocation's work is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// Tool implemented inside the executor process, dispatched through the
    /// builtin registry.
    Builtin { name: String },
    /// External tool spawned as a subprocess.
    External {
        path: PathBuf,
        display_name: String,
    },
    /// Performs no work; participates in dependency ordering only.
    Phony,
}

impl Executable {
    /// Label shown in build logs for this executable.
    pub fn display_name(&self) -> &str {
        match self {
            Executable::Builtin { name } => name,
            Executable::External { display_name, .. } => display_name,
            Executable::Phony => "",
        }
    }

    pub fn is_phony(&self) -> bool {
        matches!(self, Executable::Phony)
    }
}

/// A file the executor materialises on disk before the invocation that reads
/// it runs (response files, link file lists). Contents are written byte-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub executable: bool,
}

impl AuxiliaryFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>, executable: bool) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            executable,
        }
    }
}

/// Immutable description of a single unit of work.
///
/// All paths are absolute. `inputs`, `phony_inputs`, and `input_dependencies`
/// wire the intra-target dependency graph: any of them matching another
/// invocation's output makes that invocation a predecessor. The latter two
/// are never treated as real files, only as ordering edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: Executable,
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub working_directory: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub phony_inputs: Vec<PathBuf>,
    pub input_dependencies: Vec<PathBuf>,
    pub auxiliary_files: Vec<AuxiliaryFile>,
    /// True places this invocation in the product-structure pass (layout
    /// preparation); false places it in the content pass.
    pub creates_product_structure: bool,
}

impl Invocation {
    /// Every path that may induce a dependency edge on another invocation.
    pub(crate) fn dependency_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.inputs
            .iter()
            .chain(self.phony_inputs.iter())
            .chain(self.input_dependencies.iter())
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            executable: Executable::Phony,
            arguments: Vec::new(),
            environment: BTreeMap::new(),
            working_directory: PathBuf::from("/"),
            inputs: Vec::new(),
            outputs: Vec::new(),
            phony_inputs: Vec::new(),
            input_dependencies: Vec::new(),
            auxiliary_files: Vec::new(),
            creates_product_structure: false,
        }
    }
}
