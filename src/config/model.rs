// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level build manifest as read from a TOML file.
///
/// ```toml
/// [build]
/// action = "build"
/// configuration = "Debug"
///
/// [settings]
/// SRCROOT = "/src/app"
///
/// [target.lib]
/// name = "CoreLib"
///
/// [target.app]
/// name = "App"
/// after = ["lib"]
///
/// [[target.app.invocation]]
/// tool = "/usr/bin/cc"
/// label = "CompileC main.o"
/// args = ["-c", "/src/app/main.c", "-o", "/out/main.o"]
/// cwd = "/src/app"
/// inputs = ["/src/app/main.c"]
/// outputs = ["/out/main.o"]
/// ```
///
/// All sections are optional except each invocation's `cwd`; an empty
/// `[target]` table is a valid (empty) build.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    /// What is being built, from `[build]`.
    #[serde(default)]
    pub build: BuildSection,

    /// Build-wide settings from `[settings]`, shared by every target.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    /// All targets from `[target.<key>]`. Keys are the stable target
    /// handles; `after` references use them.
    #[serde(default)]
    pub target: BTreeMap<String, TargetConfig>,
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_action")]
    pub action: String,

    #[serde(default = "default_configuration")]
    pub configuration: String,
}

fn default_action() -> String {
    "build".to_string()
}

fn default_configuration() -> String {
    "Debug".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            action: default_action(),
            configuration: default_configuration(),
        }
    }
}

/// `[target.<key>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Human-readable target name; defaults to the table key.
    #[serde(default)]
    pub name: Option<String>,

    /// Targets that must build before this one, by table key.
    #[serde(default)]
    pub after: Vec<String>,

    /// Per-target settings, merged over the global `[settings]`.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    /// The target's invocations, from `[[target.<key>.invocation]]`.
    #[serde(default)]
    pub invocation: Vec<InvocationConfig>,
}

/// `[[target.<key>.invocation]]` entry.
///
/// Exactly one of `tool` and `builtin` selects how the invocation runs;
/// with neither, the invocation is phony and only orders its neighbours.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InvocationConfig {
    /// Absolute path of the external tool to spawn.
    #[serde(default)]
    pub tool: Option<PathBuf>,

    /// Name of an in-process builtin tool.
    #[serde(default)]
    pub builtin: Option<String>,

    /// Display label shown in build logs; defaults to the tool path or
    /// builtin name.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory for the tool (absolute).
    pub cwd: PathBuf,

    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    #[serde(default)]
    pub outputs: Vec<PathBuf>,

    /// Ordering-only inputs: match other invocations' outputs but are never
    /// treated as real files.
    #[serde(default)]
    pub phony_inputs: Vec<PathBuf>,

    /// Additional ordering-only dependencies.
    #[serde(default)]
    pub input_deps: Vec<PathBuf>,

    /// True runs this invocation in the product-structure pass.
    #[serde(default)]
    pub product_structure: bool,

    /// Files to materialise before this target's invocations run.
    #[serde(default)]
    pub auxiliary_file: Vec<AuxiliaryFileConfig>,
}

/// `[[target.<key>.invocation.auxiliary-file]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AuxiliaryFileConfig {
    pub path: PathBuf,

    #[serde(default)]
    pub contents: String,

    #[serde(default)]
    pub executable: bool,
}
