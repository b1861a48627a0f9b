// src/config/mod.rs

//! Build manifest loading and validation.
//!
//! The manifest is the CLI driver's stand-in for a full project parser: a
//! TOML file naming targets, their dependency edges, and the invocations
//! each target runs.
//!
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest file from disk (`loader.rs`).
//! - Validate references and path shape (`validate.rs`).
//! - Resolve targets and invocations for the executor (`resolver.rs`).

pub mod loader;
pub mod model;
pub mod resolver;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{AuxiliaryFileConfig, BuildSection, InvocationConfig, Manifest, TargetConfig};
pub use resolver::ManifestResolver;
pub use validate::validate_manifest;
