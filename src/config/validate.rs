// src/config/validate.rs

use std::path::Path;

use crate::config::model::{InvocationConfig, Manifest};
use crate::errors::{BuildExecError, Result};

/// Run semantic validation against a loaded manifest.
///
/// This checks:
/// - all `after` dependencies refer to existing targets, and no target
///   depends on itself
/// - `tool` and `builtin` are not both set on one invocation
/// - every path in the manifest is absolute (`cwd`, `tool`, file sets,
///   auxiliary files)
///
/// It does **not** reject dependency cycles: cycle handling belongs to the
/// executor, whose reporting contract must stay observable through the CLI.
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    validate_dependencies(manifest)?;
    validate_invocations(manifest)?;
    Ok(())
}

fn validate_dependencies(manifest: &Manifest) -> Result<()> {
    for (key, target) in manifest.target.iter() {
        for dep in target.after.iter() {
            if !manifest.target.contains_key(dep) {
                return Err(BuildExecError::Config(format!(
                    "target '{}' has unknown dependency '{}' in `after`",
                    key, dep
                )));
            }
            if dep == key {
                return Err(BuildExecError::Config(format!(
                    "target '{}' cannot depend on itself in `after`",
                    key
                )));
            }
        }
    }
    Ok(())
}

fn validate_invocations(manifest: &Manifest) -> Result<()> {
    for (key, target) in manifest.target.iter() {
        for (index, invocation) in target.invocation.iter().enumerate() {
            validate_invocation(key, index, invocation)?;
        }
    }
    Ok(())
}

fn validate_invocation(key: &str, index: usize, invocation: &InvocationConfig) -> Result<()> {
    if invocation.tool.is_some() && invocation.builtin.is_some() {
        return Err(BuildExecError::Config(format!(
            "invocation {} of target '{}' sets both `tool` and `builtin`",
            index, key
        )));
    }

    let require_absolute = |label: &str, path: &Path| -> Result<()> {
        if path.is_absolute() {
            Ok(())
        } else {
            Err(BuildExecError::Config(format!(
                "invocation {} of target '{}': {} path {:?} is not absolute",
                index, key, label, path
            )))
        }
    };

    if let Some(tool) = &invocation.tool {
        require_absolute("tool", tool)?;
    }
    require_absolute("cwd", &invocation.cwd)?;
    for path in &invocation.inputs {
        require_absolute("input", path)?;
    }
    for path in &invocation.outputs {
        require_absolute("output", path)?;
    }
    for path in &invocation.phony_inputs {
        require_absolute("phony input", path)?;
    }
    for path in &invocation.input_deps {
        require_absolute("input dependency", path)?;
    }
    for auxiliary_file in &invocation.auxiliary_file {
        require_absolute("auxiliary file", &auxiliary_file.path)?;
    }

    Ok(())
}
