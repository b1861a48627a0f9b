// src/types.rs

//! Build-level data model: targets, environments, and the resolver seam
//! through which target configuration enters the executor.

use std::collections::BTreeMap;

use crate::invocation::Invocation;

/// Stable handle for a buildable unit (library, executable, bundle).
///
/// The executor treats this as pure node identity; everything a target
/// *means* comes from the [`TargetEnvironment`] its resolver produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    id: String,
    name: String,
}

impl Target {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable identifier, unique within a build.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name, as shown in build logs.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Build-wide settings shared by every target.
#[derive(Debug, Clone, Default)]
pub struct BuildEnvironment {
    pub settings: BTreeMap<String, String>,
}

/// What is being built, as presented to the formatter.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub action: String,
    pub configuration: String,
}

impl BuildContext {
    pub fn new(action: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            configuration: configuration.into(),
        }
    }
}

/// Per-target resolved settings.
#[derive(Debug, Clone, Default)]
pub struct TargetEnvironment {
    pub settings: BTreeMap<String, String>,
}

/// External collaborator that configures targets and derives their work.
///
/// The executor never inspects project files itself; it asks the resolver
/// for a target's environment and, if one exists, for the invocations to
/// run. `target_environment` returning `None` is a per-target configuration
/// failure: the executor reports it and moves on to the next target.
pub trait TargetResolver {
    fn target_environment(
        &self,
        build: &BuildEnvironment,
        target: &Target,
    ) -> Option<TargetEnvironment>;

    fn invocations(&self, target: &Target, environment: &TargetEnvironment) -> Vec<Invocation>;
}
