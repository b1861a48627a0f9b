// src/config/resolver.rs

use crate::config::model::{InvocationConfig, Manifest};
use crate::dag::graph::DirectedGraph;
use crate::invocation::{AuxiliaryFile, Executable, Invocation};
use crate::types::{BuildContext, BuildEnvironment, Target, TargetEnvironment, TargetResolver};

/// [`TargetResolver`] backed by a loaded manifest.
///
/// Targets are handed to the graph in manifest key order, so the same
/// manifest always produces the same build order.
pub struct ManifestResolver {
    manifest: Manifest,
}

impl ManifestResolver {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn build_context(&self) -> BuildContext {
        BuildContext::new(
            self.manifest.build.action.clone(),
            self.manifest.build.configuration.clone(),
        )
    }

    pub fn build_environment(&self) -> BuildEnvironment {
        BuildEnvironment {
            settings: self.manifest.settings.clone(),
        }
    }

    /// The target dependency graph described by the manifest's `after` edges.
    pub fn target_graph(&self) -> DirectedGraph<Target> {
        let mut graph = DirectedGraph::new();
        for (key, config) in self.manifest.target.iter() {
            let predecessors: Vec<Target> = config
                .after
                .iter()
                .map(|dep| self.target_for_key(dep))
                .collect();
            graph.insert(self.target_for_key(key), predecessors);
        }
        graph
    }

    fn target_for_key(&self, key: &str) -> Target {
        let name = self
            .manifest
            .target
            .get(key)
            .and_then(|config| config.name.as_deref())
            .unwrap_or(key);
        Target::new(key, name)
    }
}

impl TargetResolver for ManifestResolver {
    fn target_environment(
        &self,
        build: &BuildEnvironment,
        target: &Target,
    ) -> Option<TargetEnvironment> {
        let config = self.manifest.target.get(target.id())?;

        let mut settings = build.settings.clone();
        settings.extend(config.settings.clone());
        Some(TargetEnvironment { settings })
    }

    fn invocations(&self, target: &Target, _environment: &TargetEnvironment) -> Vec<Invocation> {
        match self.manifest.target.get(target.id()) {
            Some(config) => config.invocation.iter().map(invocation_from_config).collect(),
            None => Vec::new(),
        }
    }
}

fn invocation_from_config(config: &InvocationConfig) -> Invocation {
    let executable = match (&config.tool, &config.builtin) {
        (Some(path), _) => Executable::External {
            path: path.clone(),
            display_name: config
                .label
                .clone()
                .unwrap_or_else(|| path.display().to_string()),
        },
        (None, Some(name)) => Executable::Builtin { name: name.clone() },
        (None, None) => Executable::Phony,
    };

    Invocation {
        executable,
        arguments: config.args.clone(),
        environment: config.env.clone(),
        working_directory: config.cwd.clone(),
        inputs: config.inputs.clone(),
        outputs: config.outputs.clone(),
        phony_inputs: config.phony_inputs.clone(),
        input_dependencies: config.input_deps.clone(),
        auxiliary_files: config
            .auxiliary_file
            .iter()
            .map(|file| AuxiliaryFile::new(&file.path, file.contents.as_bytes(), file.executable))
            .collect(),
        creates_product_structure: config.product_structure,
    }
}
