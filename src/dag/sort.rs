// src/dag/sort.rs

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::warn;

use crate::dag::graph::{CycleDetected, DirectedGraph};
use crate::invocation::Invocation;

/// Order one target's invocations by data dependency.
///
/// An invocation depends on another when any of its inputs, phony inputs, or
/// input dependencies matches the other's declared outputs. Paths produced by
/// no invocation refer to source files or pre-existing state and are ignored.
///
/// Invocation identity is positional: nodes are indices into the input slice,
/// so two identical records still order independently. Isolated invocations
/// stay in input order.
pub fn sort_invocations(
    invocations: &[Invocation],
) -> Result<Vec<&Invocation>, CycleDetected> {
    let mut producer_by_output: HashMap<&PathBuf, usize> = HashMap::new();
    for (index, invocation) in invocations.iter().enumerate() {
        for output in &invocation.outputs {
            if let Some(previous) = producer_by_output.insert(output, index) {
                if previous != index {
                    warn!(
                        output = %output.display(),
                        "output claimed by more than one invocation; keeping the later producer"
                    );
                }
            }
        }
    }

    let mut graph = DirectedGraph::new();
    for (index, invocation) in invocations.iter().enumerate() {
        graph.insert(index, []);

        for path in invocation.dependency_paths() {
            if let Some(&producer) = producer_by_output.get(path) {
                graph.insert(index, [producer]);
            }
        }
    }

    let order = graph.ordered()?;
    Ok(order.into_iter().map(|index| &invocations[index]).collect())
}
