// SPDX-License-Identifier: MIT

//! C2: run one command vector against many nodes, concurrently and
//! totally.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nexus_core::{NodeName, NodeResult};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::Transport;

/// Run `argv` against every node in `nodes`, bounded by `max_parallel`
/// concurrent dispatches.
///
/// Every requested node appears in the result map exactly once (invariant
/// 1, §8), even if it errored, timed out, or was cancelled. Ordering
/// across nodes is not guaranteed; there is only one dispatch per node.
///
/// If `cancel` fires mid-flight, already-completed results are kept as-is;
/// nodes whose dispatch never started, or was aborted in progress, are
/// reported as [`NodeResult::Unreachable`] with a cancellation reason.
pub async fn fan_out(
    transport: Arc<dyn Transport>,
    nodes: &[NodeName],
    argv: &[String],
    max_parallel: usize,
    timeout: Duration,
    cancel: CancellationToken,
) -> HashMap<NodeName, NodeResult> {
    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut handles = Vec::with_capacity(nodes.len());

    for node in nodes {
        let transport = Arc::clone(&transport);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();
        let node = node.clone();
        let argv = argv.to_vec();

        handles.push((
            node.clone(),
            tokio::spawn(async move {
                let _permit = tokio::select! {
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return cancelled_result(),
                    },
                    _ = cancel.cancelled() => return cancelled_result(),
                };

                tokio::select! {
                    result = transport.run_on_node(&node, &argv, timeout) => result,
                    _ = cancel.cancelled() => cancelled_result(),
                }
            }),
        ));
    }

    let mut results = HashMap::with_capacity(handles.len());
    for (node, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(_join_err) => cancelled_result(),
        };
        results.insert(node, result);
    }
    results
}

fn cancelled_result() -> NodeResult {
    NodeResult::Unreachable {
        reason: "cancelled".to_string(),
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
