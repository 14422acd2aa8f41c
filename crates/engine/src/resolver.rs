// SPDX-License-Identifier: MIT

//! C4: map a bare or qualified name to `(node, session)` (§4.4).

use std::sync::Arc;
use std::time::Duration;

use nexus_core::{parse_list_output, FleetConfig, NodeName, ParsedName, QualifiedName};
use nexus_transport::{fan_out, Transport};
use tokio_util::sync::CancellationToken;

use crate::error::ResolveError;
use crate::picker::{Picker, PickerOutcome};

/// Connect timeout used for the fan-out `list` dispatched during
/// resolution (§4.1 default).
const LIST_TIMEOUT: Duration = Duration::from_secs(2);

/// Resolve `name` to a qualified `(node, session)` pair.
///
/// Step 1 (§4.4): a name containing `/` is already qualified and returned
/// without fan-out, with no validation that the node exists (delegated to
/// the caller, per the algorithm). Otherwise, fan out `list` to every
/// configured node and branch on the match count.
pub async fn resolve(
    name: &str,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
    picker: &dyn Picker,
    interactive: bool,
) -> Result<QualifiedName, ResolveError> {
    match QualifiedName::parse_loose(name) {
        ParsedName::Qualified(qualified) => Ok(qualified),
        ParsedName::Unqualified(session_name) => {
            resolve_unqualified(&session_name, config, transport, picker, interactive).await
        }
    }
}

async fn resolve_unqualified(
    session_name: &str,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
    picker: &dyn Picker,
    interactive: bool,
) -> Result<QualifiedName, ResolveError> {
    let builder = nexus_core::CommandBuilder::fleet();
    let argv = builder.list();
    let node_names = config.node_names();

    let results = fan_out(
        transport,
        &node_names,
        &argv,
        config.max_concurrent_ssh,
        LIST_TIMEOUT,
        CancellationToken::new(),
    )
    .await;

    let mut matches: Vec<QualifiedName> = Vec::new();
    for node in &node_names {
        let Some(result) = results.get(node) else {
            continue;
        };
        if !result.is_ok() {
            // Unreachable nodes are a soft warning (§4.4 step 3): a
            // session cannot exist on a node that didn't answer.
            tracing::warn!(%node, "node unreachable during resolution");
            continue;
        }
        let Ok(records) = parse_list_output(result.stdout()) else {
            tracing::warn!(%node, "malformed list output during resolution");
            continue;
        };
        for record in records {
            if record.name == session_name {
                matches.push(QualifiedName::new(node.clone(), record.name));
            }
        }
    }

    // Deterministic ordering (§5): node name, then session name.
    matches.sort_by(|a, b| (a.node.as_str(), a.session.as_str()).cmp(&(b.node.as_str(), b.session.as_str())));

    match matches.as_slice() {
        [] => Err(ResolveError::NotFound {
            name: session_name.to_string(),
        }),
        [one] => Ok(one.clone()),
        _ => disambiguate(matches, &config.default_node, picker, interactive).await,
    }
}

async fn disambiguate(
    mut matches: Vec<QualifiedName>,
    default_node: &NodeName,
    picker: &dyn Picker,
    interactive: bool,
) -> Result<QualifiedName, ResolveError> {
    if !interactive {
        return Err(ResolveError::Ambiguous { matches });
    }

    // Default-node-first policy (§4.4): a stable ordering with the
    // default node's match presented first.
    if let Some(pos) = matches.iter().position(|q| &q.node == default_node) {
        let preferred = matches.remove(pos);
        matches.insert(0, preferred);
    }

    let candidates: Vec<String> = matches.iter().map(|q| q.to_string()).collect();
    match picker.select(&candidates).await {
        PickerOutcome::Cancelled => Err(ResolveError::SelectionCancelled),
        PickerOutcome::Selected(line) => match QualifiedName::parse_loose(&line) {
            ParsedName::Qualified(q) => Ok(q),
            ParsedName::Unqualified(_) => Err(ResolveError::SelectionCancelled),
        },
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
