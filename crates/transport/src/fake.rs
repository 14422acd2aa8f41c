// SPDX-License-Identifier: MIT

//! [`FakeTransport`]: a recorded-call test double for [`Transport`].
//!
//! Tests program a fixed `NodeResult` per node (or a default for unlisted
//! nodes) and assert against the calls it recorded, instead of spawning
//! real subprocesses.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use nexus_core::{NodeName, NodeResult};
use parking_lot::Mutex;

use crate::Transport;

/// One recorded invocation of [`Transport::run_on_node`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportCall {
    pub node: NodeName,
    pub argv: Vec<String>,
    pub timeout: Duration,
}

/// A [`Transport`] double that returns pre-programmed results and records
/// every call it received.
pub struct FakeTransport {
    responses: HashMap<NodeName, NodeResult>,
    default: NodeResult,
    calls: Mutex<Vec<TransportCall>>,
}

impl FakeTransport {
    /// A transport whose unlisted nodes succeed with empty output.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default: NodeResult::Ok {
                stdout: String::new(),
                stderr: String::new(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Program the result returned for `node`.
    pub fn with_response(mut self, node: impl Into<NodeName>, result: NodeResult) -> Self {
        self.responses.insert(node.into(), result);
        self
    }

    /// Override the result returned for any node without a programmed
    /// response (default: `Ok` with empty output).
    pub fn with_default(mut self, result: NodeResult) -> Self {
        self.default = result;
        self
    }

    /// All calls received so far, in completion order.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn run_on_node(&self, node: &NodeName, argv: &[String], timeout: Duration) -> NodeResult {
        self.calls.lock().push(TransportCall {
            node: node.clone(),
            argv: argv.to_vec(),
            timeout,
        });
        self.responses.get(node).cloned().unwrap_or_else(|| self.default.clone())
    }
}
