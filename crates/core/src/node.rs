// SPDX-License-Identifier: MIT

//! The [`NodeName`] newtype — a logical machine in the fleet.
//!
//! Wraps a `String` so the reserved name `local` is checked in one place
//! instead of being string-compared ad hoc at every call site.

use serde::{Deserialize, Serialize};

/// The reserved node name denoting the machine `nx` is running on.
pub const LOCAL: &str = "local";

/// A named machine in the fleet.
///
/// `local` is reserved and always refers to the executing machine; every
/// other name is an opaque handle the transport layer knows how to dial.
/// Nodes are never created or destroyed at runtime — the set is supplied
/// entirely by the configuration collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Construct a `NodeName` from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The reserved `local` node.
    pub fn local() -> Self {
        Self(LOCAL.to_string())
    }

    /// True iff this is the reserved `local` node (no remote transport).
    pub fn is_local(&self) -> bool {
        self.0 == LOCAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
