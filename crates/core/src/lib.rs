// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nexus-core: data model and session-record contract for the Nexus fleet
//! orchestrator.
//!
//! This crate is pure — no subprocess execution, no filesystem access. It
//! defines the node/session/qualified-name types (§3 of the spec), the
//! pinned tmux record format and its parser, and the command-builder
//! surface (§4.3). Everything that actually runs a command lives in
//! `nexus-transport`; everything that decides *which* command to run next
//! lives in `nexus-engine`.

mod command;
mod config;
mod node;
mod qualified;
mod record;

pub use command::CommandBuilder;
pub use config::{FleetConfig, NodeSpec};
pub use node::NodeName;
pub use qualified::{ParsedName, QualifiedName};
pub use record::{parse_list_output, FormatParseError, NodeResult, SessionRecord};
pub use command::LIST_FORMAT;
