// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nexus-engine: C4 (Resolver), C5 (Attach state machine), C6 (Dashboard
//! composer).
//!
//! This crate decides *which* tmux command to run next; `nexus-transport`
//! runs it. Only the resolver and the attach/dashboard entry points raise —
//! everything below them (transport, fan-out) stays total.

mod attach;
mod dashboard;
mod error;
mod picker;
mod resolver;

pub use attach::{attach, detect_scenario, AttachOutcome, Scenario};
pub use dashboard::{dash, DashOutcome, DASHBOARD_PANE_CAP};
pub use error::{AttachError, DashError, ResolveError};
pub use picker::{FzfPicker, Picker};
pub use resolver::resolve;

#[cfg(any(test, feature = "test-support"))]
mod fake_picker;
#[cfg(any(test, feature = "test-support"))]
pub use fake_picker::FakePicker;
