// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nexus-transport: C1 (Transport) and C2 (Fan-out).
//!
//! Transport never raises: every outcome, including connect timeouts and
//! spawn failures, is captured as a [`nexus_core::NodeResult`] variant so
//! fan-out stays total (§7 propagation policy).

mod fanout;
pub mod subprocess;
mod transport;

pub use fanout::fan_out;
pub use transport::{ProcessTransport, Transport};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, TransportCall};
