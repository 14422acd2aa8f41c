// SPDX-License-Identifier: MIT

//! The CLI's exit-code boundary.
//!
//! Command handlers return `anyhow::Result`; a handler that needs to pick a
//! specific exit code downcasts nothing itself — it just returns
//! `Err(ExitError::new(code, cause).into())`, and `main` downcasts once at
//! the top.

use std::fmt;

/// An error carrying the process exit code it should produce.
///
/// `1` for user errors (not-found, ambiguous, missing dependency,
/// unreachable required node); `2` for protocol/internal errors (format
/// parse failure, unexpected exit).
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level `Display` already contains every source error's text,
/// the "Caused by" chain is skipped to avoid noisy duplicate output (common
/// when a `thiserror` variant uses `#[error("... {0}")]` with `#[from]`).
/// Otherwise the full chain is rendered so context isn't lost.
pub fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {i}: {cause}"));
    }
    buf
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
