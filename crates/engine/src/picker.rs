// SPDX-License-Identifier: MIT

//! The interactive fuzzy-finder collaborator (§4.4, §6).
//!
//! The core assumes only: reads candidates line-per-line from stdin, writes
//! the selected line to stdout, exits 0 on selection and non-zero on
//! cancel. [`FzfPicker`] is the production implementation shelling out to
//! `fzf` on `PATH`; tests use [`crate::FakePicker`] instead.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// The outcome of asking the picker to disambiguate a match list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The user selected this candidate line.
    Selected(String),
    /// The picker exited non-zero: treat as cancellation, not an error.
    Cancelled,
}

/// The fuzzy-finder collaborator (§6): reads candidates from stdin one per
/// line, returns the selected line or a cancellation.
#[async_trait]
pub trait Picker: Send + Sync {
    async fn select(&self, candidates: &[String]) -> PickerOutcome;
}

/// Shells out to `fzf` on `PATH`.
pub struct FzfPicker {
    binary: String,
}

impl FzfPicker {
    pub fn new() -> Self {
        Self {
            binary: "fzf".to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    /// Checked by the CLI at init (§6): abort with a clear diagnostic if
    /// `fzf` isn't on `PATH` rather than failing lazily on first collision.
    pub fn is_available() -> bool {
        let Some(path) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path).any(|dir| dir.join("fzf").is_file())
    }
}

impl Default for FzfPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Picker for FzfPicker {
    async fn select(&self, candidates: &[String]) -> PickerOutcome {
        let mut child = match Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(_) => return PickerOutcome::Cancelled,
        };

        if let Some(mut stdin) = child.stdin.take() {
            let input = candidates.join("\n") + "\n";
            let _ = stdin.write_all(input.as_bytes()).await;
            drop(stdin);
        }

        let mut stdout = String::new();
        if let Some(mut out) = child.stdout.take() {
            let _ = out.read_to_string(&mut stdout).await;
        }

        match child.wait().await {
            Ok(status) if status.success() => {
                let selection = stdout.lines().next().unwrap_or("").trim().to_string();
                if selection.is_empty() {
                    PickerOutcome::Cancelled
                } else {
                    PickerOutcome::Selected(selection)
                }
            }
            _ => PickerOutcome::Cancelled,
        }
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
