// SPDX-License-Identifier: MIT

//! [`FakePicker`]: a scripted [`Picker`] double for resolver tests — no
//! real terminal or `fzf` binary required.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::picker::{Picker, PickerOutcome};

/// Returns a pre-programmed selection or cancellation, recording the
/// candidate list it was shown.
pub struct FakePicker {
    outcome: PickerOutcome,
    shown: Mutex<Option<Vec<String>>>,
}

impl FakePicker {
    pub fn selecting(line: impl Into<String>) -> Self {
        Self {
            outcome: PickerOutcome::Selected(line.into()),
            shown: Mutex::new(None),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcome: PickerOutcome::Cancelled,
            shown: Mutex::new(None),
        }
    }

    /// The candidate list this picker was shown, if any.
    pub fn shown_candidates(&self) -> Option<Vec<String>> {
        self.shown.lock().clone()
    }
}

#[async_trait]
impl Picker for FakePicker {
    async fn select(&self, candidates: &[String]) -> PickerOutcome {
        *self.shown.lock() = Some(candidates.to_vec());
        self.outcome.clone()
    }
}
