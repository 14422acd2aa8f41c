// SPDX-License-Identifier: MIT

//! `nx dash` — compose and attach to the dashboard (§6, §4.6).

use std::sync::Arc;

use anyhow::Result;
use nexus_core::FleetConfig;
use nexus_engine::{dash, DashOutcome};
use nexus_transport::Transport;

use crate::error::ExitError;

pub async fn handle(config: &FleetConfig, transport: Arc<dyn Transport>) -> Result<()> {
    match dash(config, transport).await {
        Ok(DashOutcome::Empty) => {
            println!("No active sessions");
            Ok(())
        }
        Err(err) => Err(ExitError::protocol(err.to_string()).into()),
    }
}
