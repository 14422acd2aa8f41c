// SPDX-License-Identifier: MIT

//! The pinned tmux session-record format (§4.3) and the fan-out result type
//! (§3).

use thiserror::Error;

/// One row of live state on a node, as emitted by `tmux list-sessions`
/// against the pinned format string and parsed by [`parse_list_output`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub name: String,
    pub windows: u32,
    pub attached: u32,
    pub working_directory: String,
    pub command: String,
    pub pid: u32,
    pub is_dead: bool,
    pub exit_status: Option<i32>,
}

/// A contract violation by the multiplexer: fatal, never silently skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatParseError {
    #[error("expected 8 pipe-separated fields, got {got}: {line:?}")]
    WrongFieldCount { got: usize, line: String },
    #[error("non-numeric field {field:?} in line {line:?}: {value:?}")]
    NotNumeric {
        field: &'static str,
        value: String,
        line: String,
    },
    #[error("is_dead=1 but exit_status is empty (tmux guarantees a value): {line:?}")]
    DeadWithoutExitStatus { line: String },
}

const FIELD_COUNT: usize = 8;

/// Parse the raw output of the pinned `list` command into session records.
///
/// Empty input yields an empty list. Trailing empty lines (from the final
/// newline) are dropped. Any line with a field count other than 8, or a
/// non-numeric numeric field, is a hard format error — never silently
/// skipped, per the session-record contract invariants.
pub fn parse_list_output(raw: &str) -> Result<Vec<SessionRecord>, FormatParseError> {
    raw.lines()
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Result<SessionRecord, FormatParseError> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() != FIELD_COUNT {
        return Err(FormatParseError::WrongFieldCount {
            got: fields.len(),
            line: line.to_string(),
        });
    }

    let name = fields[0];
    let working_directory = fields[3];
    let command = fields[4];

    let windows = parse_numeric(fields[1], "windows", line)?;
    let attached = parse_numeric(fields[2], "attached", line)?;
    let pid = parse_numeric(fields[5], "pid", line)?;
    let is_dead = match fields[6] {
        "0" => false,
        "1" => true,
        other => {
            return Err(FormatParseError::NotNumeric {
                field: "is_dead",
                value: other.to_string(),
                line: line.to_string(),
            })
        }
    };

    let exit_status = match (is_dead, fields[7]) {
        (false, _) => None,
        (true, "") => {
            return Err(FormatParseError::DeadWithoutExitStatus {
                line: line.to_string(),
            })
        }
        (true, value) => Some(value.parse::<i32>().map_err(|_| FormatParseError::NotNumeric {
            field: "exit_status",
            value: value.to_string(),
            line: line.to_string(),
        })?),
    };

    Ok(SessionRecord {
        name: name.to_string(),
        windows,
        attached,
        working_directory: working_directory.to_string(),
        command: command.to_string(),
        pid,
        is_dead,
        exit_status,
    })
}

fn parse_numeric(value: &str, field: &'static str, line: &str) -> Result<u32, FormatParseError> {
    value.parse::<u32>().map_err(|_| FormatParseError::NotNumeric {
        field,
        value: value.to_string(),
        line: line.to_string(),
    })
}

/// The outcome of running a command vector against one node (§3 Fan-out
/// result). All three variants are first-class; transport never raises.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeResult {
    /// Command ran and exited zero.
    Ok { stdout: String, stderr: String },
    /// Command ran and exited non-zero.
    CommandFailed {
        stdout: String,
        stderr: String,
        exit_code: i32,
    },
    /// The node could not be reached at all (connect timeout, dial error,
    /// remote-shell spawn failure, or cooperative cancellation).
    Unreachable { reason: String },
}

impl NodeResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, NodeResult::Ok { .. })
    }

    pub fn stdout(&self) -> &str {
        match self {
            NodeResult::Ok { stdout, .. } | NodeResult::CommandFailed { stdout, .. } => stdout,
            NodeResult::Unreachable { .. } => "",
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
