// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn user_error_carries_exit_code_one() {
    let err = ExitError::user("no session named \"api\" found on any node");
    assert_eq!(err.code, 1);
    assert_eq!(err.to_string(), "no session named \"api\" found on any node");
}

#[test]
fn protocol_error_carries_exit_code_two() {
    let err = ExitError::protocol("expected 8 pipe-separated fields, got 3");
    assert_eq!(err.code, 2);
}

#[test]
fn redundant_chain_is_collapsed_to_the_top_level_message() {
    let source = anyhow::anyhow!("inner cause");
    let err = source.context("inner cause");
    assert_eq!(format_error(&err), "inner cause");
}

#[test]
fn distinct_chain_is_rendered_in_full() {
    let source = anyhow::anyhow!("connect timeout");
    let err = source.context("could not resolve gpu-1");
    let formatted = format_error(&err);
    assert!(formatted.starts_with("could not resolve gpu-1"));
    assert!(formatted.contains("Caused by"));
    assert!(formatted.contains("connect timeout"));
}
