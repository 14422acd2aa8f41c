use super::*;

fn canonical_line(r: &SessionRecord) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        r.name,
        r.windows,
        r.attached,
        r.working_directory,
        r.command,
        r.pid,
        if r.is_dead { 1 } else { 0 },
        r.exit_status.map(|c| c.to_string()).unwrap_or_default(),
    )
}

#[test]
fn empty_input_yields_empty_list() {
    assert_eq!(parse_list_output(""), Ok(Vec::new()));
}

#[test]
fn parses_running_record() {
    let records = parse_list_output("api|1|0|/home/u|python|1234|0|\n").unwrap();
    assert_eq!(
        records,
        vec![SessionRecord {
            name: "api".into(),
            windows: 1,
            attached: 0,
            working_directory: "/home/u".into(),
            command: "python".into(),
            pid: 1234,
            is_dead: false,
            exit_status: None,
        }]
    );
}

#[test]
fn parses_dead_record_with_exit_status() {
    let records = parse_list_output("api|1|1|/app|node|77|1|2\n").unwrap();
    assert_eq!(records[0].is_dead, true);
    assert_eq!(records[0].exit_status, Some(2));
}

#[test]
fn wrong_field_count_is_fatal() {
    let err = parse_list_output("api|1|0|/home/u|python|1234|0\n").unwrap_err();
    assert!(matches!(err, FormatParseError::WrongFieldCount { got: 7, .. }));
}

#[test]
fn non_numeric_field_is_fatal() {
    let err = parse_list_output("api|x|0|/home/u|python|1234|0|\n").unwrap_err();
    assert!(matches!(err, FormatParseError::NotNumeric { field: "windows", .. }));
}

#[test]
fn dead_without_exit_status_is_fatal() {
    let err = parse_list_output("api|1|1|/app|node|77|1|\n").unwrap_err();
    assert!(matches!(err, FormatParseError::DeadWithoutExitStatus { .. }));
}

#[test]
fn trailing_empty_lines_are_dropped_not_an_error() {
    let records = parse_list_output("api|1|0|/home/u|python|1234|0|\n\n").unwrap();
    assert_eq!(records.len(), 1);
}

/// Property: parser totality. Well-formed input with N lines yields exactly
/// N records.
#[test]
fn parser_totality() {
    let input = "a|1|0|/x|python|1|0|\nb|2|1|/y|node|2|0|\nc|1|0|/z|bash|3|1|7\n";
    let records = parse_list_output(input).unwrap();
    assert_eq!(records.len(), 3);
}

/// Property: round-trip list -> parse. Concatenating the canonical format
/// for a set of records and parsing it back yields the same set, in order.
#[test]
fn round_trip_list_then_parse() {
    let records = vec![
        SessionRecord {
            name: "api".into(),
            windows: 2,
            attached: 1,
            working_directory: "/srv/api".into(),
            command: "node".into(),
            pid: 42,
            is_dead: false,
            exit_status: None,
        },
        SessionRecord {
            name: "worker".into(),
            windows: 1,
            attached: 0,
            working_directory: "/srv/worker".into(),
            command: "python".into(),
            pid: 99,
            is_dead: true,
            exit_status: Some(1),
        },
    ];
    let raw: String = records
        .iter()
        .map(|r| format!("{}\n", canonical_line(r)))
        .collect();
    assert_eq!(parse_list_output(&raw).unwrap(), records);
}

#[test]
fn node_result_is_ok_discriminates_variants() {
    let ok = NodeResult::Ok {
        stdout: String::new(),
        stderr: String::new(),
    };
    let failed = NodeResult::CommandFailed {
        stdout: String::new(),
        stderr: String::new(),
        exit_code: 1,
    };
    let unreachable = NodeResult::Unreachable {
        reason: "timeout".into(),
    };
    assert!(ok.is_ok());
    assert!(!failed.is_ok());
    assert!(!unreachable.is_ok());
}
