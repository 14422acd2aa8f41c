use super::*;

#[test]
fn local_is_local() {
    assert!(NodeName::local().is_local());
    assert!(NodeName::new("local").is_local());
}

#[test]
fn non_local_is_not_local() {
    assert!(!NodeName::new("gpu-1").is_local());
}

#[test]
fn display_round_trips_through_string() {
    let n = NodeName::new("dev");
    assert_eq!(n.to_string(), "dev");
    assert_eq!(NodeName::from("dev".to_string()), n);
}

#[test]
fn eq_against_str() {
    let n = NodeName::new("dev");
    assert_eq!(n, *"dev");
    assert_eq!(n, "dev");
}
