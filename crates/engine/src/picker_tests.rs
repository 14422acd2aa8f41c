use super::*;

#[tokio::test]
async fn missing_binary_is_cancelled_not_a_panic() {
    let picker = FzfPicker::with_binary("/nonexistent/fzf-binary");
    let outcome = picker
        .select(&["local/api".to_string(), "dev/api".to_string()])
        .await;
    assert_eq!(outcome, PickerOutcome::Cancelled);
}

#[tokio::test]
async fn non_interactive_filter_mode_selects_via_query() {
    // `cat` behaves like a picker that echoes its stdin verbatim; close
    // enough to exercise the read/write plumbing without a real fzf.
    let picker = FzfPicker::with_binary("cat");
    let outcome = picker
        .select(&["local/api".to_string(), "dev/api".to_string()])
        .await;
    assert_eq!(outcome, PickerOutcome::Selected("local/api".to_string()));
}

#[test]
fn is_available_false_when_path_has_no_fzf() {
    let saved = std::env::var_os("PATH");
    std::env::set_var("PATH", "/nonexistent/bin");
    assert!(!FzfPicker::is_available());
    if let Some(path) = saved {
        std::env::set_var("PATH", path);
    }
}
