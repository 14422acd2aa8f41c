use nexus_core::NodeSpec;

use super::*;

fn config() -> FleetConfig {
    FleetConfig {
        nodes: vec![
            NodeSpec {
                name: NodeName::local(),
                alias: None,
            },
            NodeSpec {
                name: NodeName::new("gpu"),
                alias: Some("gpu.internal".to_string()),
            },
        ],
        default_node: NodeName::local(),
        default_cmd: "/bin/sh".to_string(),
        max_concurrent_ssh: 16,
        auto_reap_clean_exit: false,
    }
}

fn q(node: &str, session: &str) -> QualifiedName {
    QualifiedName::new(node, session)
}

#[test]
fn build_plan_sorts_deterministically_by_node_then_session() {
    let live = vec![q("gpu", "b"), q("local", "z"), q("local", "a")];
    let plan = build_plan(live);
    assert_eq!(plan.panes, vec![q("local", "a"), q("local", "z"), q("gpu", "b")]);
    assert!(plan.elided.is_empty());
}

#[test]
fn build_plan_caps_at_dashboard_pane_cap_and_reports_elided() {
    let live: Vec<QualifiedName> = (0..20).map(|i| q("local", &format!("s{i:02}"))).collect();
    let plan = build_plan(live);
    assert_eq!(plan.panes.len(), DASHBOARD_PANE_CAP);
    assert_eq!(plan.elided.len(), 4);
}

#[test]
fn pane_command_local_target_is_a_direct_read_only_attach() {
    let cmd = pane_command(&q("local", "api"), &config());
    assert_eq!(cmd, "tmux -L nexus attach-session -r -t api");
}

#[test]
fn pane_command_remote_target_is_ssh_wrapped() {
    let cmd = pane_command(&q("gpu", "api"), &config());
    assert_eq!(cmd, "ssh -t gpu.internal 'tmux -L nexus attach-session -r -t api'");
}

/// §8 invariant 7 — tear-down must precede re-entry in the Enter shim.
#[test]
fn enter_shim_tears_down_before_re_entering() {
    let script = enter_shim_script();
    let kill_pos = script.find("kill-session").expect("script mentions kill-session");
    let exec_pos = script.find("exec \"$NX_BIN\"").expect("script mentions the re-entry exec");
    assert!(
        kill_pos < exec_pos,
        "tear-down must precede re-entry: {script}"
    );
}

#[test]
fn enter_shim_captures_target_and_nx_bin_before_tearing_down() {
    let script = enter_shim_script();
    let target_pos = script.find("TARGET=").unwrap();
    let nx_bin_pos = script.find("NX_BIN=").unwrap();
    let kill_pos = script.find("kill-session").unwrap();
    assert!(target_pos < kill_pos);
    assert!(nx_bin_pos < kill_pos);
}

#[tokio::test]
async fn empty_fleet_is_not_an_error() {
    use std::sync::Arc;
    let transport = Arc::new(nexus_transport::FakeTransport::new().with_default(NodeResult::Ok {
        stdout: String::new(),
        stderr: String::new(),
    }));
    let outcome = dash(&config(), transport).await.unwrap();
    assert!(matches!(outcome, DashOutcome::Empty));
}
