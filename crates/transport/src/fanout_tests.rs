use std::sync::Arc;
use std::time::Duration;

use nexus_core::NodeResult;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::FakeTransport;

fn nodes(names: &[&str]) -> Vec<NodeName> {
    names.iter().map(|n| NodeName::new(*n)).collect()
}

#[tokio::test]
async fn fan_out_totality_every_node_appears_exactly_once() {
    let transport = Arc::new(FakeTransport::new());
    let targets = nodes(&["local", "dev", "gpu"]);
    let results = fan_out(
        transport,
        &targets,
        &["tmux".into()],
        16,
        Duration::from_secs(2),
        CancellationToken::new(),
    )
    .await;
    assert_eq!(results.len(), targets.len());
    for n in &targets {
        assert!(results.contains_key(n));
    }
}

#[tokio::test]
async fn unreachable_node_is_a_result_not_a_missing_entry() {
    let transport = Arc::new(FakeTransport::new().with_response(
        "gpu",
        NodeResult::Unreachable {
            reason: "connect timeout".into(),
        },
    ));
    let targets = nodes(&["local", "gpu"]);
    let results = fan_out(
        transport,
        &targets,
        &["tmux".into()],
        16,
        Duration::from_secs(2),
        CancellationToken::new(),
    )
    .await;
    assert!(results[&NodeName::local()].is_ok());
    assert!(matches!(
        results[&NodeName::new("gpu")],
        NodeResult::Unreachable { .. }
    ));
}

#[tokio::test]
async fn empty_node_list_returns_empty_map() {
    let transport = Arc::new(FakeTransport::new());
    let results = fan_out(
        transport,
        &[],
        &["tmux".into()],
        16,
        Duration::from_secs(2),
        CancellationToken::new(),
    )
    .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn bounded_parallelism_never_exceeds_max_parallel() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration as StdDuration;

    struct TrackingTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Transport for TrackingTransport {
        async fn run_on_node(
            &self,
            _node: &NodeName,
            _argv: &[String],
            _timeout: StdDuration,
        ) -> NodeResult {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(StdDuration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            NodeResult::Ok {
                stdout: String::new(),
                stderr: String::new(),
            }
        }
    }

    let transport = Arc::new(TrackingTransport {
        in_flight: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
    });
    let targets: Vec<NodeName> = (0..10).map(|i| NodeName::new(format!("n{i}"))).collect();

    let _ = fan_out(
        transport.clone(),
        &targets,
        &["tmux".into()],
        3,
        StdDuration::from_secs(2),
        CancellationToken::new(),
    )
    .await;

    assert!(
        transport.peak.load(Ordering::SeqCst) <= 3,
        "peak in-flight exceeded max_parallel: {}",
        transport.peak.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn cancellation_marks_unreachable_instead_of_hanging() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let transport = Arc::new(FakeTransport::new());
    let targets = nodes(&["local", "dev"]);
    let results = fan_out(
        transport,
        &targets,
        &["tmux".into()],
        16,
        Duration::from_secs(2),
        cancel,
    )
    .await;
    assert_eq!(results.len(), 2);
    for node in &targets {
        assert!(matches!(results[node], NodeResult::Unreachable { .. }));
    }
}
