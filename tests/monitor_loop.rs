mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedTransport, lost, reply, targets};
use multi_ping_monitor::{Monitor, MonitorSettings, RoundTiming};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn settings(rounds: Option<u64>) -> MonitorSettings {
    MonitorSettings {
        rounds,
        interval: Duration::from_secs(1),
        timing: RoundTiming::default(),
    }
}

#[tokio::test(start_paused = true)]
async fn bounded_run_stops_after_count() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .script("10.0.0.1", [reply(1, 10.0), reply(1, 20.0), reply(1, 30.0)])
            .script("10.0.0.2", [lost(1)]),
    );
    let mut monitor = Monitor::new(transport, targets(&["10.0.0.1", "10.0.0.2"]), settings(Some(3)));

    let mut seen = Vec::new();
    let completed = monitor
        .run(CancellationToken::new(), |targets, report| {
            seen.push((targets[0].statistics().sample_count(), report.completed()));
        })
        .await;

    assert_eq!(completed, 3);
    assert_eq!(seen, [(1, 2), (2, 2), (3, 2)]);

    let targets = monitor.into_targets();
    let stats = targets[0].statistics();
    assert!((stats.mean().unwrap() - 20.0).abs() < 1e-12);
    assert!((stats.variance().unwrap() - 100.0).abs() < 1e-9);
    assert_eq!(stats.min(), Some(10.0));
    assert_eq!(stats.max(), Some(30.0));

    let down = targets[1].statistics();
    assert_eq!(down.lost_count(), 3);
    assert_eq!(down.loss_rate(), Some(1.0));
    assert_eq!(down.mean(), None);
}

#[tokio::test(start_paused = true)]
async fn rounds_are_spaced_by_interval() {
    let transport = Arc::new(ScriptedTransport::new().script("10.0.0.1", [reply(10, 10.0)]));
    let mut monitor = Monitor::new(transport, targets(&["10.0.0.1"]), settings(Some(3)));

    let started = Instant::now();
    let mut round_ends = Vec::new();
    monitor
        .run(CancellationToken::new(), |_, _| round_ends.push(started.elapsed()))
        .await;

    assert_eq!(round_ends.len(), 3);
    for pair in round_ends.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= Duration::from_millis(1010), "gap {gap:?}");
        assert!(gap < Duration::from_millis(1100), "gap {gap:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_between_rounds() {
    let transport = Arc::new(ScriptedTransport::new().script("10.0.0.1", [reply(1, 1.0)]));
    let mut monitor = Monitor::new(transport, targets(&["10.0.0.1"]), settings(None));

    let cancel = CancellationToken::new();
    let mut rounds = 0;
    let completed = monitor
        .run(cancel.clone(), |_, _| {
            rounds += 1;
            if rounds == 4 {
                cancel.cancel();
            }
        })
        .await;

    assert_eq!(completed, 4);
    assert_eq!(monitor.targets()[0].statistics().sample_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_runs_nothing() {
    let transport = Arc::new(ScriptedTransport::new().script("10.0.0.1", [reply(1, 1.0)]));
    let mut monitor = Monitor::new(transport.clone(), targets(&["10.0.0.1"]), settings(None));

    let cancel = CancellationToken::new();
    cancel.cancel();
    let completed = monitor.run(cancel, |_, _| panic!("no round expected")).await;

    assert_eq!(completed, 0);
    assert_eq!(transport.finished(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_sleep_ends_run() {
    let transport = Arc::new(ScriptedTransport::new().script("10.0.0.1", [reply(1, 1.0)]));
    let mut monitor = Monitor::new(transport, targets(&["10.0.0.1"]), settings(None));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            cancel.cancel();
        }
    });

    let started = Instant::now();
    let completed = monitor.run(cancel, |_, _| {}).await;

    // Rounds at 0 s and ~1 s; the cancel lands in the following sleep.
    assert_eq!(completed, 2);
    assert!(started.elapsed() < Duration::from_millis(2000));
}
