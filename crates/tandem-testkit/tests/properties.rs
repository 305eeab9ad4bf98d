//! Property tests for the delivery guarantee: whatever prefix snapshots
//! arrive (or are lost), the peer's log is eventually delivered in
//! order, exactly once.

use std::sync::Arc;

use proptest::prelude::*;
use tokio::sync::mpsc;

use tandem_core::{Action, OutgoingLog, SessionId};
use tandem_sync::{DeltaSyncEngine, MemoryChannel, Snapshot, SyncConfig};
use tandem_testkit::{action_log_strategy, drop_pattern_strategy};

fn engine_under_test() -> (
    DeltaSyncEngine<MemoryChannel>,
    mpsc::UnboundedReceiver<Action>,
    MemoryChannel,
) {
    let (ours, theirs) = MemoryChannel::pair();
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = DeltaSyncEngine::new(
        ours,
        SessionId::from_raw(1),
        Arc::new(OutgoingLog::new()),
        tx,
        SyncConfig::default(),
    );
    (engine, rx, theirs)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut delivered = Vec::new();
    while let Ok(action) = rx.try_recv() {
        delivered.push(action);
    }
    delivered
}

fn log_and_losses() -> impl Strategy<Value = (Vec<Action>, Vec<bool>)> {
    action_log_strategy(24).prop_flat_map(|log| {
        let ticks = log.len();
        (Just(log), drop_pattern_strategy(ticks))
    })
}

proptest! {
    /// Simulate one peer appending an action per tick while the network
    /// drops an arbitrary subset of broadcasts. Once a full snapshot
    /// gets through, the delivered sequence equals the log exactly.
    #[test]
    fn eventual_ordered_exactly_once_delivery((log, drops) in log_and_losses()) {
        let (mut engine, mut rx, _peer) = engine_under_test();
        let sender = SessionId::from_raw(2);

        for (tick, dropped) in drops.iter().enumerate() {
            if !dropped {
                let ok = engine
                    .apply_snapshot(Snapshot::new(sender, log[..=tick].to_vec()))
                    .unwrap();
                prop_assert!(ok);
            }
        }
        // The final tick always gets through, carrying the whole log.
        engine
            .apply_snapshot(Snapshot::new(sender, log.clone()))
            .unwrap();

        prop_assert_eq!(drain(&mut rx), log);
    }

    /// Every snapshot arrives twice. Duplication changes nothing.
    #[test]
    fn duplicated_snapshots_deliver_once(log in action_log_strategy(24)) {
        let (mut engine, mut rx, _peer) = engine_under_test();
        let sender = SessionId::from_raw(2);

        for tick in 0..log.len() {
            let snapshot = Snapshot::new(sender, log[..=tick].to_vec());
            engine.apply_snapshot(snapshot.clone()).unwrap();
            engine.apply_snapshot(snapshot).unwrap();
        }

        prop_assert_eq!(drain(&mut rx), log);
    }
}
