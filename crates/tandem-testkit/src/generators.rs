//! Proptest strategies for protocol inputs.

use proptest::prelude::*;

use tandem_core::Action;

/// An application action with an uppercase kind and a small opaque
/// payload.
pub fn action_strategy() -> impl Strategy<Value = Action> {
    ("[A-Z][A-Z_]{0,11}", proptest::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(kind, payload)| Action::app(kind, payload))
}

/// An outgoing log: an ordered sequence of application actions.
pub fn action_log_strategy(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(action_strategy(), 0..max_len)
}

/// Per-tick fates for a simulated lossy network: `true` means the
/// broadcast of that tick is dropped.
pub fn drop_pattern_strategy(ticks: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), ticks..=ticks)
}
