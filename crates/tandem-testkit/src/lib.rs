//! # Tandem Testkit
//!
//! Testing utilities for the tandem protocol stack.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: [`FlakyChannel`] for scripted frame drops and
//!   duplication, plus session-pair setup helpers
//! - **Generators**: proptest strategies for actions, logs, and loss
//!   patterns
//!
//! The protocol's reliability claims are exactly the things a flaky
//! channel attacks: dropped broadcast ticks must heal on the next tick,
//! duplicated frames must deliver nothing twice. The integration tests
//! in this crate's `tests/` directory drive those scenarios end to end.

pub mod fixtures;
pub mod generators;

pub use fixtures::{init_tracing, session_pair, FlakyChannel, FrameFate};
pub use generators::{action_log_strategy, action_strategy, drop_pattern_strategy};
