//! # Tandem
//!
//! Direct two-peer sessions with ordered, exactly-once application
//! messaging over unreliable, unordered byte channels.
//!
//! ## Overview
//!
//! One peer hosts, the other joins through a shareable address. Each
//! side appends opaque [`Action`]s to its own append-only log; the sync
//! layer rebroadcasts the full log on a timer and the receiving side
//! diffs each snapshot against what it has already delivered. The
//! application sees its peer's actions in order, exactly once, no
//! matter what the channel drops or duplicates.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tandem::{host, join, Action, MemoryHub, SessionEvent};
//!
//! async fn example() -> tandem::Result<()> {
//!     let hub = MemoryHub::new();
//!
//!     // Host: publish the address, wait for a peer.
//!     let (address, pending) = host(&hub, "tandem://local").await?;
//!     let joiner = join(&hub, &address);
//!     let (mut host_session, mut join_session) =
//!         tokio::try_join!(pending.established(), joiner)?;
//!
//!     // Exchange application actions.
//!     host_session.send(Action::app("MOVE", b"e4".to_vec()));
//!     match join_session.next_event().await {
//!         SessionEvent::PeerReady(peer) => println!("connected to {peer}"),
//!         other => println!("{other:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! The component crates are re-exported for convenience:
//!
//! - `tandem::core` - Data model ([`Action`], [`OutgoingLog`], identities)
//! - `tandem::sync` - Protocol engine and transport abstractions

pub mod bridge;
pub mod error;
pub mod session;

// Re-export component crates
pub use tandem_core as core;
pub use tandem_sync as sync;

// Re-export main types for convenience
pub use bridge::{ApplicationBridge, SessionEvent};
pub use error::{Result, SessionError};
pub use session::{host, host_with_config, join, join_with_config, PendingSession, Session};

// Re-export commonly used component types
pub use tandem_core::{Action, ActionKind, JoinAddress, OutgoingLog, Role, SessionId};
pub use tandem_sync::{Connector, MemoryHub, SyncConfig, SyncError, TransportChannel};
