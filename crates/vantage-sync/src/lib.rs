//! vantage-sync - Cross-widget state synchronization
//!
//! Widgets embedded in the same host document cooperate on named channels:
//! one master drives, slaves follow. This crate provides:
//!
//! - **SyncProperty**: named getter/setter pairs over widget state, with
//!   optional receive-side transforms, throttle windows, and persistence
//! - **SyncManager**: throttled emission over a broadcast transport,
//!   echo-suppressed receiving, and debounced version-checked persistence
//!   of the channel row in a host document table
//! - **Throttle/Debounce** primitives measured against an injectable clock
//!
//! Everything here is single-threaded and event-driven; the embedding glue
//! feeds inbound messages into [`SyncManager::receive`] and drives
//! [`SyncManager::tick`] for persistence.

pub mod error;
pub mod manager;
pub mod property;
pub mod throttle;

pub use error::{SyncError, SyncResult};
pub use manager::{ErrorCallback, SyncConfig, SyncManager, SyncRole, SyncStatus};
pub use property::SyncProperty;
pub use throttle::{Debouncer, ThrottleGate};
