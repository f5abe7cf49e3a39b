//! vantage-core - Shared domain types for the vantage widget suite
//!
//! vantage is a set of headless engines behind embedded map widgets. This
//! crate carries everything the higher crates have in common:
//!
//! - **CameraPose / Ambiance / LayerState**: the replayable pieces of widget
//!   view state
//! - **PropertyValue**: the closed set of value shapes a sync property can
//!   carry, with a lossless JSON codec
//! - **Host adapters**: traits for the document table API, the broadcast
//!   transport, and the local key-value store the host provides
//! - **Clock**: injectable time source so throttling, debouncing, and tour
//!   timers stay deterministic under test

pub mod ambiance;
pub mod camera;
pub mod clock;
pub mod store;
pub mod table;
pub mod transport;
pub mod value;

pub use ambiance::{Ambiance, LayerState};
pub use camera::{CameraPose, Easing, FlightOptions, Transition, TransitionKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult};
pub use table::{
    ActionResults, CellValue, ColumnDef, MemoryTableAdapter, Record, TableAdapter, TableData,
    TableError, TableResult, UserAction,
};
pub use transport::{BroadcastTransport, SyncMessage, TransportError, TransportResult};
pub use value::PropertyValue;
