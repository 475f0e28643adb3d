//! Tab ledger: event-sourced dine-in orders
//!
//! - **manager**: OrdersManager, the command entry point
//! - **actions**: command handlers producing events
//! - **appliers**: pure event appliers folding events into snapshots
//! - **storage**: redb persistence for events, snapshots, tables and carts
//! - **reducer**: snapshot replay
//! - **money**: decimal arithmetic for totals
//!
//! # Architecture
//!
//! ```text
//! Command → OrdersManager → Event → Storage (redb)
//!                 ↓                      ↓
//!              Broadcast          Snapshot + table update
//! ```

// `traits` must come first: enum_dispatch registers `EventApplier` before
// `appliers` expands `EventAction`.
pub mod traits;

pub mod actions;
pub mod appliers;
pub mod manager;
pub mod money;
pub mod reducer;
pub mod storage;

// Re-exports
pub use manager::{ManagerError, ManagerResult, OrdersManager};
pub use reducer::rebuild_snapshot;
pub use storage::{OrderStorage, StorageError};
pub use traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier, OrderError};

// Re-export shared types for convenience
pub use shared::order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand,
    OrderCommandPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderStatus,
};
