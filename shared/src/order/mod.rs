//! Order (table tab) event sourcing types
//!
//! - Commands: requests to modify a tab
//! - Events: immutable facts recorded after command processing
//! - Snapshots: tab state folded from the event stream

pub mod command;
pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use command::{OrderCommand, OrderCommandPayload};
pub use event::{EventPayload, OrderEvent, OrderEventType};
pub use snapshot::{DEFAULT_SERVICE_RATE, OrderSnapshot, OrderStatus};
pub use types::*;
