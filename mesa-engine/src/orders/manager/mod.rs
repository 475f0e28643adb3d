//! OrdersManager - Core command processing and event generation
//!
//! This module handles:
//! - Command validation and processing
//! - Event generation with global sequence numbers
//! - Persistence to redb (transactional)
//! - Snapshot updates and table occupancy
//! - Event broadcasting
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Create CommandContext
//!     ├─ 4. Convert command to action and execute
//!     ├─ 5. Apply events to the snapshot via EventApplier
//!     ├─ 6. Reconcile table occupancy
//!     ├─ 7. Persist events, snapshot, sequence
//!     ├─ 8. Mark command processed
//!     ├─ 9. Commit transaction
//!     ├─ 10. Broadcast event(s)
//!     └─ 11. Return response
//! ```

mod error;
pub use error::*;

use super::actions::CommandAction;
use super::appliers::apply_event;
use super::reducer;
use super::storage::{OrderStorage, StorageError};
use super::traits::{CommandContext, CommandHandler, CommandMetadata};
use crate::core::Config;
use redb::WriteTransaction;
use shared::models::{DiningTable, TableStatus};
use shared::order::{
    CommandResponse, OrderCommand, OrderEvent, OrderSnapshot, OrderStatus, DEFAULT_SERVICE_RATE,
};
use std::path::Path;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// OrdersManager for command processing
pub struct OrdersManager {
    storage: OrderStorage,
    event_tx: broadcast::Sender<OrderEvent>,
    /// Service rate (percent) frozen into newly opened tabs
    service_rate: f64,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("service_rate", &self.service_rate)
            .finish()
    }
}

impl OrdersManager {
    /// Create a new OrdersManager with the given database path
    pub fn new(db_path: impl AsRef<Path>, config: &Config) -> ManagerResult<Self> {
        let storage = OrderStorage::open(db_path)?;
        tracing::info!(
            service_rate = config.service_fee_percent,
            "OrdersManager started"
        );
        Ok(Self::with_storage(storage).with_service_rate(config.service_fee_percent))
    }

    /// Create an OrdersManager over existing storage at the default service rate
    pub fn with_storage(storage: OrderStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            event_tx,
            service_rate: DEFAULT_SERVICE_RATE,
        }
    }

    /// Override the service rate applied to new tabs
    pub fn with_service_rate(mut self, service_rate: f64) -> Self {
        self.service_rate = service_rate;
        self
    }

    /// Service rate applied to new tabs
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: OrderCommand) -> CommandResponse {
        self.execute_command_with_events(cmd).0
    }

    /// Execute a command and return both the response and generated events
    ///
    /// Events are broadcast to subscribers as well as returned.
    pub fn execute_command_with_events(
        &self,
        cmd: OrderCommand,
    ) -> (CommandResponse, Vec<OrderEvent>) {
        let command_id = cmd.command_id.clone();
        match self.process_command(cmd) {
            Ok((response, events)) => {
                // Broadcast events after successful commit
                for event in &events {
                    if self.event_tx.send(event.clone()).is_err() {
                        tracing::warn!("Event broadcast failed: no active receivers");
                        break;
                    }
                }
                (response, events)
            }
            Err(err) => {
                tracing::debug!(command_id = %command_id, error = %err, "Command rejected");
                (CommandResponse::error(command_id, err.into()), vec![])
            }
        }
    }

    /// Process command and return response with events
    fn process_command(
        &self,
        cmd: OrderCommand,
    ) -> ManagerResult<(CommandResponse, Vec<OrderEvent>)> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Idempotency check (before transaction)
        if self.storage.is_command_processed(&cmd.command_id)? {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        // 2. Begin write transaction
        let txn = self.storage.begin_write()?;

        // Double-check idempotency within transaction
        if self
            .storage
            .is_command_processed_txn(&txn, &cmd.command_id)?
        {
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        // 3. Create context and metadata
        let current_sequence = self.storage.get_current_sequence_txn(&txn)?;
        let mut ctx = CommandContext::new(&txn, &self.storage, current_sequence);
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            operator_id: cmd.operator_id.clone(),
            operator_name: cmd.operator_name.clone(),
            timestamp: cmd.timestamp,
        };

        // 4. Convert to action and execute
        let action = CommandAction::from_command(&cmd, self.service_rate);
        let events = action.execute(&mut ctx, &metadata)?;
        let next_sequence = ctx.current_sequence();

        // 5. Apply events to the snapshot
        let mut touched: Vec<(Option<OrderStatus>, OrderSnapshot)> = Vec::new();
        for event in &events {
            let position = touched
                .iter()
                .position(|(_, s)| s.order_id == event.order_id);
            let index = match position {
                Some(index) => index,
                None => {
                    let stored = self.storage.get_snapshot_txn(&txn, &event.order_id)?;
                    let before = stored.as_ref().map(|s| s.status);
                    let snapshot =
                        stored.unwrap_or_else(|| OrderSnapshot::new(event.order_id.clone()));
                    touched.push((before, snapshot));
                    touched.len() - 1
                }
            };
            apply_event(&mut touched[index].1, event);
        }

        // 6. Reconcile table occupancy, 7. persist
        for (before, snapshot) in &touched {
            self.sync_table(&txn, *before, snapshot, &cmd.operator_id)?;
            self.storage.store_snapshot(&txn, snapshot)?;
        }
        for event in &events {
            self.storage.store_event(&txn, event)?;
        }
        if next_sequence > current_sequence {
            self.storage.set_sequence(&txn, next_sequence)?;
        }

        // 8. Mark command processed
        self.storage.mark_command_processed(&txn, &cmd.command_id)?;

        // 9. Commit transaction
        txn.commit().map_err(StorageError::from)?;

        let order_id = events
            .first()
            .map(|e| e.order_id.clone())
            .or_else(|| cmd.order_id().map(str::to_string));
        tracing::debug!(
            command_id = %cmd.command_id,
            order_id = ?order_id,
            event_count = events.len(),
            "Command processed successfully"
        );
        Ok((CommandResponse::success(cmd.command_id, order_id), events))
    }

    /// Keep table occupancy and the open-tab index in step with a snapshot
    ///
    /// - new tab: table becomes `Occupied`
    /// - tab closed (paid or cancelled): table released
    /// - closed tab reopened: table re-occupied, or `TableOccupied`
    fn sync_table(
        &self,
        txn: &WriteTransaction,
        before: Option<OrderStatus>,
        snapshot: &OrderSnapshot,
        operator_id: &str,
    ) -> ManagerResult<()> {
        let was_open = before.map(|s| !s.is_terminal());
        let is_open = snapshot.is_open();

        match (was_open, is_open) {
            // Opened, or reopened from a terminal status
            (None, true) | (Some(false), true) => {
                let mut table = self.load_table_txn(txn, &snapshot.table_id)?;
                if !table.is_available() {
                    return Err(ManagerError::TableOccupied(table.display_name()));
                }
                table.status = TableStatus::Occupied;
                self.storage.store_table(txn, &table)?;
                self.storage.mark_order_active(txn, &snapshot.order_id)?;
                tracing::info!(
                    order_id = %snapshot.order_id,
                    table = %table.display_name(),
                    "Tab opened"
                );
                crate::audit_log!(operator_id, "open_tab", format!("order:{}", snapshot.order_id));
            }
            // Closed
            (Some(true), false) | (None, false) => {
                if let Some(mut table) = self.storage.get_table_txn(txn, &snapshot.table_id)?
                    && table.status == TableStatus::Occupied
                {
                    table.status = TableStatus::Available;
                    self.storage.store_table(txn, &table)?;
                }
                self.storage.mark_order_inactive(txn, &snapshot.order_id)?;
                tracing::info!(
                    order_id = %snapshot.order_id,
                    status = ?snapshot.status,
                    total = snapshot.total,
                    "Tab closed"
                );
                crate::audit_log!(
                    operator_id,
                    "close_tab",
                    format!("order:{}", snapshot.order_id),
                    format!("{:?}", snapshot.status)
                );
            }
            (Some(true), true) | (Some(false), false) => {}
        }
        Ok(())
    }

    fn load_table_txn(&self, txn: &WriteTransaction, table_id: &str) -> ManagerResult<DiningTable> {
        self.storage
            .get_table_txn(txn, table_id)?
            .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))
    }

    // ========== Public Query Methods ==========

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> ManagerResult<Option<OrderSnapshot>> {
        Ok(self.storage.get_snapshot(order_id)?)
    }

    /// Get all open tab snapshots
    pub fn get_active_orders(&self) -> ManagerResult<Vec<OrderSnapshot>> {
        Ok(self.storage.get_active_orders()?)
    }

    /// Get current sequence number
    pub fn get_current_sequence(&self) -> ManagerResult<u64> {
        Ok(self.storage.get_current_sequence()?)
    }

    /// Get events since a given sequence
    pub fn get_events_since(&self, since_sequence: u64) -> ManagerResult<Vec<OrderEvent>> {
        Ok(self.storage.get_events_since(since_sequence)?)
    }

    /// Get all events for a specific order
    pub fn get_events_for_order(&self, order_id: &str) -> ManagerResult<Vec<OrderEvent>> {
        Ok(self.storage.get_events_for_order(order_id)?)
    }

    /// Rebuild a snapshot from its stored events (for verification)
    pub fn rebuild_snapshot(&self, order_id: &str) -> ManagerResult<OrderSnapshot> {
        let events = self.storage.get_events_for_order(order_id)?;
        reducer::rebuild_snapshot(&events)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    // ========== Table Registry ==========

    /// Get a dining table by ID
    pub fn get_table(&self, table_id: &str) -> ManagerResult<Option<DiningTable>> {
        Ok(self.storage.get_table(table_id)?)
    }

    /// List dining tables ordered by number
    pub fn list_tables(&self) -> ManagerResult<Vec<DiningTable>> {
        Ok(self.storage.list_tables()?)
    }

    /// Create or update a dining table
    ///
    /// A table holding an open tab keeps its `Occupied` status.
    pub fn upsert_table(&self, mut table: DiningTable) -> ManagerResult<DiningTable> {
        if self
            .storage
            .find_active_order_for_table(&table.id)?
            .is_some()
        {
            table.status = TableStatus::Occupied;
        } else if table.status == TableStatus::Occupied {
            return Err(ManagerError::InvalidOperation(format!(
                "{} has no open tab and cannot be marked occupied",
                table.display_name()
            )));
        }
        self.storage.upsert_table(&table)?;
        Ok(table)
    }
}

// Make OrdersManager Clone-able; storage and the channel are shared
impl Clone for OrdersManager {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            event_tx: self.event_tx.clone(),
            service_rate: self.service_rate,
        }
    }
}

#[cfg(test)]
mod tests;
