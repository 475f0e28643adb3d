//! redb-based storage layer for the tab ledger and storefront carts
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `events` | `(order_id, sequence)` | `OrderEvent` | Event stream (append-only) |
//! | `snapshots` | `order_id` | `OrderSnapshot` | Snapshot cache |
//! | `active_orders` | `order_id` | `()` | Open tab index |
//! | `processed_commands` | `command_id` | `()` | Idempotency check |
//! | `sequence_counter` | `"seq"` | `u64` | Global sequence |
//! | `dining_tables` | `table_id` | `DiningTable` | Table registry and occupancy |
//! | `carts` | `session_id` | `Vec<CartLine>` | Storefront cart per session |
//!
//! Values are JSON-encoded, matching the request/response format of the
//! persistence boundary.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::cart::CartLine;
use shared::models::DiningTable;
use shared::order::{OrderEvent, OrderSnapshot};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Events: key = (order_id, sequence), value = JSON OrderEvent
const EVENTS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("events");

/// Snapshots: key = order_id, value = JSON OrderSnapshot
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Open tabs: key = order_id, value = empty (existence check)
const ACTIVE_ORDERS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("active_orders");

/// Processed commands: key = command_id, value = empty (idempotency)
const PROCESSED_COMMANDS_TABLE: TableDefinition<&str, ()> =
    TableDefinition::new("processed_commands");

/// Sequence counter: key = "seq", value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

/// Dining tables: key = table_id, value = JSON DiningTable
const DINING_TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dining_tables");

/// Carts: key = session_id, value = JSON Vec<CartLine>
const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

const SEQUENCE_KEY: &str = "seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").finish_non_exhaustive()
    }
}

impl OrderStorage {
    /// Open or create the database at the given path
    ///
    /// Commits are durable as soon as `commit()` returns.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and single-session use)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(EVENTS_TABLE)?;
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
            let _ = write_txn.open_table(ACTIVE_ORDERS_TABLE)?;
            let _ = write_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(CARTS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    /// Get current sequence (read-only)
    pub fn get_current_sequence(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Get current sequence (within transaction)
    pub fn get_current_sequence_txn(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let table = txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Set sequence number (within transaction)
    pub fn set_sequence(&self, txn: &WriteTransaction, sequence: u64) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        table.insert(SEQUENCE_KEY, sequence)?;
        Ok(())
    }

    // ========== Command Idempotency ==========

    /// Check if a command has been processed
    pub fn is_command_processed(&self, command_id: &str) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    /// Check if a command has been processed (within transaction)
    pub fn is_command_processed_txn(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<bool> {
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id)?.is_some())
    }

    /// Mark a command as processed
    pub fn mark_command_processed(
        &self,
        txn: &WriteTransaction,
        command_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        table.insert(command_id, ())?;
        Ok(())
    }

    // ========== Event Operations ==========

    /// Store an event
    pub fn store_event(&self, txn: &WriteTransaction, event: &OrderEvent) -> StorageResult<()> {
        let mut table = txn.open_table(EVENTS_TABLE)?;
        let key = (event.order_id.as_str(), event.sequence);
        let value = serde_json::to_vec(event)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Get all events for an order, in sequence order
    pub fn get_events_for_order(&self, order_id: &str) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;

        let mut events = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (_key, value) = result?;
            let event: OrderEvent = serde_json::from_slice(value.value())?;
            events.push(event);
        }

        events.sort_by_key(|e| e.sequence);
        Ok(events)
    }

    /// Get events since a given sequence (across all orders)
    pub fn get_events_since(&self, since_sequence: u64) -> StorageResult<Vec<OrderEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;

        let mut events = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let event: OrderEvent = serde_json::from_slice(value.value())?;
            if event.sequence > since_sequence {
                events.push(event);
            }
        }

        events.sort_by_key(|e| e.sequence);
        Ok(events)
    }

    // ========== Snapshot Operations ==========

    /// Store a snapshot
    pub fn store_snapshot(
        &self,
        txn: &WriteTransaction,
        snapshot: &OrderSnapshot,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
        let value = serde_json::to_vec(snapshot)?;
        table.insert(snapshot.order_id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> StorageResult<Option<OrderSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a snapshot by order ID (within transaction)
    pub fn get_snapshot_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<OrderSnapshot>> {
        let table = txn.open_table(SNAPSHOTS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Active Orders ==========

    /// Mark an order as active
    pub fn mark_order_active(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.insert(order_id, ())?;
        Ok(())
    }

    /// Mark an order as inactive
    pub fn mark_order_inactive(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    /// Get all active order IDs
    pub fn get_active_order_ids(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;

        let mut order_ids = Vec::new();
        for result in table.iter()? {
            let (key, _value) = result?;
            order_ids.push(key.value().to_string());
        }

        Ok(order_ids)
    }

    /// Get all active order snapshots
    pub fn get_active_orders(&self) -> StorageResult<Vec<OrderSnapshot>> {
        let mut snapshots = Vec::new();
        for order_id in self.get_active_order_ids()? {
            if let Some(snapshot) = self.get_snapshot(&order_id)? {
                snapshots.push(snapshot);
            }
        }
        Ok(snapshots)
    }

    /// Find the open tab on a table (read-only)
    pub fn find_active_order_for_table(&self, table_id: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let active_table = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let snapshots_table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        for result in active_table.iter()? {
            let (key, _) = result?;
            let order_id = key.value();

            if let Some(value) = snapshots_table.get(order_id)? {
                let snapshot: OrderSnapshot = serde_json::from_slice(value.value())?;
                if snapshot.table_id == table_id {
                    return Ok(Some(order_id.to_string()));
                }
            }
        }

        Ok(None)
    }

    // ========== Dining Tables ==========

    /// Store a dining table (within transaction)
    pub fn store_table(&self, txn: &WriteTransaction, table: &DiningTable) -> StorageResult<()> {
        let mut t = txn.open_table(DINING_TABLES_TABLE)?;
        let value = serde_json::to_vec(table)?;
        t.insert(table.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Insert or replace a dining table in its own transaction
    pub fn upsert_table(&self, table: &DiningTable) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        self.store_table(&txn, table)?;
        txn.commit()?;
        Ok(())
    }

    /// Get a dining table by ID
    pub fn get_table(&self, table_id: &str) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;

        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a dining table by ID (within transaction)
    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<DiningTable>> {
        let t = txn.open_table(DINING_TABLES_TABLE)?;

        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// List dining tables ordered by number
    pub fn list_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;

        let mut tables: Vec<DiningTable> = Vec::new();
        for result in t.iter()? {
            let (_key, value) = result?;
            tables.push(serde_json::from_slice(value.value())?);
        }

        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    // ========== Carts ==========

    /// Load the cart lines of a storefront session
    pub fn get_cart(&self, session_id: &str) -> StorageResult<Option<Vec<CartLine>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CARTS_TABLE)?;

        match table.get(session_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace the cart lines of a storefront session
    pub fn store_cart(&self, session_id: &str, lines: &[CartLine]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            let value = serde_json::to_vec(lines)?;
            table.insert(session_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove a stored cart
    pub fn remove_cart(&self, session_id: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.remove(session_id)?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ProductRef, TableStatus};
    use shared::order::{EventPayload, OrderEventType};

    fn create_test_event(order_id: &str, sequence: u64) -> OrderEvent {
        OrderEvent {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            order_id: order_id.to_string(),
            timestamp: shared::util::now_millis(),
            client_timestamp: None,
            operator_id: "test_op".to_string(),
            operator_name: "Test Operator".to_string(),
            command_id: uuid::Uuid::new_v4().to_string(),
            event_type: OrderEventType::TableOpened,
            payload: EventPayload::TableOpened {
                table_id: "T1".to_string(),
                table_number: 1,
                include_service: true,
                service_rate: 10.0,
                notes: None,
            },
        }
    }

    #[test]
    fn test_open_in_memory_starts_at_zero() {
        let storage = OrderStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_current_sequence().unwrap(), 0);
    }

    #[test]
    fn test_store_and_get_events_in_order() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage.store_event(&txn, &create_test_event("order-1", 2)).unwrap();
        storage.store_event(&txn, &create_test_event("order-1", 1)).unwrap();
        storage.store_event(&txn, &create_test_event("order-2", 3)).unwrap();
        storage.set_sequence(&txn, 3).unwrap();
        txn.commit().unwrap();

        let events = storage.get_events_for_order("order-1").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sequence, 1);
        assert_eq!(events[1].sequence, 2);

        let since = storage.get_events_since(1).unwrap();
        assert_eq!(since.len(), 2);
        assert_eq!(storage.get_current_sequence().unwrap(), 3);
    }

    #[test]
    fn test_snapshot_and_active_index() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.table_id = "T1".to_string();

        let txn = storage.begin_write().unwrap();
        storage.store_snapshot(&txn, &snapshot).unwrap();
        storage.mark_order_active(&txn, "order-1").unwrap();
        txn.commit().unwrap();

        assert_eq!(storage.get_snapshot("order-1").unwrap(), Some(snapshot));
        assert_eq!(
            storage.find_active_order_for_table("T1").unwrap(),
            Some("order-1".to_string())
        );

        let txn = storage.begin_write().unwrap();
        storage.mark_order_inactive(&txn, "order-1").unwrap();
        txn.commit().unwrap();

        assert!(storage.get_active_orders().unwrap().is_empty());
        assert_eq!(storage.find_active_order_for_table("T1").unwrap(), None);
        assert!(storage.get_snapshot("order-1").unwrap().is_some());
    }

    #[test]
    fn test_command_idempotency_marker() {
        let storage = OrderStorage::open_in_memory().unwrap();
        assert!(!storage.is_command_processed("cmd-1").unwrap());

        let txn = storage.begin_write().unwrap();
        storage.mark_command_processed(&txn, "cmd-1").unwrap();
        assert!(storage.is_command_processed_txn(&txn, "cmd-1").unwrap());
        txn.commit().unwrap();

        assert!(storage.is_command_processed("cmd-1").unwrap());
    }

    #[test]
    fn test_tables_sorted_by_number() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.upsert_table(&DiningTable::new("t-3", 3)).unwrap();
        storage.upsert_table(&DiningTable::new("t-1", 1)).unwrap();

        let mut occupied = DiningTable::new("t-2", 2);
        occupied.status = TableStatus::Occupied;
        storage.upsert_table(&occupied).unwrap();

        let numbers: Vec<i32> = storage.list_tables().unwrap().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(
            storage.get_table("t-2").unwrap().map(|t| t.status),
            Some(TableStatus::Occupied)
        );
        assert!(storage.get_table("missing").unwrap().is_none());
    }

    #[test]
    fn test_cart_roundtrip_and_remove() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let lines = vec![CartLine::new(ProductRef::new("p1", "Pastel", 8.5), 2)];

        storage.store_cart("session-1", &lines).unwrap();
        assert_eq!(storage.get_cart("session-1").unwrap(), Some(lines));

        storage.remove_cart("session-1").unwrap();
        assert_eq!(storage.get_cart("session-1").unwrap(), None);
    }
}
