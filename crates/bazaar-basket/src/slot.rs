//! # Durable Slot
//!
//! The single named key-value slot holding the serialized basket.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Durable Slot                                     │
//! │                                                                         │
//! │  SQLite file (one per shopper profile)                                 │
//! │  ┌────────────────────────────────────────────────────────────┐        │
//! │  │  slot table                                                │        │
//! │  │  ┌────────┬─────────────────────────────────────────────┐  │        │
//! │  │  │ key    │ payload                                     │  │        │
//! │  │  ├────────┼─────────────────────────────────────────────┤  │        │
//! │  │  │ basket │ [{"productId":"…","unitPrice":350,…}, …]    │  │        │
//! │  │  └────────┴─────────────────────────────────────────────┘  │        │
//! │  └────────────────────────────────────────────────────────────┘        │
//! │                                                                         │
//! │  • The payload is read and written WHOLESALE - there is no             │
//! │    field-level update. The in-memory basket is the source of truth    │
//! │    and the slot is its serialized mirror.                              │
//! │  • Reads fail soft: any error is logged and reported as "absent".      │
//! │  • Writes fail hard: a mutation that cannot be persisted is an error.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Synchronous SQLite?
//! The basket model is single-threaded and immediate: every mutation
//! persists and notifies before returning to its caller. A blocking
//! `rusqlite` connection matches that contract; an async pool would not.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// The fixed key under which the serialized basket lives.
pub const BASKET_SLOT_KEY: &str = "basket";

/// A local key-value slot backed by SQLite.
///
/// ## Thread Safety
/// `rusqlite::Connection` is `Send` but not `Sync`, so the connection sits
/// behind a `Mutex`. Contention is negligible: every access is a single
/// short statement.
#[derive(Debug)]
pub struct DurableSlot {
    conn: Mutex<Connection>,
}

impl DurableSlot {
    /// Opens (or creates) the slot database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;

        Self::init_schema(&conn)?;
        info!(path = %path.display(), "Opened durable slot");

        Ok(DurableSlot {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory slot. Used by tests and demo tooling; contents
    /// vanish when the slot is dropped.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;

        Self::init_schema(&conn)?;

        Ok(DurableSlot {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> StoreResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slot (
                key     TEXT PRIMARY KEY,
                payload TEXT NOT NULL
            );",
        )
        .map_err(|e| StoreError::SchemaFailed(e.to_string()))
    }

    /// Reads the payload stored under `key`.
    ///
    /// ## Soft Failure
    /// Returns `None` both when the key is absent and when the read itself
    /// fails; a failed read is logged at `warn` and otherwise
    /// indistinguishable from an empty slot. Callers treat `None` as
    /// "start from an empty basket".
    pub fn read(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().expect("Slot mutex poisoned");

        let result = conn
            .query_row(
                "SELECT payload FROM slot WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match result {
            Ok(payload) => {
                debug!(key = %key, present = payload.is_some(), "Read slot");
                payload
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Slot read failed, treating as absent");
                None
            }
        }
    }

    /// Writes `payload` under `key`, replacing any previous value wholesale.
    pub fn write(&self, key: &str, payload: &str) -> StoreResult<()> {
        let conn = self.conn.lock().expect("Slot mutex poisoned");

        conn.execute(
            "INSERT INTO slot (key, payload) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload",
            [key, payload],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        debug!(key = %key, bytes = payload.len(), "Wrote slot");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_none() {
        let slot = DurableSlot::in_memory().unwrap();
        assert_eq!(slot.read(BASKET_SLOT_KEY), None);
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let slot = DurableSlot::in_memory().unwrap();
        slot.write(BASKET_SLOT_KEY, "[]").unwrap();
        assert_eq!(slot.read(BASKET_SLOT_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_replaces_wholesale() {
        let slot = DurableSlot::in_memory().unwrap();
        slot.write(BASKET_SLOT_KEY, "[1]").unwrap();
        slot.write(BASKET_SLOT_KEY, "[2]").unwrap();
        assert_eq!(slot.read(BASKET_SLOT_KEY).as_deref(), Some("[2]"));
    }

    #[test]
    fn test_keys_are_independent() {
        let slot = DurableSlot::in_memory().unwrap();
        slot.write("basket", "[]").unwrap();
        slot.write("other", "{}").unwrap();

        assert_eq!(slot.read("basket").as_deref(), Some("[]"));
        assert_eq!(slot.read("other").as_deref(), Some("{}"));
    }

    #[test]
    fn test_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basket.db");

        {
            let slot = DurableSlot::open(&path).unwrap();
            slot.write(BASKET_SLOT_KEY, "[42]").unwrap();
        }

        let slot = DurableSlot::open(&path).unwrap();
        assert_eq!(slot.read(BASKET_SLOT_KEY).as_deref(), Some("[42]"));
    }
}
