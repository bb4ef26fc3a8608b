// crates/lost-found-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Item Store
// Description: Durable ItemStore backed by SQLite.
// Purpose: Persist item reports and their claim status.
// Dependencies: lost-found-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`ItemStore`] using `SQLite`. Inserts and
//! status updates each run in their own transaction. Reads validate status
//! labels and timestamps and fail closed on rows that do not parse.
//! Security posture: database contents are untrusted.

// ============================================================================//
// SECTION: Imports
// ============================================================================//

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use lost_found_core::Item;
use lost_found_core::ItemId;
use lost_found_core::ItemStatus;
use lost_found_core::ItemStore;
use lost_found_core::NewItem;
use lost_found_core::StoreError;
use lost_found_core::Timestamp;
use lost_found_core::ensure_assignable_status;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================//
// SECTION: Constants
// ============================================================================//

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================//
// SECTION: Config
// ============================================================================//

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` item store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a configuration with default tuning for `path`.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================//
// SECTION: Errors
// ============================================================================//

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored row failed to parse.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store input or configuration.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// No row matched the requested identifier.
    #[error("sqlite store item not found: {0}")]
    NotFound(ItemId),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

// ============================================================================//
// SECTION: Store
// ============================================================================//

/// `SQLite`-backed item store.
#[derive(Clone)]
pub struct SqliteItemStore {
    /// Store configuration.
    config: SqliteStoreConfig,
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteItemStore {
    /// Opens an `SQLite`-backed item store, creating the schema when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized, or when it carries an unknown schema version.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(&config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            config,
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Returns the database path this store was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Inserts a new row and returns the stored record.
    fn insert_item(&self, item: &NewItem) -> Result<Item, SqliteStoreError> {
        let date_reported = Timestamp::now();
        let date_text =
            date_reported.to_rfc3339().map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        tx.execute(
            "INSERT INTO items (title, description, item_type, location, contact_name, \
             contact_phone, status, date_reported) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.title(),
                item.description(),
                item.item_type(),
                item.location(),
                item.contact_name(),
                item.contact_phone(),
                ItemStatus::Active.as_str(),
                date_text,
            ],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let id = ItemId::new(tx.last_insert_rowid());
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(Item::from_new(id, item, date_reported))
    }

    /// Updates the status column for one row.
    fn update_item_status(&self, id: ItemId, status: ItemStatus) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "UPDATE items SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.get()],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        if changed == 0 {
            return Err(SqliteStoreError::NotFound(id));
        }
        Ok(())
    }

    /// Reads every row, newest first.
    fn list_items(&self) -> Result<Vec<Item>, SqliteStoreError> {
        let rows = {
            let guard = self.lock()?;
            let mut statement = guard
                .prepare(
                    "SELECT id, title, description, item_type, location, contact_name, \
                     contact_phone, status, date_reported FROM items ORDER BY id DESC",
                )
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            let rows = statement
                .query_map(params![], |row| {
                    Ok(ItemRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        item_type: row.get(3)?,
                        location: row.get(4)?,
                        contact_name: row.get(5)?,
                        contact_phone: row.get(6)?,
                        status: row.get(7)?,
                        date_reported: row.get(8)?,
                    })
                })
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            drop(statement);
            drop(guard);
            rows
        };
        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Runs a trivial query to confirm the connection is usable.
    fn check_ready(&self) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", params![], |row| row.get::<_, i64>(0))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

impl ItemStore for SqliteItemStore {
    fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        self.insert_item(item).map_err(StoreError::from)
    }

    fn update_status(&self, id: ItemId, status: ItemStatus) -> Result<(), StoreError> {
        ensure_assignable_status(status)?;
        self.update_item_status(id, status).map_err(StoreError::from)
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.list_items().map_err(StoreError::from)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.check_ready().map_err(StoreError::from)
    }
}

// ============================================================================//
// SECTION: Rows
// ============================================================================//

/// Raw column values for one `items` row.
struct ItemRow {
    /// Row identifier.
    id: i64,
    /// Title column.
    title: String,
    /// Description column.
    description: String,
    /// Report kind column.
    item_type: String,
    /// Location column.
    location: String,
    /// Contact name column.
    contact_name: String,
    /// Contact phone column.
    contact_phone: String,
    /// Status label column.
    status: String,
    /// RFC 3339 report timestamp column.
    date_reported: String,
}

impl ItemRow {
    /// Converts raw columns into a domain record.
    fn into_item(self) -> Result<Item, SqliteStoreError> {
        let status = ItemStatus::from_label(&self.status).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!(
                "unknown status {:?} for item {}",
                self.status, self.id
            ))
        })?;
        let date_reported = Timestamp::parse_rfc3339(&self.date_reported).map_err(|err| {
            SqliteStoreError::Corrupt(format!("invalid date_reported for item {}: {err}", self.id))
        })?;
        Ok(Item {
            id: ItemId::new(self.id),
            title: self.title,
            description: self.description,
            item_type: self.item_type,
            location: self.location,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            status,
            date_reported,
        })
    }
}

// ============================================================================//
// SECTION: Helpers
// ============================================================================//

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS items (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    item_type TEXT NOT NULL,
                    location TEXT NOT NULL DEFAULT '',
                    contact_name TEXT NOT NULL,
                    contact_phone TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'ACTIVE'
                        CHECK (status IN ('ACTIVE', 'CLAIMED')),
                    date_reported TEXT NOT NULL
                );",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}
