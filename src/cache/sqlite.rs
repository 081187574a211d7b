//! SQLite session cache implementation

use crate::wallet::WalletRecord;
use crate::{ExplorerError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Partition holding session metadata (single anchor-address key)
const SESSION_PARTITION: &str = "session-details";
/// Partition holding cached wallet records, keyed by address
const WALLET_PARTITION: &str = "wallet-data";
/// Key under which the session anchor address is stored
const ANCHOR_KEY: &str = "initial-wallet-address";

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Path to SQLite database file
    pub path: PathBuf,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: crate::config::default_cache_path(),
            wal_mode: true,
        }
    }
}

/// Session cache over a durable SQLite store.
///
/// Constructed unopened; [`SessionCache::open`] attaches the store. Every
/// operation on an unopened cache fails with
/// [`ExplorerError::NotInitialized`].
pub struct SessionCache {
    store: Option<Store>,
}

struct Store {
    conn: Connection,
    path: PathBuf,
}

impl SessionCache {
    /// Create a cache handle without touching the filesystem
    pub fn new() -> Self {
        Self { store: None }
    }

    /// Open or create the cache database and initialize its schema
    pub fn open(&mut self, config: CacheConfig) -> Result<()> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %config.path.display(), "Opening session cache");

        let conn = Connection::open(&config.path)?;
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{SESSION_PARTITION}" (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS "{WALLET_PARTITION}" (
                address TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                cached_at INTEGER NOT NULL
            );
            "#
        ))?;

        self.store = Some(Store {
            conn,
            path: config.path,
        });
        Ok(())
    }

    /// Convenience constructor: create and open in one step
    pub fn open_at(config: CacheConfig) -> Result<Self> {
        let mut cache = Self::new();
        cache.open(config)?;
        Ok(cache)
    }

    fn store(&self) -> Result<&Store> {
        self.store.as_ref().ok_or(ExplorerError::NotInitialized)
    }

    /// The anchor address of the current session, if one has been set
    pub fn anchor_address(&self) -> Result<Option<String>> {
        let store = self.store()?;
        let anchor = store
            .conn
            .query_row(
                &format!(r#"SELECT value FROM "{SESSION_PARTITION}" WHERE key = ?"#),
                params![ANCHOR_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(anchor)
    }

    /// Begin a session anchored at `anchor`.
    ///
    /// If the stored anchor differs from `anchor` (byte-exact comparison,
    /// including the no-prior-anchor case), every cached wallet record is
    /// cleared before the new anchor is written. Clearing and reseeding
    /// happen in one transaction. Re-submitting the stored anchor leaves
    /// the wallet partition untouched.
    pub fn begin_session(&mut self, anchor: &str) -> Result<()> {
        if anchor.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "wallet address is empty".to_string(),
            ));
        }
        let current = self.anchor_address()?;
        let store = self.store()?;

        if current.as_deref() == Some(anchor) {
            tracing::debug!(anchor, "Anchor unchanged, keeping cached records");
            return Ok(());
        }

        tracing::info!(
            new = anchor,
            old = current.as_deref().unwrap_or("<none>"),
            "Anchor changed, clearing wallet records"
        );

        let tx = store.conn.unchecked_transaction()?;
        tx.execute(&format!(r#"DELETE FROM "{WALLET_PARTITION}""#), [])?;
        tx.execute(
            &format!(
                r#"INSERT OR REPLACE INTO "{SESSION_PARTITION}" (key, value, updated_at)
                   VALUES (?, ?, ?)"#
            ),
            params![ANCHOR_KEY, anchor, now_millis()],
        )?;
        tx.commit()?;

        Ok(())
    }

    /// Look up the cached record for `address`
    pub fn record(&self, address: &str) -> Result<Option<WalletRecord>> {
        if address.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "wallet address is empty".to_string(),
            ));
        }
        let store = self.store()?;

        let raw: Option<String> = store
            .conn
            .query_row(
                &format!(r#"SELECT record FROM "{WALLET_PARTITION}" WHERE address = ?"#),
                params![address],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Upsert the record for `address`; last write wins
    pub fn put_record(&self, address: &str, record: &WalletRecord) -> Result<()> {
        if address.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "wallet address is empty".to_string(),
            ));
        }
        let store = self.store()?;

        tracing::debug!(address, "Caching wallet record");
        store.conn.execute(
            &format!(
                r#"INSERT OR REPLACE INTO "{WALLET_PARTITION}" (address, record, cached_at)
                   VALUES (?, ?, ?)"#
            ),
            params![address, serde_json::to_string(record)?, now_millis()],
        )?;
        Ok(())
    }

    /// Every record cached this session, in store-defined order.
    ///
    /// Used to rehydrate the visual graph after a restart when an anchor
    /// already exists.
    pub fn all_records(&self) -> Result<Vec<WalletRecord>> {
        let store = self.store()?;

        let mut stmt = store
            .conn
            .prepare(&format!(r#"SELECT record FROM "{WALLET_PARTITION}""#))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for raw in rows {
            records.push(serde_json::from_str(&raw?)?);
        }
        Ok(records)
    }

    /// Clear both partitions: wallet records and the anchor itself
    pub fn clear(&self) -> Result<()> {
        let store = self.store()?;

        tracing::info!("Clearing session cache");
        store
            .conn
            .execute(&format!(r#"DELETE FROM "{WALLET_PARTITION}""#), [])?;
        store
            .conn
            .execute(&format!(r#"DELETE FROM "{SESSION_PARTITION}""#), [])?;
        Ok(())
    }

    /// Cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let store = self.store()?;

        let record_count: i64 = store.conn.query_row(
            &format!(r#"SELECT COUNT(*) FROM "{WALLET_PARTITION}""#),
            [],
            |row| row.get(0),
        )?;

        Ok(CacheStats {
            anchor: self.anchor_address()?,
            record_count: record_count as usize,
        })
    }

    /// The database path, if the store has been opened
    pub fn path(&self) -> Option<&Path> {
        self.store.as_ref().map(|s| s.path.as_path())
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Session cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub anchor: Option<String>,
    pub record_count: usize,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
