//! Cache-aside orchestrator
//!
//! Composes the session cache and the backend client into the canonical read
//! path: every caller that needs wallet attributes goes through
//! [`WalletExplorer::fetch_wallet_with_cache`], so every wallet displayed in
//! a session is guaranteed to be in the cache.

use crate::backend::WalletApi;
use crate::cache::SessionCache;
use crate::graph::{self, GraphHandle, NodeAttributes};
use crate::wallet::WalletRecord;
use crate::{ExplorerError, Result};
use tracing::debug;

/// Explorer session driver: one cache, one backend client
pub struct WalletExplorer<C: WalletApi> {
    cache: SessionCache,
    client: C,
}

impl<C: WalletApi> WalletExplorer<C> {
    pub fn new(cache: SessionCache, client: C) -> Self {
        Self { cache, client }
    }

    /// The underlying session cache
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// The underlying backend client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Begin a session anchored at `anchor` and fetch its wallet record.
    ///
    /// A changed anchor atomically clears and reseeds the cache before the
    /// fetch, so the anchor's record lands in the fresh session.
    pub async fn begin_session(&mut self, anchor: &str) -> Result<WalletRecord> {
        self.cache.begin_session(anchor)?;
        self.fetch_wallet_with_cache(anchor).await
    }

    /// Fetch a wallet's attributes, cache-aside.
    ///
    /// A cache hit is authoritative: it returns without network access,
    /// accepted staleness included. On a miss the backend result is written
    /// back before returning. Failures propagate unchanged and cache
    /// nothing.
    pub async fn fetch_wallet_with_cache(&self, address: &str) -> Result<WalletRecord> {
        if address.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "wallet address is empty".to_string(),
            ));
        }

        if let Some(hit) = self.cache.record(address)? {
            debug!(address, "Cache hit");
            return Ok(hit);
        }

        debug!(address, "Cache miss, fetching from backend");
        let record = self.client.fetch_wallet(address).await?;
        self.cache.put_record(address, &record)?;
        Ok(record)
    }

    /// Fetch `address`'s connections and merge them into `graph`.
    ///
    /// No node or edge insertion begins until the full connection set has
    /// been received, so a failed fetch leaves the graph untouched.
    pub async fn expand_wallet(&self, address: &str, graph: &mut dyn GraphHandle) -> Result<()> {
        if address.is_empty() {
            return Err(ExplorerError::InvalidArgument(
                "wallet address is empty".to_string(),
            ));
        }

        let connections = self.client.fetch_connections(address).await?;
        graph::expand(address, &connections, graph);
        Ok(())
    }

    /// Re-add every cached wallet to `graph` after a restart.
    ///
    /// Returns the number of nodes added; nodes already present are left
    /// alone.
    pub fn rehydrate(&self, graph: &mut dyn GraphHandle) -> Result<usize> {
        let mut added = 0;
        for record in self.cache.all_records()? {
            if !graph.has_node(&record.address) {
                graph.add_node(
                    &record.address,
                    NodeAttributes::classified(record.node_color(), 0.0, 0.0),
                );
                added += 1;
            }
        }
        debug!(added, "Rehydrated graph from cache");
        Ok(added)
    }
}
