//! Wallet data model
//!
//! Typed renditions of the backend wire payloads. Deserialization is strict:
//! every field must be present, so a malformed response fails at the network
//! boundary instead of leaking holes into the graph.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel meaning "transaction count unknown/suppressed"; renders with no
/// numeric label.
pub const TX_COUNT_SUPPRESSED: i64 = -1;

/// Class inference discriminants produced by the backend model
const CLASS_LICIT: i64 = 0;
const CLASS_ILLICIT: i64 = 1;

/// Statistical attributes of a single wallet, as served by
/// `GET {base}/wallet/{address}`.
///
/// Immutable once cached for a session; replaced wholesale on re-fetch,
/// never partially merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletRecord {
    pub address: String,
    pub num_txs_as_sender: i64,
    pub num_txs_as_receiver: i64,
    pub first_block_appeared_in: i64,
    pub last_block_appeared_in: i64,
    pub lifetime_in_blocks: i64,
    pub total_txs: i64,
    pub first_sent_block: i64,
    pub first_received_block: i64,
    pub btc_transacted_total: f64,
    pub btc_transacted_min: f64,
    pub btc_transacted_max: f64,
    pub btc_transacted_mean: f64,
    pub btc_transacted_median: f64,
    pub btc_sent_total: f64,
    pub btc_sent_min: f64,
    pub btc_sent_max: f64,
    pub btc_sent_mean: f64,
    pub btc_sent_median: f64,
    pub btc_received_total: f64,
    pub btc_received_min: f64,
    pub btc_received_max: f64,
    pub btc_received_mean: f64,
    pub btc_received_median: f64,
    pub fees_total: f64,
    pub fees_min: f64,
    pub fees_max: f64,
    pub fees_mean: f64,
    pub fees_median: f64,
    pub fees_as_share_total: f64,
    pub fees_as_share_min: f64,
    pub fees_as_share_max: f64,
    pub fees_as_share_mean: f64,
    pub fees_as_share_median: f64,
    pub blocks_btwn_txs_total: i64,
    pub blocks_btwn_txs_min: i64,
    pub blocks_btwn_txs_max: i64,
    pub blocks_btwn_txs_mean: f64,
    pub blocks_btwn_txs_median: f64,
    pub blocks_btwn_input_txs_total: i64,
    pub blocks_btwn_input_txs_min: i64,
    pub blocks_btwn_input_txs_max: i64,
    pub blocks_btwn_input_txs_mean: f64,
    pub blocks_btwn_input_txs_median: f64,
    pub blocks_btwn_output_txs_total: i64,
    pub blocks_btwn_output_txs_min: i64,
    pub blocks_btwn_output_txs_max: i64,
    pub blocks_btwn_output_txs_mean: f64,
    pub blocks_btwn_output_txs_median: f64,
    pub num_addr_transacted_multiple: i64,
    pub transacted_w_address_total: i64,
    pub transacted_w_address_min: i64,
    pub transacted_w_address_max: i64,
    pub transacted_w_address_mean: f64,
    pub transacted_w_address_median: f64,
    /// 0 = licit, 1 = illicit, anything else = unknown
    pub class_inference: i64,
    /// Unix timestamp of the last backend update
    pub last_updated: i64,
}

impl WalletRecord {
    /// Rendering color for this wallet's node, derived from the class
    /// inference.
    pub fn node_color(&self) -> NodeColor {
        match self.class_inference {
            CLASS_LICIT => NodeColor::Green,
            CLASS_ILLICIT => NodeColor::Red,
            _ => NodeColor::Grey,
        }
    }
}

/// Node colors understood by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    /// Inferred licit
    Green,
    /// Inferred illicit
    Red,
    /// Unknown classification, or attributes not fetched yet
    Grey,
}

impl NodeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeColor::Green => "green",
            NodeColor::Red => "red",
            NodeColor::Grey => "grey",
        }
    }
}

/// Summary of the transactions between two wallets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConnectionSummary {
    /// Number of transactions, or [`TX_COUNT_SUPPRESSED`]
    pub num_transactions: i64,
    pub amount_transacted: f64,
}

impl ConnectionSummary {
    /// Edge label for this connection. The suppressed-count sentinel renders
    /// as an empty label, never as a literal "-1".
    pub fn edge_label(&self) -> String {
        if self.num_transactions == TX_COUNT_SUPPRESSED {
            String::new()
        } else {
            format!("{} transactions", self.num_transactions)
        }
    }
}

/// Connections of a single wallet, as served by
/// `GET {base}/connected-wallets/{address}`.
///
/// Never cached: consumed once by the expansion engine and discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionSet {
    /// The wallet whose connections were queried
    pub wallet_address: String,
    /// Neighbors with transactions flowing into `wallet_address`
    pub inbound_connections: HashMap<String, ConnectionSummary>,
    /// Neighbors with transactions flowing out of `wallet_address`
    pub outbound_connections: HashMap<String, ConnectionSummary>,
}
