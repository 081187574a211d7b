//! BitCaml - Bitcoin Transaction-Graph Explorer
//!
//! Main entry point for the BitCaml CLI.

use anyhow::Context;
use bitcaml::backend::BackendClient;
use bitcaml::cache::{CacheConfig, SessionCache};
use bitcaml::config::Config;
use bitcaml::graph::{DirectedGraph, EdgeKind};
use bitcaml::service::WalletExplorer;
use bitcaml::wallet::WalletRecord;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BitCaml - explore the Bitcoin transaction graph from one wallet address
#[derive(Parser, Debug)]
#[command(name = "bitcaml")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the cache database (default: ~/.config/bitcaml/cache.db)
    #[arg(long)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Begin an investigative session at a wallet address
    ///
    /// A new address invalidates all wallet records cached for the previous
    /// session. Prompts for the address when omitted.
    Anchor {
        /// Anchor wallet address
        address: Option<String>,
    },

    /// Fetch a wallet's attributes (served from cache when possible)
    Inspect {
        /// Wallet address
        address: String,
    },

    /// Fetch a wallet's connections and merge them into the session graph
    Expand {
        /// Wallet address to expand
        address: String,
    },

    /// Print the session graph rehydrated from the cache
    Graph,

    /// Show session cache statistics
    Status,

    /// Clear the session cache, anchor included
    ClearCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bitcaml::logging::init().ok();

    let cli = Cli::parse();

    let cache_config = CacheConfig {
        path: cli
            .cache
            .unwrap_or_else(bitcaml::config::default_cache_path),
        ..Default::default()
    };
    let cache = SessionCache::open_at(cache_config).context("Failed to open session cache")?;

    match cli.command {
        Commands::Anchor { address } => {
            let address = match address {
                Some(address) => address,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Enter wallet address")
                    .interact_text()
                    .context("Failed to read wallet address")?,
            };
            let mut explorer = explorer(cache)?;
            let record = explorer.begin_session(&address).await?;
            println!("Session anchored at {address}");
            print_record(&record);
        }
        Commands::Inspect { address } => {
            let explorer = explorer(cache)?;
            let record = explorer.fetch_wallet_with_cache(&address).await?;
            print_record(&record);
        }
        Commands::Expand { address } => {
            let explorer = explorer(cache)?;
            let mut graph = DirectedGraph::new();
            explorer.rehydrate(&mut graph)?;
            explorer.expand_wallet(&address, &mut graph).await?;
            print_graph(&graph);
        }
        Commands::Graph => {
            let explorer = WalletExplorer::new(cache, null_client()?);
            let mut graph = DirectedGraph::new();
            let added = explorer.rehydrate(&mut graph)?;
            println!("{added} wallets cached this session");
            print_graph(&graph);
        }
        Commands::Status => {
            let stats = cache.stats()?;
            match stats.anchor {
                Some(anchor) => println!("Anchor:  {anchor}"),
                None => println!("Anchor:  <none>"),
            }
            println!("Records: {}", stats.record_count);
            if let Some(path) = cache.path() {
                println!("Store:   {}", path.display());
            }
        }
        Commands::ClearCache => {
            cache.clear()?;
            println!("Session cache cleared");
        }
    }

    Ok(())
}

fn explorer(cache: SessionCache) -> anyhow::Result<WalletExplorer<BackendClient>> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = BackendClient::new(&config)?;
    Ok(WalletExplorer::new(cache, client))
}

/// Commands that never touch the network still need a client type; a client
/// against an unroutable base URL keeps the type simple without any request
/// ever being issued.
fn null_client() -> anyhow::Result<BackendClient> {
    let config = Config::from_lookup(|var| {
        (var == bitcaml::config::BACKEND_BASE_URL_VAR).then(|| "http://127.0.0.1:0".to_string())
    })?;
    Ok(BackendClient::new(&config)?)
}

fn print_record(record: &WalletRecord) {
    println!("Wallet {}", record.address);
    println!("  classification:  {}", record.node_color().as_str());
    println!(
        "  transactions:    {} total ({} sent, {} received)",
        record.total_txs, record.num_txs_as_sender, record.num_txs_as_receiver
    );
    println!("  btc transacted:  {:.8}", record.btc_transacted_total);
    println!(
        "  active blocks:   {} - {}",
        record.first_block_appeared_in, record.last_block_appeared_in
    );
    if let Some(updated) = chrono::DateTime::from_timestamp(record.last_updated, 0) {
        println!("  last updated:    {}", updated.to_rfc3339());
    }
}

fn print_graph(graph: &DirectedGraph) {
    println!("Nodes ({}):", graph.node_count());
    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by_key(|(address, _)| address.to_string());
    for (address, attrs) in nodes {
        println!("  {} [{}]", address, attrs.color.as_str());
    }

    println!("Edges ({}):", graph.edge_count());
    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort_by_key(|(s, t, _)| (s.to_string(), t.to_string()));
    for (source, target, attrs) in edges {
        let kind = match attrs.kind {
            EdgeKind::Straight => "->",
            EdgeKind::Curved => "~>",
        };
        if attrs.label.is_empty() {
            println!("  {source} {kind} {target}");
        } else {
            println!("  {source} {kind} {target} ({})", attrs.label);
        }
    }
}
