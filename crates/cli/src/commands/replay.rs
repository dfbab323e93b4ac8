//! Replay command: build a chain from a JSON script.
//!
//! ```json
//! {
//!   "clock": { "start": 1700000000000000000, "step": 1000000000 },
//!   "blocks": [
//!     [{ "sender": "A", "recipient": "B", "value": "1.0" }],
//!     [{ "sender": "C", "recipient": "D", "value": 2.5 }]
//!   ]
//! }
//! ```
//!
//! With a `clock` section every timestamp is fixed, so the printed hashes
//! are the same on every run.

use crate::print::print_chain;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use merklechain_chain::{Blockchain, BlockchainConfig};
use merklechain_core::{Amount, Block, SteppingClock, Transaction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Args)]
pub struct ReplayArgs {
    /// Path to the JSON script
    file: PathBuf,

    /// Print the chain as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    #[serde(default)]
    clock: Option<ClockSpec>,
    blocks: Vec<Vec<TransferSpec>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockSpec {
    start: i64,
    #[serde(default = "default_step")]
    step: i64,
}

fn default_step() -> i64 {
    1_000_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransferSpec {
    sender: String,
    recipient: String,
    value: ValueSpec,
}

/// Amounts may be written as decimal text (exact) or as JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValueSpec {
    Text(String),
    Number(f64),
}

impl ValueSpec {
    fn to_amount(&self) -> Result<Amount> {
        let amount = match self {
            ValueSpec::Text(text) => text.parse::<Amount>()?,
            ValueSpec::Number(number) => Amount::from_f64(*number)?,
        };
        Ok(amount)
    }
}

#[derive(Debug, Serialize)]
struct BlockReport<'a> {
    height: usize,
    hash: String,
    previous_hash: String,
    merkle_root: String,
    timestamp: i64,
    transactions: Vec<TransactionReport<'a>>,
}

#[derive(Debug, Serialize)]
struct TransactionReport<'a> {
    hash: String,
    sender: &'a str,
    recipient: &'a str,
    value: String,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let script = load_script(&args.file)?;
    let blockchain = build_chain(&script)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report(&blockchain)?)?);
    } else {
        print_chain(&blockchain)?;
    }

    blockchain.verify().context("Chain verification failed")?;
    if !args.json {
        println!(
            "{}  Replayed {} blocks",
            "✓".green().bold(),
            script.blocks.len()
        );
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<Script> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid script: {}", path.display()))
}

fn build_chain(script: &Script) -> Result<Blockchain> {
    let config = match &script.clock {
        Some(clock) => BlockchainConfig::with_clock(SteppingClock::new(clock.start, clock.step)),
        None => BlockchainConfig::default(),
    };
    let mut blockchain = Blockchain::with_config(config)?;

    for (index, transfers) in script.blocks.iter().enumerate() {
        for transfer in transfers {
            let value = transfer
                .value
                .to_amount()
                .with_context(|| format!("Invalid value in block {}", index + 1))?;
            blockchain.submit_transaction(Transaction::new(
                transfer.sender.as_str(),
                transfer.recipient.as_str(),
                value,
            ));
        }
        let block = blockchain.create_block()?;
        debug!(txs = block.tx_count(), "replayed block");
    }

    info!(blocks = blockchain.len(), "replay finished");
    Ok(blockchain)
}

fn report(blockchain: &Blockchain) -> Result<Vec<BlockReport<'_>>> {
    blockchain
        .blocks()
        .iter()
        .enumerate()
        .map(|(height, block)| block_report(height, block))
        .collect()
}

fn block_report(height: usize, block: &Block) -> Result<BlockReport<'_>> {
    let transactions = block
        .transactions()
        .iter()
        .map(|tx| -> Result<TransactionReport<'_>> {
            Ok(TransactionReport {
                hash: tx.hash()?.to_hex(),
                sender: &tx.sender,
                recipient: &tx.recipient,
                value: tx.value.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BlockReport {
        height,
        hash: block.hash()?.to_hex(),
        previous_hash: block.previous_hash().to_hex(),
        merkle_root: block.merkle_root().to_hex(),
        timestamp: block.timestamp(),
        transactions,
    })
}
