//! Human-readable rendering of transactions, blocks and chains.

use chrono::{DateTime, SecondsFormat};
use colored::Colorize;
use merklechain_chain::Blockchain;
use merklechain_core::{Block, EncodingError, Transaction};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Nanosecond timestamp as RFC 3339, or `out of range` for unrepresentable values.
pub fn format_timestamp(nanos: i64) -> String {
    let secs = nanos.div_euclid(NANOS_PER_SEC);
    let subsec = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::from_timestamp(secs, subsec)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .unwrap_or_else(|| "out of range".to_string())
}

pub fn render_transaction(tx: &Transaction) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", "-".repeat(40).bright_black()));
    out.push_str(&format!("  Sender:        {}\n", tx.sender.bright_cyan()));
    out.push_str(&format!("  Recipient:     {}\n", tx.recipient.bright_cyan()));
    out.push_str(&format!(
        "  Value:         {}\n",
        tx.value.to_string().bright_yellow()
    ));
    out
}

pub fn render_block(height: usize, block: &Block) -> Result<String, EncodingError> {
    let mut out = String::new();
    let banner = "=".repeat(25);

    out.push_str(&format!(
        "{} {} {}\n",
        banner,
        format!("Block {height}").bold().cyan(),
        banner
    ));
    out.push_str(&format!(
        "  Hash:          {}\n",
        block.hash()?.to_string().bright_yellow()
    ));
    out.push_str(&format!(
        "  Timestamp:     {} {}\n",
        block.timestamp(),
        format!("({})", format_timestamp(block.timestamp())).bright_black()
    ));
    out.push_str(&format!(
        "  Previous Hash: {}\n",
        block.previous_hash().to_string().bright_black()
    ));
    out.push_str(&format!(
        "  Merkle Root:   {}\n",
        block.merkle_root().to_string().bright_black()
    ));
    out.push_str(&format!(
        "  Transactions:  {}\n",
        block.tx_count().to_string().bright_cyan()
    ));

    for tx in block.transactions() {
        out.push_str(&render_transaction(tx));
    }

    Ok(out)
}

pub fn render_chain(blockchain: &Blockchain) -> Result<String, EncodingError> {
    let mut out = String::new();

    for (height, block) in blockchain.blocks().iter().enumerate() {
        out.push_str(&render_block(height, block)?);
    }
    out.push_str(&format!("{}\n", "*".repeat(25)));

    Ok(out)
}

pub fn print_chain(blockchain: &Blockchain) -> Result<(), EncodingError> {
    print!("{}", render_chain(blockchain)?);
    Ok(())
}
