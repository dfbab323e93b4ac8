//! Demonstration command: grow a chain by two blocks, printing each step.

use crate::print::print_chain;
use anyhow::{Context, Result};
use colored::Colorize;
use merklechain_chain::Blockchain;
use merklechain_core::Amount;
use tracing::info;

pub fn run() -> Result<()> {
    let mut blockchain = Blockchain::new().context("Failed to create genesis block")?;
    info!("genesis block created");
    print_chain(&blockchain)?;

    let transfers = [("A", "B", "1.0"), ("C", "D", "2.0")];
    for (sender, recipient, value) in transfers {
        let value: Amount = value.parse()?;
        blockchain.add_transaction(sender, recipient, value);

        let block = blockchain
            .create_block()
            .context("Failed to create block")?;
        info!(txs = block.tx_count(), "block created");

        print_chain(&blockchain)?;
    }

    blockchain.verify().context("Chain verification failed")?;
    println!("{}  Chain verified", "✓".green().bold());

    Ok(())
}
