//! Hashing utilities: transaction hashes and merkle roots.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use merklechain_core::{Amount, CanonicalEncode, Hash, MerkleTree, Side, Transaction};

#[derive(Args)]
pub struct HashTxArgs {
    /// Sender identifier
    #[arg(short, long)]
    sender: String,

    /// Recipient identifier
    #[arg(short, long)]
    recipient: String,

    /// Amount as a decimal (up to 6 places)
    #[arg(short, long, allow_hyphen_values = true)]
    value: Amount,
}

#[derive(Args)]
pub struct MerkleRootArgs {
    /// Leaf hashes in order (64 hex chars, optional 0x prefix)
    leaves: Vec<Hash>,

    /// Also print the inclusion proof for the leaf at this index
    #[arg(short, long)]
    proof: Option<usize>,
}

pub fn run_hash_tx(args: HashTxArgs) -> Result<()> {
    let tx = Transaction::new(args.sender, args.recipient, args.value);
    let encoded = tx.encode()?;

    println!();
    println!("  Encoding: {}", hex::encode(&encoded).bright_black());
    println!("  Hash:     {}", tx.hash()?.to_string().bright_yellow());
    println!();

    Ok(())
}

pub fn run_merkle_root(args: MerkleRootArgs) -> Result<()> {
    let tree = MerkleTree::new(&args.leaves);

    println!();
    println!(
        "  Leaves: {}",
        tree.leaf_count().to_string().bright_cyan()
    );
    println!("  Root:   {}", tree.root().to_string().bright_yellow());

    if let Some(index) = args.proof {
        let Some(proof) = tree.proof(index) else {
            bail!(
                "Leaf index {} out of range ({} leaves)",
                index,
                tree.leaf_count()
            );
        };

        println!();
        println!("{}", format!("Proof for leaf {index}:").bold());
        for (level, step) in proof.path.iter().enumerate() {
            let side = match step.side {
                Side::Left => "left ",
                Side::Right => "right",
            };
            println!(
                "  {} {} {}",
                format!("{level}.").bright_black(),
                side,
                step.sibling.to_string().bright_black()
            );
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        hash_tx: HashTxArgs,
    }

    #[derive(Parser)]
    struct TestRootCli {
        #[command(flatten)]
        merkle: MerkleRootArgs,
    }

    #[test]
    fn test_hash_tx_args_parse_amount() {
        let cli = TestCli::try_parse_from(["t", "-s", "A", "-r", "B", "-v", "-1.5"]).unwrap();
        assert_eq!(cli.hash_tx.value, "-1.5".parse::<Amount>().unwrap());
        assert!(run_hash_tx(cli.hash_tx).is_ok());
    }

    #[test]
    fn test_hash_tx_args_reject_bad_amount() {
        assert!(TestCli::try_parse_from(["t", "-s", "A", "-r", "B", "-v", "abc"]).is_err());
    }

    #[test]
    fn test_merkle_root_args() {
        let leaf = merklechain_core::hash(b"leaf");
        let hex = leaf.to_string();
        let cli = TestRootCli::try_parse_from(["t", hex.as_str(), hex.as_str(), "--proof", "1"])
            .unwrap();

        assert_eq!(cli.merkle.leaves, vec![leaf, leaf]);
        assert!(run_merkle_root(cli.merkle).is_ok());
    }

    #[test]
    fn test_merkle_root_proof_out_of_range() {
        let leaf = merklechain_core::hash(b"leaf").to_hex();
        let cli = TestRootCli::try_parse_from(["t", leaf.as_str(), "--proof", "3"]).unwrap();
        assert!(run_merkle_root(cli.merkle).is_err());
    }
}
