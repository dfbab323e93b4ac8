//! CLI commands module.

use anyhow::Result;
use clap::Subcommand;

mod demo;
mod hash;
mod replay;

#[derive(Subcommand)]
pub enum Commands {
    /// Build a small chain step by step and print it
    Demo,
    /// Build a chain from a JSON script and verify it
    Replay(replay::ReplayArgs),
    /// Show the canonical encoding and hash of a transaction
    HashTx(hash::HashTxArgs),
    /// Compute the merkle root of hex leaf hashes
    MerkleRoot(hash::MerkleRootArgs),
}

pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Demo => demo::run(),
        Commands::Replay(args) => replay::run(args),
        Commands::HashTx(args) => hash::run_hash_tx(args),
        Commands::MerkleRoot(args) => hash::run_merkle_root(args),
    }
}
