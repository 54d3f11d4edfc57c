//! CLI argument definitions using clap.

use std::str::FromStr;

use alloy_chains::NamedChain;
use clap::{Parser, Subcommand, ValueEnum};

/// Realloc CLI - plan public-allocator reallocations
#[derive(Parser, Debug)]
#[command(name = "realloc")]
#[command(about = "CLI tool for planning public-allocator reallocations", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show pullable capacity toward a target market
    Capacity(CapacityArgs),
    /// Build a reallocation transaction plan
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// Target market id (bytes32 hex)
    #[arg(long)]
    pub market: String,

    /// Candidate vault address (repeat for multiple vaults)
    #[arg(long = "vault", required = true)]
    pub vaults: Vec<String>,

    /// Chain the market is on (default: ethereum)
    #[arg(long, default_value = "ethereum")]
    pub chain: ChainArg,

    /// Custom indexed API URL
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Target market id (bytes32 hex)
    #[arg(long)]
    pub market: String,

    /// Extra liquidity to deliver, in loan token base units
    #[arg(long)]
    pub amount: String,

    /// Candidate vault address (repeat for multiple vaults)
    #[arg(long = "vault", required = true)]
    pub vaults: Vec<String>,

    /// Chain the market is on (default: ethereum)
    #[arg(long, default_value = "ethereum")]
    pub chain: ChainArg,

    /// Custom indexed API URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Re-check the plan against on-chain state before printing it
    #[arg(long)]
    pub verify: bool,

    /// RPC URL for --verify (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Wrapper for NamedChain that implements FromStr with aliases
#[derive(Clone, Copy, Debug)]
pub struct ChainArg(pub NamedChain);

impl FromStr for ChainArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chain = match s.to_lowercase().as_str() {
            "ethereum" | "eth" | "mainnet" | "1" => NamedChain::Mainnet,
            "base" | "8453" => NamedChain::Base,
            other => other
                .parse::<NamedChain>()
                .map_err(|_| format!("Unknown chain: {}", s))?,
        };
        Ok(ChainArg(chain))
    }
}

impl std::fmt::Display for ChainArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
