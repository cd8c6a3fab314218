//! Client configuration.

use crate::error::{Error, Result};
use battle_engine::Address;
use serde::Deserialize;

/// Configuration for the battle client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    /// ERC-721 contract that also runs battles.
    #[serde(default)]
    pub nft_contract: String,

    /// ERC-20 reward token.
    #[serde(default)]
    pub token_contract: String,

    #[serde(default = "defaults::ipfs_gateway")]
    pub ipfs_gateway: String,

    /// How far back the battle feed scans for events.
    #[serde(default = "defaults::lookback_blocks")]
    pub lookback_blocks: u64,

    #[serde(default = "defaults::mint_price_wei")]
    pub mint_price_wei: u128,

    #[serde(default = "defaults::reward_places")]
    pub reward_places: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            nft_contract: String::new(),
            token_contract: String::new(),
            ipfs_gateway: defaults::ipfs_gateway(),
            lookback_blocks: defaults::lookback_blocks(),
            mint_price_wei: defaults::mint_price_wei(),
            reward_places: defaults::reward_places(),
        }
    }
}

impl Config {
    /// Load from an optional `clash.toml` plus `CLASH_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("clash")
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(false))
            .add_source(::config::Environment::with_prefix("CLASH").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn nft_contract_address(&self) -> Result<Address> {
        parse_contract("nft_contract", &self.nft_contract)
    }

    pub fn token_contract_address(&self) -> Result<Address> {
        parse_contract("token_contract", &self.token_contract)
    }
}

fn parse_contract(field: &str, raw: &str) -> Result<Address> {
    if raw.is_empty() {
        return Err(Error::Config(format!("{field} is not set")));
    }
    raw.parse()
        .map_err(|e| Error::Config(format!("{field}: {e}")))
}

mod defaults {
    pub fn rpc_url() -> String {
        "http://127.0.0.1:8545".into()
    }

    pub fn ipfs_gateway() -> String {
        "http://127.0.0.1:8080".into()
    }

    pub fn lookback_blocks() -> u64 {
        20_000
    }

    /// 0.05 ether.
    pub fn mint_price_wei() -> u128 {
        50_000_000_000_000_000
    }

    pub fn reward_places() -> usize {
        battle_engine::ranking::REWARD_PLACES
    }
}
