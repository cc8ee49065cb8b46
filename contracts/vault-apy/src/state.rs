use cosmwasm_std::{Addr, Decimal, SignedDecimal, Uint256};
use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::vaults::{VaultOption, VaultVersion};

/// A single price-per-share observation of a vault.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct PriceSample {
    /// unix seconds
    pub timestamp: u64,
    /// scaled by the decimals of the vault asset
    pub price_per_share: Uint256,
}

/// Fee percentages, "2" means 2%.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct FeeSchedule {
    /// annual fee on assets under management
    pub management_fee: Option<Decimal>,
    /// fee on the gains of a period
    pub performance_fee: Option<Decimal>,
    pub withdrawal_fee: Option<Decimal>,
}

impl FeeSchedule {
    pub fn fees(&self) -> [(&'static str, Option<Decimal>); 3] {
        [
            ("management", self.management_fee),
            ("performance", self.performance_fee),
            ("withdrawal", self.withdrawal_fee),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct VaultFees {
    pub v1: Option<FeeSchedule>,
    pub v2: Option<FeeSchedule>,
}

impl VaultFees {
    pub fn for_version(&self, version: VaultVersion) -> Option<&FeeSchedule> {
        match version {
            VaultVersion::V1 => self.v1.as_ref(),
            VaultVersion::V2 => self.v2.as_ref(),
        }
    }
}

/// Where the yield of the asset wrapped by a vault comes from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnderlyingYield {
    /// APR of a yield-bearing vault token, e.g. yvUSDC 0.3.0
    WrappedVault { symbol: String, version: String },
    /// global liquid staking APY
    LiquidStaking {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct VaultConfig {
    pub vault_option: VaultOption,
    pub fees: VaultFees,
    pub underlying_yield: Option<UnderlyingYield>,
}

/// Fixed APY reported instead of running the calculation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ApyOverride {
    pub vault_option: VaultOption,
    pub version: VaultVersion,
    /// percentage
    pub apy: SignedDecimal,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// allowed to feed price history besides the owner
    pub updater: Addr,
    pub wrapped_yield_oracle: Option<Addr>,
    pub lst_oracle: Option<Addr>,
    /// set while a price history sync is in progress, every APY reads as 0
    pub history_loading: bool,
    pub overrides: Vec<ApyOverride>,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// vault option -> vault configuration
pub const VAULTS: Map<&str, VaultConfig> = Map::new("vaults");
/// (version, vault option, timestamp) -> price per share
pub const PRICE_HISTORY: Map<(&str, &str, u64), Uint256> = Map::new("price_history");
