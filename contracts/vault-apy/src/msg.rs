use std::collections::HashSet;

use crate::error::{ContractError, ContractResult};
use crate::state::{ApyOverride, Config, PriceSample, UnderlyingYield, VaultConfig};
use crate::vaults::{VaultOption, VaultVersion};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, SignedDecimal};
use cw_ownable::cw_ownable_execute;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// Address allowed to feed price history besides the owner
    pub updater: String,
    pub wrapped_yield_oracle: Option<String>,
    pub lst_oracle: Option<String>,
    pub vaults: Vec<VaultConfig>,
    pub overrides: Vec<ApyOverride>,
}

impl InstantiateMsg {
    pub fn validate(&self) -> ContractResult<()> {
        check_empty(&self.owner, "owner")?;
        check_empty(&self.updater, "updater")?;

        let mut seen = HashSet::new();
        for vault in &self.vaults {
            if !seen.insert(vault.vault_option) {
                return Err(ContractError::InvalidConfig {
                    reason: format!("vault {} is configured twice", vault.vault_option),
                });
            }
            validate_vault(vault)?;
        }

        validate_overrides(&self.overrides)
    }
}

pub fn validate_vault(vault: &VaultConfig) -> ContractResult<()> {
    let hundred = Decimal::from_ratio(100u128, 1u128);
    for version in VaultVersion::ALL {
        let Some(fees) = vault.fees.for_version(version) else {
            continue;
        };
        for (kind, fee) in fees.fees() {
            if fee.is_some_and(|fee| fee > hundred) {
                return Err(ContractError::InvalidConfig {
                    reason: format!(
                        "{kind} fee of {} {version} must be between 0 and 100",
                        vault.vault_option
                    ),
                });
            }
        }
    }

    if let Some(fees) = &vault.fees.v2 {
        if fees.management_fee.is_none() || fees.performance_fee.is_none() {
            return Err(ContractError::InvalidConfig {
                reason: format!(
                    "v2 fees of {} need a management and a performance fee",
                    vault.vault_option
                ),
            });
        }
    }

    if let Some(UnderlyingYield::WrappedVault { symbol, version }) = &vault.underlying_yield {
        check_empty(symbol, "wrapped vault symbol")?;
        check_empty(version, "wrapped vault version")?;
    }
    Ok(())
}

pub fn validate_overrides(overrides: &[ApyOverride]) -> ContractResult<()> {
    let mut seen = HashSet::new();
    for o in overrides {
        if !seen.insert((o.vault_option, o.version)) {
            return Err(ContractError::InvalidConfig {
                reason: format!("apy of {} {} is overridden twice", o.vault_option, o.version),
            });
        }
    }
    Ok(())
}

pub fn check_empty(input: &str, kind: &str) -> ContractResult<()> {
    if input.is_empty() {
        return Err(ContractError::EmptyValue {
            kind: kind.to_string(),
        });
    }
    Ok(())
}

#[cw_serde]
pub enum OracleUpdate {
    Set { address: String },
    /// vaults relying on this oracle fail until a new one is set
    Clear {},
}

/// Fields left as `None` keep their current value.
#[cw_serde]
pub struct UpdateConfig {
    pub updater: Option<String>,
    pub wrapped_yield_oracle: Option<OracleUpdate>,
    pub lst_oracle: Option<OracleUpdate>,
    /// Replaces the whole override table
    pub overrides: Option<Vec<ApyOverride>>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Update the contract configuration (owner-only)
    UpdateConfig { new_config: UpdateConfig },
    /// Insert or replace the configuration of one vault (owner-only)
    SetVault { vault: VaultConfig },
    /// Merge samples into the price history of a vault
    RecordPriceHistory {
        version: VaultVersion,
        vault_option: VaultOption,
        samples: Vec<PriceSample>,
    },
    ClearPriceHistory {
        version: VaultVersion,
        vault_option: VaultOption,
    },
    /// While set, every APY reads as 0
    SetHistoryLoading { loading: bool },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    GetConfig {},
    #[returns(VaultConfig)]
    GetVault { vault_option: VaultOption },
    #[returns(Vec<PriceSample>)]
    GetPriceHistory {
        version: VaultVersion,
        vault_option: VaultOption,
    },
    /// APY of one vault from its stored history
    #[returns(LatestApyResponse)]
    GetLatestApy {
        version: VaultVersion,
        vault_option: VaultOption,
    },
    /// APY of every vault under every version
    #[returns(LatestApysResponse)]
    GetLatestApys {},
    /// APY of the given samples, using the stored fee schedule of the vault
    #[returns(SignedDecimal)]
    CalculateApy {
        samples: Vec<PriceSample>,
        decimals: u32,
        vault_option: VaultOption,
        version: VaultVersion,
        /// percentage
        underlying_yield_apr: SignedDecimal,
    },
}

#[cw_serde]
pub struct LatestApyResponse {
    /// false while the price history is loading
    pub fetched: bool,
    /// percentage
    pub apy: SignedDecimal,
}

#[cw_serde]
pub struct VaultApy {
    pub vault_option: VaultOption,
    /// 0 when `error` is set
    pub apy: SignedDecimal,
    pub error: Option<String>,
}

#[cw_serde]
pub struct VersionApys {
    pub version: VaultVersion,
    pub vaults: Vec<VaultApy>,
}

#[cw_serde]
pub struct LatestApysResponse {
    pub fetched: bool,
    pub versions: Vec<VersionApys>,
}

#[cw_serde]
pub struct MigrateMsg {}
