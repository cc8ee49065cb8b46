use std::str::FromStr;

use crate::apy::{
    calculate_apy_from_price_history, decimal_to_f64, signed_decimal_to_f64, ApyContext,
    ApyParams, ApyValue, PriceHistories,
};
use crate::error::{ContractError, ContractResult};
use crate::external_types::{
    LstApyResponse, QueryMsgLstOracle, QueryMsgYieldOracle, VaultAprResponse,
};
use crate::msg::{LatestApyResponse, LatestApysResponse, VaultApy, VersionApys};
use crate::state::{
    Config, PriceSample, UnderlyingYield, VaultConfig, CONFIG, PRICE_HISTORY, VAULTS,
};
use crate::vaults::{VaultOption, VaultVersion};
use cosmwasm_std::{Deps, Env, Order, SignedDecimal};

pub fn query_vault(deps: Deps, vault_option: VaultOption) -> ContractResult<VaultConfig> {
    VAULTS
        .may_load(deps.storage, vault_option.as_str())?
        .ok_or_else(|| ContractError::VaultNotFound {
            vault: vault_option.to_string(),
        })
}

/// Samples of one vault, sorted by timestamp.
pub fn query_price_history(
    deps: Deps,
    version: VaultVersion,
    vault_option: VaultOption,
) -> ContractResult<Vec<PriceSample>> {
    PRICE_HISTORY
        .prefix((version.as_str(), vault_option.as_str()))
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            item.map(|(timestamp, price_per_share)| PriceSample {
                timestamp,
                price_per_share,
            })
            .map_err(ContractError::Std)
        })
        .collect()
}

fn load_vaults(deps: Deps) -> ContractResult<Vec<VaultConfig>> {
    VAULTS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, vault)| vault).map_err(ContractError::Std))
        .collect()
}

/// Yield of the asset wrapped by the vault, as a percentage.
pub fn query_underlying_yield_apr(
    deps: Deps,
    config: &Config,
    vault: Option<&VaultConfig>,
) -> ContractResult<f64> {
    let rate = match vault.and_then(|vault| vault.underlying_yield.as_ref()) {
        None => return Ok(0.0),
        Some(UnderlyingYield::WrappedVault { symbol, version }) => {
            let oracle = config.wrapped_yield_oracle.as_ref().ok_or_else(|| {
                ContractError::OracleNotConfigured {
                    kind: "wrapped yield".to_string(),
                }
            })?;
            let response: VaultAprResponse = deps
                .querier
                .query_wasm_smart(
                    oracle,
                    &QueryMsgYieldOracle::GetVaultApr {
                        symbol: symbol.clone(),
                        version: version.clone(),
                    },
                )
                .map_err(|e| ContractError::OracleError {
                    msg: format!("Failed to query wrapped yield oracle: {}", e),
                })?;
            response.apr
        }
        Some(UnderlyingYield::LiquidStaking {}) => {
            let oracle = config.lst_oracle.as_ref().ok_or_else(|| {
                ContractError::OracleNotConfigured {
                    kind: "liquid staking".to_string(),
                }
            })?;
            let response: LstApyResponse = deps
                .querier
                .query_wasm_smart(oracle, &QueryMsgLstOracle::GetApy {})
                .map_err(|e| ContractError::OracleError {
                    msg: format!("Failed to query liquid staking oracle: {}", e),
                })?;
            response.apy
        }
    };

    Ok(decimal_to_f64(rate)? * 100.0)
}

pub fn query_latest_apy(
    deps: Deps,
    env: Env,
    version: VaultVersion,
    vault_option: VaultOption,
) -> ContractResult<LatestApyResponse> {
    let config = CONFIG.load(deps.storage)?;
    let vaults = load_vaults(deps)?;
    let context = ApyContext {
        now: env.block.time,
        vaults: &vaults,
        overrides: &config.overrides,
        loading: config.history_loading,
    };

    let samples = query_price_history(deps, version, vault_option)?;
    let apy = context.latest_apy(vault_option, version, &samples, |vault_option| {
        query_underlying_yield_apr(deps, &config, context.vault(vault_option))
    })?;

    Ok(LatestApyResponse {
        fetched: !config.history_loading,
        apy: apy_value_to_decimal(apy)?,
    })
}

pub fn query_latest_apys(deps: Deps, env: Env) -> ContractResult<LatestApysResponse> {
    let config = CONFIG.load(deps.storage)?;
    let vaults = load_vaults(deps)?;
    let context = ApyContext {
        now: env.block.time,
        vaults: &vaults,
        overrides: &config.overrides,
        loading: config.history_loading,
    };

    let mut histories = PriceHistories::new();
    if !config.history_loading {
        for version in VaultVersion::ALL {
            for vault_option in VaultOption::ALL {
                let samples = query_price_history(deps, version, vault_option)?;
                histories.insert((version, vault_option), samples);
            }
        }
    }

    let mut table = context.all_apys(&histories, |vault_option| {
        query_underlying_yield_apr(deps, &config, context.vault(vault_option))
    });

    let mut versions = Vec::with_capacity(VaultVersion::ALL.len());
    for version in VaultVersion::ALL {
        let mut apys = Vec::with_capacity(VaultOption::ALL.len());
        for vault_option in VaultOption::ALL {
            let apy = table
                .get_mut(&version)
                .and_then(|vaults| vaults.remove(&vault_option))
                .unwrap_or(Ok(ApyValue::Calculated(0.0)))
                .and_then(apy_value_to_decimal);
            apys.push(match apy {
                Ok(apy) => VaultApy {
                    vault_option,
                    apy,
                    error: None,
                },
                Err(err) => VaultApy {
                    vault_option,
                    apy: SignedDecimal::zero(),
                    error: Some(err.to_string()),
                },
            });
        }
        versions.push(VersionApys {
            version,
            vaults: apys,
        });
    }

    Ok(LatestApysResponse {
        fetched: !config.history_loading,
        versions,
    })
}

/// Runs the calculation on caller supplied samples. Overrides are not applied.
pub fn query_calculate_apy(
    deps: Deps,
    env: Env,
    samples: Vec<PriceSample>,
    decimals: u32,
    vault_option: VaultOption,
    version: VaultVersion,
    underlying_yield_apr: SignedDecimal,
) -> ContractResult<SignedDecimal> {
    let vault = VAULTS.may_load(deps.storage, vault_option.as_str())?;
    let params = ApyParams {
        vault_option,
        version,
        decimals,
        fees: vault
            .as_ref()
            .and_then(|vault| vault.fees.for_version(version)),
        underlying_yield_apr: signed_decimal_to_f64(underlying_yield_apr)?,
    };

    apy_to_decimal(calculate_apy_from_price_history(
        &samples,
        env.block.time,
        &params,
    )?)
}

fn apy_value_to_decimal(apy: ApyValue) -> ContractResult<SignedDecimal> {
    match apy {
        ApyValue::Fixed(apy) => Ok(apy),
        ApyValue::Calculated(apy) => apy_to_decimal(apy),
    }
}

pub fn apy_to_decimal(apy: f64) -> ContractResult<SignedDecimal> {
    let out_of_range = || ContractError::ApyOutOfRange {
        value: apy.to_string(),
    };
    if !apy.is_finite() {
        return Err(out_of_range());
    }
    SignedDecimal::from_str(&format!("{apy:.18}")).map_err(|_| out_of_range())
}
