use std::collections::BTreeMap;

use cosmwasm_std::{Decimal, Decimal256, SignedDecimal, Timestamp, Uint256};

use crate::error::{ContractError, ContractResult};
use crate::state::{ApyOverride, FeeSchedule, PriceSample, VaultConfig};
use crate::vaults::{VaultOption, VaultVersion};

pub const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;
pub const WEEKS_PER_YEAR: i32 = 52;
/// 1970-01-02 10:00:00 UTC, the first Friday of the unix epoch
const FIRST_PERIOD_START: u64 = 24 * 60 * 60 + 10 * 60 * 60;

/// version -> vault option -> APY of that entry
pub type ApyTable = BTreeMap<VaultVersion, BTreeMap<VaultOption, ContractResult<ApyValue>>>;
pub type PriceHistories = BTreeMap<(VaultVersion, VaultOption), Vec<PriceSample>>;

/// Start of the latest period: the most recent Friday 10:00 UTC that is not after `now`.
pub fn current_period_start(now: Timestamp) -> Timestamp {
    let now = now.seconds();
    let into_period = now.saturating_sub(FIRST_PERIOD_START) % SECONDS_PER_WEEK;
    Timestamp::from_seconds(now - into_period)
}

/// Picks the samples delimiting the period that starts at `period_start`.
///
/// Returns the first sample of the period and the first sample of the next
/// period. When either of the two periods is empty, the first two samples found
/// across both are used instead. `None` means fewer than two samples are
/// available.
///
/// `samples` must be sorted by timestamp.
pub fn price_window(
    samples: &[PriceSample],
    period_start: u64,
) -> Option<(&PriceSample, &PriceSample)> {
    let period_end = period_start.saturating_add(SECONDS_PER_WEEK);
    let next_period_end = period_end.saturating_add(SECONDS_PER_WEEK);
    let first_at = |from: u64| samples.partition_point(|sample| sample.timestamp < from);

    let (start, middle, end) = (
        first_at(period_start),
        first_at(period_end),
        first_at(next_period_end),
    );
    if start < middle && middle < end {
        return Some((&samples[start], &samples[middle]));
    }

    match &samples[start..end] {
        [first, second, ..] => Some((first, second)),
        _ => None,
    }
}

/// Compounds a weekly return over a year, as a percentage.
pub fn annualize(weekly_return: f64) -> f64 {
    ((1.0 + weekly_return).powi(WEEKS_PER_YEAR) - 1.0) * 100.0
}

pub fn price_to_f64(price_per_share: Uint256, decimals: u32) -> ContractResult<f64> {
    Decimal256::from_atomics(price_per_share, decimals)
        .map_err(|_| ContractError::DecimalConversionError)?
        .to_string()
        .parse::<f64>()
        .map_err(|_| ContractError::DecimalConversionError)
}

pub fn decimal_to_f64(value: Decimal) -> ContractResult<f64> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|_| ContractError::DecimalConversionError)
}

pub fn signed_decimal_to_f64(value: SignedDecimal) -> ContractResult<f64> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|_| ContractError::DecimalConversionError)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApyParams<'a> {
    pub vault_option: VaultOption,
    pub version: VaultVersion,
    pub decimals: u32,
    pub fees: Option<&'a FeeSchedule>,
    /// percentage earned by the wrapped asset, 0 when there is none
    pub underlying_yield_apr: f64,
}

/// Annualized yield of a vault from its price history.
///
/// Walks back from the current period until it finds one where the price per
/// share grew. Periods where it did not were exercised and say nothing about
/// the steady state yield of the vault.
///
/// Fees and the underlying yield are only applied when the current period is
/// used. An older period already has them priced in.
///
/// Returns 0 when the history runs out before a profitable period is found.
pub fn calculate_apy_from_price_history(
    samples: &[PriceSample],
    now: Timestamp,
    params: &ApyParams,
) -> ContractResult<f64> {
    let mut history = samples.to_vec();
    history.sort_by_key(|sample| sample.timestamp);

    let Some(earliest) = history.first().map(|sample| sample.timestamp) else {
        return Ok(0.0);
    };

    let mut period_start = current_period_start(now).seconds();
    let mut current_week = true;

    loop {
        let Some((start, end)) = price_window(&history, period_start) else {
            return Ok(0.0);
        };

        let starting_price = price_to_f64(start.price_per_share, params.decimals)?;
        let ending_price = price_to_f64(end.price_per_share, params.decimals)?;

        if ending_price > starting_price {
            if starting_price == 0.0 {
                return Err(ContractError::ZeroStartingPrice {
                    timestamp: start.timestamp,
                });
            }

            let weekly_return = (ending_price - starting_price) / starting_price;
            if !current_week {
                return Ok(annualize(weekly_return));
            }

            return match params.version {
                VaultVersion::V1 => Ok(annualize(weekly_return) + params.underlying_yield_apr),
                VaultVersion::V2 => {
                    let price_after_fees = price_after_fees(starting_price, ending_price, params)?;
                    let weekly_return = (price_after_fees - starting_price) / starting_price;
                    Ok(annualize(weekly_return) + params.underlying_yield_apr)
                }
            };
        }

        // exercised, retry with the previous week
        period_start = match period_start.checked_sub(SECONDS_PER_WEEK) {
            Some(previous) if previous.saturating_add(2 * SECONDS_PER_WEEK) > earliest => previous,
            _ => return Ok(0.0),
        };
        current_week = false;
    }
}

/// Ending price per share once a week of management fee and the performance
/// fee on the period gains are charged.
fn price_after_fees(
    starting_price: f64,
    ending_price: f64,
    params: &ApyParams,
) -> ContractResult<f64> {
    let management_fee = decimal_to_f64(required_fee(params, "management", |fees| {
        fees.management_fee
    })?)?;
    let performance_fee = decimal_to_f64(required_fee(params, "performance", |fees| {
        fees.performance_fee
    })?)?;

    let ending_after_management_fee =
        ending_price * (1.0 - management_fee / 100.0 / f64::from(WEEKS_PER_YEAR));
    let performance_fee_impact = (ending_price - starting_price) * (performance_fee / 100.0);

    Ok(ending_after_management_fee - performance_fee_impact)
}

fn required_fee(
    params: &ApyParams,
    kind: &str,
    fee: impl Fn(&FeeSchedule) -> Option<Decimal>,
) -> ContractResult<Decimal> {
    params
        .fees
        .and_then(fee)
        .ok_or_else(|| ContractError::MissingFee {
            vault: params.vault_option.to_string(),
            version: params.version.to_string(),
            kind: kind.to_string(),
        })
}

/// APY of one vault, as a percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ApyValue {
    /// configured override, reported exactly as stored
    Fixed(SignedDecimal),
    Calculated(f64),
}

impl ApyValue {
    pub fn to_f64(self) -> ContractResult<f64> {
        match self {
            ApyValue::Fixed(apy) => signed_decimal_to_f64(apy),
            ApyValue::Calculated(apy) => Ok(apy),
        }
    }
}

/// Vault tables every APY is resolved against.
#[derive(Clone, Debug)]
pub struct ApyContext<'a> {
    pub now: Timestamp,
    pub vaults: &'a [VaultConfig],
    pub overrides: &'a [ApyOverride],
    /// price history is still being synced
    pub loading: bool,
}

impl<'a> ApyContext<'a> {
    pub fn vault(&self, vault_option: VaultOption) -> Option<&'a VaultConfig> {
        self.vaults
            .iter()
            .find(|vault| vault.vault_option == vault_option)
    }

    pub fn apy_override(
        &self,
        vault_option: VaultOption,
        version: VaultVersion,
    ) -> Option<SignedDecimal> {
        self.overrides
            .iter()
            .find(|o| o.vault_option == vault_option && o.version == version)
            .map(|o| o.apy)
    }

    /// APY of a single vault.
    ///
    /// `underlying_yield_apr` is only called when the calculation actually runs,
    /// so overridden vaults and a loading history never hit the oracles.
    pub fn latest_apy<F>(
        &self,
        vault_option: VaultOption,
        version: VaultVersion,
        samples: &[PriceSample],
        underlying_yield_apr: F,
    ) -> ContractResult<ApyValue>
    where
        F: FnOnce(VaultOption) -> ContractResult<f64>,
    {
        if self.loading {
            return Ok(ApyValue::Calculated(0.0));
        }
        if let Some(apy) = self.apy_override(vault_option, version) {
            return Ok(ApyValue::Fixed(apy));
        }

        let params = ApyParams {
            vault_option,
            version,
            decimals: vault_option.decimals(),
            fees: self
                .vault(vault_option)
                .and_then(|vault| vault.fees.for_version(version)),
            underlying_yield_apr: underlying_yield_apr(vault_option)?,
        };
        calculate_apy_from_price_history(samples, self.now, &params).map(ApyValue::Calculated)
    }

    /// APY of every vault option under every version. Missing histories read as 0.
    ///
    /// Entries are resolved independently, a failing vault only fails its own entry.
    pub fn all_apys<F>(&self, histories: &PriceHistories, underlying_yield_apr: F) -> ApyTable
    where
        F: Fn(VaultOption) -> ContractResult<f64>,
    {
        let mut table = ApyTable::new();
        for version in VaultVersion::ALL {
            let apys = table.entry(version).or_default();
            for vault_option in VaultOption::ALL {
                let samples = histories
                    .get(&(version, vault_option))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let apy = self.latest_apy(vault_option, version, samples, &underlying_yield_apr);
                apys.insert(vault_option, apy);
            }
        }
        table
    }
}
