mod multitest;

use crate::state::{FeeSchedule, PriceSample, UnderlyingYield, VaultConfig, VaultFees};
use crate::vaults::VaultOption;
use cosmwasm_std::{Decimal, Timestamp, Uint256};
use std::str::FromStr;

pub const DAY: u64 = 24 * 60 * 60;
pub const HOUR: u64 = 60 * 60;
pub const WEEK: u64 = 7 * DAY;
/// Friday 2019-10-18 10:00:00 UTC
pub const PERIOD_START: u64 = 1_571_392_800;
/// 10^18, one whole unit of an 18 decimals asset
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// Monday after `PERIOD_START`
pub fn now() -> Timestamp {
    Timestamp::from_seconds(PERIOD_START + 3 * DAY)
}

pub fn sample(timestamp: u64, price_per_share: u128) -> PriceSample {
    PriceSample {
        timestamp,
        price_per_share: Uint256::from(price_per_share),
    }
}

/// Price of an 18 decimals asset in hundredths, 101 is 1.01
pub fn price(hundredths: u128) -> u128 {
    hundredths * ONE / 100
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn fee_schedule(management_fee: &str, performance_fee: &str) -> FeeSchedule {
    FeeSchedule {
        management_fee: Some(Decimal::from_str(management_fee).unwrap()),
        performance_fee: Some(Decimal::from_str(performance_fee).unwrap()),
        withdrawal_fee: None,
    }
}

/// Fee tables of the deployed vaults
pub fn vault_configs() -> Vec<VaultConfig> {
    let v1_fees = |withdrawal_fee: &str| FeeSchedule {
        withdrawal_fee: Some(Decimal::from_str(withdrawal_fee).unwrap()),
        ..FeeSchedule::default()
    };

    VaultOption::ALL
        .into_iter()
        .map(|vault_option| {
            let fees = match vault_option {
                VaultOption::UsdcEthPutTheta | VaultOption::YvUsdcEthPutTheta => VaultFees {
                    v1: Some(v1_fees("1.0")),
                    v2: None,
                },
                VaultOption::EthTheta | VaultOption::BtcTheta => VaultFees {
                    v1: Some(v1_fees("0.5")),
                    v2: Some(fee_schedule("2", "10")),
                },
                VaultOption::StEthTheta | VaultOption::AaveTheta | VaultOption::AvaxTheta => {
                    VaultFees {
                        v1: None,
                        v2: Some(fee_schedule("2", "10")),
                    }
                }
            };
            let underlying_yield = match vault_option {
                VaultOption::YvUsdcEthPutTheta => {
                    Some(UnderlyingYield::WrappedVault {
                        symbol: "yvUSDC".to_string(),
                        version: "0.3.0".to_string(),
                    })
                }
                VaultOption::StEthTheta => Some(UnderlyingYield::LiquidStaking {}),
                _ => None,
            };
            VaultConfig {
                vault_option,
                fees,
                underlying_yield,
            }
        })
        .collect()
}
