use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VaultVersion {
    V1,
    V2,
}

impl VaultVersion {
    /// Every deployed version, newest first.
    pub const ALL: [VaultVersion; 2] = [VaultVersion::V2, VaultVersion::V1];

    pub fn as_str(&self) -> &'static str {
        match self {
            VaultVersion::V1 => "v1",
            VaultVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for VaultVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
pub enum VaultOption {
    #[serde(rename = "rAAVE-THETA")]
    AaveTheta,
    #[serde(rename = "rAVAX-THETA")]
    AvaxTheta,
    #[serde(rename = "rstETH-THETA")]
    StEthTheta,
    #[serde(rename = "ryvUSDC-ETH-P-THETA")]
    YvUsdcEthPutTheta,
    #[serde(rename = "rETH-THETA")]
    EthTheta,
    #[serde(rename = "rBTC-THETA")]
    BtcTheta,
    #[serde(rename = "rUSDC-ETH-P-THETA")]
    UsdcEthPutTheta,
}

impl VaultOption {
    pub const ALL: [VaultOption; 7] = [
        VaultOption::AaveTheta,
        VaultOption::AvaxTheta,
        VaultOption::StEthTheta,
        VaultOption::YvUsdcEthPutTheta,
        VaultOption::EthTheta,
        VaultOption::BtcTheta,
        VaultOption::UsdcEthPutTheta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VaultOption::AaveTheta => "rAAVE-THETA",
            VaultOption::AvaxTheta => "rAVAX-THETA",
            VaultOption::StEthTheta => "rstETH-THETA",
            VaultOption::YvUsdcEthPutTheta => "ryvUSDC-ETH-P-THETA",
            VaultOption::EthTheta => "rETH-THETA",
            VaultOption::BtcTheta => "rBTC-THETA",
            VaultOption::UsdcEthPutTheta => "rUSDC-ETH-P-THETA",
        }
    }

    /// Asset the vault's shares are denominated in.
    pub fn asset(&self) -> Asset {
        match self {
            VaultOption::UsdcEthPutTheta | VaultOption::YvUsdcEthPutTheta => Asset::Usdc,
            VaultOption::EthTheta | VaultOption::StEthTheta => Asset::Weth,
            VaultOption::BtcTheta => Asset::Wbtc,
            VaultOption::AaveTheta => Asset::Aave,
            VaultOption::AvaxTheta => Asset::Wavax,
        }
    }

    /// Decimals of the vault's price per share.
    pub fn decimals(&self) -> u32 {
        self.asset().decimals()
    }
}

impl fmt::Display for VaultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum Asset {
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "yvUSDC")]
    YvUsdc,
    #[serde(rename = "WETH")]
    Weth,
    #[serde(rename = "stETH")]
    StEth,
    #[serde(rename = "WBTC")]
    Wbtc,
    #[serde(rename = "AAVE")]
    Aave,
    #[serde(rename = "WAVAX")]
    Wavax,
}

impl Asset {
    pub fn decimals(&self) -> u32 {
        match self {
            Asset::Usdc | Asset::YvUsdc => 6,
            Asset::Wbtc => 8,
            Asset::Weth | Asset::StEth | Asset::Aave | Asset::Wavax => 18,
        }
    }
}
