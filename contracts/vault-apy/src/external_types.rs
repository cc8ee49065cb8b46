use cosmwasm_std::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Query interface of the wrapped yield vault oracle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsgYieldOracle {
    GetVaultApr { symbol: String, version: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VaultAprResponse {
    /// fraction, 0.05 is 5%
    pub apr: Decimal,
}

/// Query interface of the liquid staking oracle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsgLstOracle {
    GetApy {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LstApyResponse {
    /// fraction, 0.05 is 5%
    pub apy: Decimal,
}
