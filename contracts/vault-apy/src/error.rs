use cosmwasm_std::StdError;
use thiserror::Error;

pub type ContractResult<T> = core::result::Result<T, ContractError>;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("field {kind} should not be empty")]
    EmptyValue { kind: String },

    #[error("Msg sender must be the contract owner or the updater")]
    Unauthorized,

    #[error("Failed to update ownership")]
    UpdateOwnershipError,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Vault {vault} is not configured")]
    VaultNotFound { vault: String },

    #[error("Vault {vault} {version} has no {kind} fee configured")]
    MissingFee {
        vault: String,
        version: String,
        kind: String,
    },

    #[error("Starting price per share at {timestamp} is zero")]
    ZeroStartingPrice { timestamp: u64 },

    #[error("Failed to convert value to Decimal")]
    DecimalConversionError,

    #[error("APY {value} cannot be represented")]
    ApyOutOfRange { value: String },

    #[error("No {kind} oracle configured")]
    OracleNotConfigured { kind: String },

    #[error("Oracle error: {msg}")]
    OracleError { msg: String },
}
