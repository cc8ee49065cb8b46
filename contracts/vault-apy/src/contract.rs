use crate::error::{ContractError, ContractResult};
use crate::execute::*;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::*;
use crate::state::{Config, CONFIG, VAULTS};
use cosmwasm_std::{
    attr, entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response,
};
use cw2::set_contract_version;
use cw_ownable::update_ownership;

const CONTRACT_NAME: &str = concat!("crates.io:neutron-contracts__", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
///////////////////
/// INSTANTIATE ///
///////////////////

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> ContractResult<Response> {
    // Set contract version for migration info
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    msg.validate()?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(msg.owner.as_ref()))?;

    let config = Config {
        updater: deps.api.addr_validate(&msg.updater)?,
        wrapped_yield_oracle: msg
            .wrapped_yield_oracle
            .as_deref()
            .map(|addr| deps.api.addr_validate(addr))
            .transpose()?,
        lst_oracle: msg
            .lst_oracle
            .as_deref()
            .map(|addr| deps.api.addr_validate(addr))
            .transpose()?,
        history_loading: false,
        overrides: msg.overrides,
    };
    CONFIG.save(deps.storage, &config)?;

    for vault in &msg.vaults {
        VAULTS.save(deps.storage, vault.vault_option.as_str(), vault)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attributes([
            attr("updater", config.updater.to_string()),
            attr("vaults", msg.vaults.len().to_string()),
            attr("overrides", config.overrides.len().to_string()),
        ]))
}

///////////////
/// EXECUTE ///
///////////////

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateOwnership(action) => {
            update_ownership(deps.into_empty(), &env.block, &info.sender, action)
                .map_err(|_| ContractError::UpdateOwnershipError)?;
            Ok(Response::new().add_attribute("action", "update_ownership"))
        }
        ExecuteMsg::UpdateConfig { new_config } => execute_update_config(deps, info, new_config),
        ExecuteMsg::SetVault { vault } => execute_set_vault(deps, info, vault),
        ExecuteMsg::RecordPriceHistory {
            version,
            vault_option,
            samples,
        } => execute_record_price_history(deps, info, version, vault_option, samples),
        ExecuteMsg::ClearPriceHistory {
            version,
            vault_option,
        } => execute_clear_price_history(deps, info, version, vault_option),
        ExecuteMsg::SetHistoryLoading { loading } => {
            execute_set_history_loading(deps, info, loading)
        }
    }
}

/////////////
/// QUERY ///
/////////////

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> ContractResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::GetVault { vault_option } => {
            Ok(to_json_binary(&query_vault(deps, vault_option)?)?)
        }
        QueryMsg::GetPriceHistory {
            version,
            vault_option,
        } => Ok(to_json_binary(&query_price_history(
            deps,
            version,
            vault_option,
        )?)?),
        QueryMsg::GetLatestApy {
            version,
            vault_option,
        } => Ok(to_json_binary(&query_latest_apy(
            deps,
            env,
            version,
            vault_option,
        )?)?),
        QueryMsg::GetLatestApys {} => Ok(to_json_binary(&query_latest_apys(deps, env)?)?),
        QueryMsg::CalculateApy {
            samples,
            decimals,
            vault_option,
            version,
            underlying_yield_apr,
        } => Ok(to_json_binary(&query_calculate_apy(
            deps,
            env,
            samples,
            decimals,
            vault_option,
            version,
            underlying_yield_apr,
        )?)?),
    }
}

///////////////
/// MIGRATE ///
///////////////

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("version", CONTRACT_VERSION))
}
