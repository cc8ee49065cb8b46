use crate::error::{ContractError, ContractResult};
use crate::msg::{validate_overrides, validate_vault, OracleUpdate, UpdateConfig};
use crate::state::{Config, PriceSample, VaultConfig, CONFIG, PRICE_HISTORY, VAULTS};
use crate::vaults::{VaultOption, VaultVersion};
use cosmwasm_std::{attr, Addr, Api, Deps, DepsMut, MessageInfo, Order, Response, StdResult};

fn assert_owner(deps: Deps, sender: &Addr) -> ContractResult<()> {
    cw_ownable::assert_owner(deps.storage, sender).map_err(|_| ContractError::Unauthorized)
}

/// The updater feeds price history, the owner can always step in.
fn assert_owner_or_updater(deps: Deps, sender: &Addr) -> ContractResult<Config> {
    let config = CONFIG.load(deps.storage)?;
    if config.updater == *sender || cw_ownable::is_owner(deps.storage, sender)? {
        return Ok(config);
    }
    Err(ContractError::Unauthorized)
}

fn updated_oracle(api: &dyn Api, update: OracleUpdate) -> ContractResult<Option<Addr>> {
    match update {
        OracleUpdate::Set { address } => Ok(Some(api.addr_validate(&address)?)),
        OracleUpdate::Clear {} => Ok(None),
    }
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    new_config: UpdateConfig,
) -> ContractResult<Response> {
    assert_owner(deps.as_ref(), &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;

    if let Some(updater) = new_config.updater {
        config.updater = deps.api.addr_validate(&updater)?;
    }
    if let Some(update) = new_config.wrapped_yield_oracle {
        config.wrapped_yield_oracle = updated_oracle(deps.api, update)?;
    }
    if let Some(update) = new_config.lst_oracle {
        config.lst_oracle = updated_oracle(deps.api, update)?;
    }
    if let Some(overrides) = new_config.overrides {
        validate_overrides(&overrides)?;
        config.overrides = overrides;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attributes([
            attr("updater", config.updater.to_string()),
            attr(
                "wrapped_yield_oracle",
                format!("{:?}", config.wrapped_yield_oracle),
            ),
            attr("lst_oracle", format!("{:?}", config.lst_oracle)),
            attr("overrides", config.overrides.len().to_string()),
        ]))
}

pub fn execute_set_vault(
    deps: DepsMut,
    info: MessageInfo,
    vault: VaultConfig,
) -> ContractResult<Response> {
    assert_owner(deps.as_ref(), &info.sender)?;
    validate_vault(&vault)?;

    VAULTS.save(deps.storage, vault.vault_option.as_str(), &vault)?;

    Ok(Response::new()
        .add_attribute("action", "set_vault")
        .add_attributes([
            attr("vault_option", vault.vault_option.to_string()),
            attr("fees", format!("{:?}", vault.fees)),
            attr("underlying_yield", format!("{:?}", vault.underlying_yield)),
        ]))
}

pub fn execute_record_price_history(
    deps: DepsMut,
    info: MessageInfo,
    version: VaultVersion,
    vault_option: VaultOption,
    samples: Vec<PriceSample>,
) -> ContractResult<Response> {
    assert_owner_or_updater(deps.as_ref(), &info.sender)?;
    if samples.is_empty() {
        return Err(ContractError::EmptyValue {
            kind: "samples".to_string(),
        });
    }

    // a sample at an already recorded timestamp replaces it
    for sample in &samples {
        PRICE_HISTORY.save(
            deps.storage,
            (version.as_str(), vault_option.as_str(), sample.timestamp),
            &sample.price_per_share,
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "record_price_history")
        .add_attributes([
            attr("version", version.to_string()),
            attr("vault_option", vault_option.to_string()),
            attr("recorded", samples.len().to_string()),
        ]))
}

pub fn execute_clear_price_history(
    deps: DepsMut,
    info: MessageInfo,
    version: VaultVersion,
    vault_option: VaultOption,
) -> ContractResult<Response> {
    assert_owner_or_updater(deps.as_ref(), &info.sender)?;

    let timestamps = PRICE_HISTORY
        .prefix((version.as_str(), vault_option.as_str()))
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<u64>>>()?;
    for timestamp in &timestamps {
        PRICE_HISTORY.remove(
            deps.storage,
            (version.as_str(), vault_option.as_str(), *timestamp),
        );
    }

    Ok(Response::new()
        .add_attribute("action", "clear_price_history")
        .add_attributes([
            attr("version", version.to_string()),
            attr("vault_option", vault_option.to_string()),
            attr("removed", timestamps.len().to_string()),
        ]))
}

pub fn execute_set_history_loading(
    deps: DepsMut,
    info: MessageInfo,
    loading: bool,
) -> ContractResult<Response> {
    let mut config = assert_owner_or_updater(deps.as_ref(), &info.sender)?;
    config.history_loading = loading;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_history_loading")
        .add_attribute("loading", loading.to_string()))
}
