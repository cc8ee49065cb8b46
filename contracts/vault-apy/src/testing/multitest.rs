use super::*;
use crate::apy::{annualize, signed_decimal_to_f64};
use crate::contract::{execute, instantiate, query};
use crate::error::ContractError;
use crate::external_types::{
    LstApyResponse, QueryMsgLstOracle, QueryMsgYieldOracle, VaultAprResponse,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, LatestApysResponse, QueryMsg};
use crate::vaults::{VaultOption, VaultVersion};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
};
use cw_multi_test::{App, ContractWrapper, Executor};

fn oracle_instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn oracle_execute(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn yield_oracle_query(_deps: Deps, _env: Env, msg: QueryMsgYieldOracle) -> StdResult<Binary> {
    match msg {
        QueryMsgYieldOracle::GetVaultApr { .. } => to_json_binary(&VaultAprResponse {
            apr: Decimal::percent(5),
        }),
    }
}

fn lst_oracle_query(_deps: Deps, _env: Env, msg: QueryMsgLstOracle) -> StdResult<Binary> {
    match msg {
        QueryMsgLstOracle::GetApy {} => to_json_binary(&LstApyResponse {
            apy: Decimal::percent(4),
        }),
    }
}

struct Suite {
    app: App,
    contract: Addr,
    owner: Addr,
    updater: Addr,
}

impl Suite {
    fn new() -> Self {
        let mut app = App::default();
        let owner = app.api().addr_make("owner");
        let updater = app.api().addr_make("updater");

        let yield_oracle_code = app.store_code(Box::new(ContractWrapper::new(
            oracle_execute,
            oracle_instantiate,
            yield_oracle_query,
        )));
        let lst_oracle_code = app.store_code(Box::new(ContractWrapper::new(
            oracle_execute,
            oracle_instantiate,
            lst_oracle_query,
        )));
        let vault_apy_code =
            app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

        let yield_oracle = app
            .instantiate_contract(
                yield_oracle_code,
                owner.clone(),
                &Empty {},
                &[],
                "yield-oracle",
                None,
            )
            .unwrap();
        let lst_oracle = app
            .instantiate_contract(
                lst_oracle_code,
                owner.clone(),
                &Empty {},
                &[],
                "lst-oracle",
                None,
            )
            .unwrap();
        let contract = app
            .instantiate_contract(
                vault_apy_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    updater: updater.to_string(),
                    wrapped_yield_oracle: Some(yield_oracle.to_string()),
                    lst_oracle: Some(lst_oracle.to_string()),
                    vaults: vault_configs(),
                    overrides: vec![],
                },
                &[],
                "vault-apy",
                None,
            )
            .unwrap();

        app.update_block(|block| block.time = now());

        Suite {
            app,
            contract,
            owner,
            updater,
        }
    }

    fn record(&mut self, version: VaultVersion, vault_option: VaultOption) {
        let msg = ExecuteMsg::RecordPriceHistory {
            version,
            vault_option,
            samples: vec![
                sample(PERIOD_START + HOUR, price(100)),
                sample(PERIOD_START + 2 * DAY, price(101)),
            ],
        };
        self.app
            .execute_contract(self.updater.clone(), self.contract.clone(), &msg, &[])
            .unwrap();
    }

    fn latest_apys(&self) -> LatestApysResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.contract, &QueryMsg::GetLatestApys {})
            .unwrap()
    }
}

fn apy_of(res: &LatestApysResponse, version: VaultVersion, vault_option: VaultOption) -> f64 {
    let apy = res
        .versions
        .iter()
        .find(|v| v.version == version)
        .and_then(|v| v.vaults.iter().find(|vault| vault.vault_option == vault_option))
        .unwrap()
        .apy;
    signed_decimal_to_f64(apy).unwrap()
}

#[test]
fn test_latest_apys_with_oracles() {
    let mut suite = Suite::new();
    suite.record(VaultVersion::V1, VaultOption::YvUsdcEthPutTheta);
    suite.record(VaultVersion::V2, VaultOption::StEthTheta);
    suite.record(VaultVersion::V2, VaultOption::EthTheta);

    let res = suite.latest_apys();
    assert!(res.fetched);

    let v2_after_fees = annualize(1.01 * (1.0 - 0.02 / 52.0) - 0.001 - 1.0);
    assert_close(
        apy_of(&res, VaultVersion::V1, VaultOption::YvUsdcEthPutTheta),
        annualize(0.01) + 5.0,
    );
    assert_close(
        apy_of(&res, VaultVersion::V2, VaultOption::StEthTheta),
        v2_after_fees + 4.0,
    );
    assert_close(apy_of(&res, VaultVersion::V2, VaultOption::EthTheta), v2_after_fees);
    assert_eq!(apy_of(&res, VaultVersion::V1, VaultOption::EthTheta), 0.0);
}

#[test]
fn test_open_period_needs_two_samples() {
    let mut suite = Suite::new();
    suite.record(VaultVersion::V2, VaultOption::EthTheta);

    // a week later the open period has no samples
    suite
        .app
        .update_block(|block| block.time = now().plus_seconds(WEEK));
    let res = suite.latest_apys();
    assert_eq!(apy_of(&res, VaultVersion::V2, VaultOption::EthTheta), 0.0);

    let msg = ExecuteMsg::RecordPriceHistory {
        version: VaultVersion::V2,
        vault_option: VaultOption::EthTheta,
        samples: vec![sample(PERIOD_START + WEEK + HOUR, price(102))],
    };
    suite
        .app
        .execute_contract(suite.updater.clone(), suite.contract.clone(), &msg, &[])
        .unwrap();

    // one sample in the open period, nothing to annualize yet
    let res = suite.latest_apys();
    assert_eq!(apy_of(&res, VaultVersion::V2, VaultOption::EthTheta), 0.0);
}

#[test]
fn test_loading_flag() {
    let mut suite = Suite::new();
    suite.record(VaultVersion::V2, VaultOption::StEthTheta);

    suite
        .app
        .execute_contract(
            suite.updater.clone(),
            suite.contract.clone(),
            &ExecuteMsg::SetHistoryLoading { loading: true },
            &[],
        )
        .unwrap();
    let res = suite.latest_apys();
    assert!(!res.fetched);
    assert_eq!(apy_of(&res, VaultVersion::V2, VaultOption::StEthTheta), 0.0);

    suite
        .app
        .execute_contract(
            suite.owner.clone(),
            suite.contract.clone(),
            &ExecuteMsg::SetHistoryLoading { loading: false },
            &[],
        )
        .unwrap();
    let res = suite.latest_apys();
    assert!(res.fetched);
    assert!(apy_of(&res, VaultVersion::V2, VaultOption::StEthTheta) > 4.0);
}

#[test]
fn test_unauthorized_updater() {
    let mut suite = Suite::new();
    let stranger = suite.app.api().addr_make("stranger");

    let err = suite
        .app
        .execute_contract(
            stranger,
            suite.contract.clone(),
            &ExecuteMsg::SetHistoryLoading { loading: true },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        ContractError::Unauthorized.to_string()
    );
}
