//! Integration tests for the acknowledgement contract using cw-multi-test.

use common::Quorum;
use cosmwasm_std::{Addr, Empty};
use cw_multi_test::{App, ContractWrapper, Executor};

use acknowledgement::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, IsOperatorResponse, OperatorsResponse, QueryMsg,
    VotesResponse,
};
use validator_set::msg::{
    InstantiateMsg as ValidatorInstantiateMsg, IsValidatorResponse,
    QueryMsg as ValidatorQueryMsg, ValidatorChange, ValidatorInit,
};

// ============================================================================
// Test Setup
// ============================================================================

fn contract_acknowledgement() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        acknowledgement::contract::execute,
        acknowledgement::contract::instantiate,
        acknowledgement::contract::query,
    );
    Box::new(contract)
}

fn contract_validator_set() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        validator_set::contract::execute,
        validator_set::contract::instantiate,
        validator_set::contract::query,
    );
    Box::new(contract)
}

fn validator(index: u8) -> Addr {
    Addr::unchecked(format!("terra1validator{index}"))
}

fn signer(index: u8) -> String {
    format!("0x{}", format!("{index:02x}").repeat(20))
}

struct Suite {
    app: App,
    admin: Addr,
    operator: Addr,
    ack: Addr,
    validators: Addr,
}

/// Three sidechain validators at 2/3, wired to the acknowledgement contract.
fn setup() -> Suite {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let operator = Addr::unchecked("terra1operator");

    let ack_code = app.store_code(contract_acknowledgement());
    let validator_code = app.store_code(contract_validator_set());

    let ack = app
        .instantiate_contract(
            ack_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                validator_contract: None,
                operators: vec![operator.to_string()],
            },
            &[],
            "acknowledgement",
            None,
        )
        .unwrap();

    let validators = app
        .instantiate_contract(
            validator_code,
            admin.clone(),
            &ValidatorInstantiateMsg {
                validators: (1..=3)
                    .map(|i| ValidatorInit {
                        address: validator(i).to_string(),
                        signer: signer(i),
                    })
                    .collect(),
                quorum: Quorum { num: 2, denom: 3 },
                acknowledgement: Some(ack.to_string()),
            },
            &[],
            "validator-set",
            None,
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        ack.clone(),
        &ExecuteMsg::SetValidatorContract {
            validator_contract: validators.to_string(),
        },
        &[],
    )
    .unwrap();

    Suite {
        app,
        admin,
        operator,
        ack,
        validators,
    }
}

fn is_operator(suite: &Suite, address: &Addr) -> bool {
    let res: IsOperatorResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.ack,
            &QueryMsg::IsOperator {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.is_operator
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn test_validator_contract_set_once() {
    let mut suite = setup();
    let err = suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.ack.clone(),
            &ExecuteMsg::SetValidatorContract {
                validator_contract: "terra1other".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("already configured"));

    let config: ConfigResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.ack, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.validator_contract, Some(suite.validators.clone()));
}

// ============================================================================
// Operator Governance
// ============================================================================

#[test]
fn test_add_operators_by_quorum() {
    let mut suite = setup();
    let newcomer = Addr::unchecked("terra1relayer2");
    let msg = ExecuteMsg::AddOperators {
        period: 1,
        operators: vec![newcomer.to_string()],
    };

    suite
        .app
        .execute_contract(validator(1), suite.ack.clone(), &msg, &[])
        .unwrap();
    assert!(!is_operator(&suite, &newcomer));

    suite
        .app
        .execute_contract(validator(2), suite.ack.clone(), &msg, &[])
        .unwrap();
    assert!(is_operator(&suite, &newcomer));

    let operators: OperatorsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.ack, &QueryMsg::Operators {})
        .unwrap();
    assert_eq!(operators.operators.len(), 2);

    // Period 1 closed once applied
    let err = suite
        .app
        .execute_contract(validator(3), suite.ack.clone(), &msg, &[])
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("not after"));
}

#[test]
fn test_single_relayer_cannot_hijack() {
    let mut suite = setup();

    // Operators are not validators
    let err = suite
        .app
        .execute_contract(
            suite.operator.clone(),
            suite.ack.clone(),
            &ExecuteMsg::RemoveOperators {
                period: 1,
                operators: vec![suite.operator.to_string()],
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("not a validator"));

    // Split votes do not reach quorum
    suite
        .app
        .execute_contract(
            validator(1),
            suite.ack.clone(),
            &ExecuteMsg::UpdateValidator {
                period: 1,
                validator_contract: "terra1hijack".to_string(),
            },
            &[],
        )
        .unwrap();
    suite
        .app
        .execute_contract(
            validator(2),
            suite.ack.clone(),
            &ExecuteMsg::RemoveOperators {
                period: 1,
                operators: vec![suite.operator.to_string()],
            },
            &[],
        )
        .unwrap();

    let err = suite
        .app
        .execute_contract(
            validator(1),
            suite.ack.clone(),
            &ExecuteMsg::RemoveOperators {
                period: 1,
                operators: vec![suite.operator.to_string()],
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("different payload"));

    let votes: VotesResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.ack, &QueryMsg::Votes { period: 1 })
        .unwrap();
    assert_eq!(votes.tallies.len(), 2);
    assert!(is_operator(&suite, &suite.operator));
}

// ============================================================================
// Validator Relay
// ============================================================================

fn relay(suite: &mut Suite, sender: &Addr, period: u64, change: &ValidatorChange) -> String {
    let res = suite
        .app
        .execute_contract(
            sender.clone(),
            suite.ack.clone(),
            &ExecuteMsg::RelayValidatorChange {
                period,
                change: change.clone(),
            },
            &[],
        )
        .unwrap();
    res.events
        .iter()
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == "status")
        .map(|a| a.value.clone())
        .unwrap()
}

fn is_validator(suite: &Suite, index: u8) -> IsValidatorResponse {
    suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.validators,
            &ValidatorQueryMsg::IsValidator {
                address: validator(index).to_string(),
            },
        )
        .unwrap()
}

#[test]
fn test_validators_relay_change_at_quorum() {
    let mut suite = setup();
    let change = ValidatorChange::AddValidator {
        address: validator(4).to_string(),
        signer: signer(4),
    };

    assert_eq!(relay(&mut suite, &validator(1), 1, &change), "pending");
    assert_eq!(relay(&mut suite, &validator(1), 1, &change), "duplicate_vote");
    assert!(!is_validator(&suite, 4).is_validator);

    assert_eq!(relay(&mut suite, &validator(2), 1, &change), "relayed");
    let res = is_validator(&suite, 4);
    assert!(res.is_validator);
    assert_eq!(res.signer, Some(signer(4)));

    // Late ballots are recorded without forwarding the change again
    assert_eq!(relay(&mut suite, &validator(3), 1, &change), "already_relayed");
}

#[test]
fn test_single_caller_cannot_apply_validator_change() {
    let mut suite = setup();
    let change = ValidatorChange::RemoveValidator {
        address: validator(3).to_string(),
    };

    // Operators hold no vote
    let err = suite
        .app
        .execute_contract(
            suite.operator.clone(),
            suite.ack.clone(),
            &ExecuteMsg::RelayValidatorChange {
                period: 1,
                change: change.clone(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("not a validator"));

    // One validator is below 2/3
    assert_eq!(relay(&mut suite, &validator(1), 1, &change), "pending");
    assert!(is_validator(&suite, 3).is_validator);

    // A second validator backing a different change does not complete it
    let other = ValidatorChange::RemoveValidator {
        address: validator(2).to_string(),
    };
    assert_eq!(relay(&mut suite, &validator(3), 1, &other), "pending");
    assert!(is_validator(&suite, 2).is_validator);
    assert!(is_validator(&suite, 3).is_validator);

    // Nor may the sidechain set be driven directly
    let err = suite
        .app
        .execute_contract(
            suite.operator.clone(),
            suite.validators.clone(),
            &validator_set::msg::ExecuteMsg::SyncChange { period: 1, change },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
}
