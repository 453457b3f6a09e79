//! Full round trips across both ledgers, with the test acting as relayer.

use cosmwasm_std::Addr;
use cw_multi_test::Executor;
use integration_tests::suite::attribute;
use integration_tests::{Suite, TestValidator, ALICE};
use validator_set::msg::{ExecuteMsg as ValidatorExecuteMsg, QueryMsg as ValidatorQueryMsg};
use validator_set::msg::{QuorumResponse, ValidatorChange};

/// Validators vote `change` in on the mainchain, then confirm it on the sidechain.
fn govern(suite: &mut Suite, period: u64, change: ValidatorChange, voters: &[usize]) {
    let validator_set = suite.main.validator_set.clone();
    let mut status = String::new();
    for voter in voters {
        let sender = suite.validator(*voter).address.clone();
        let res = suite
            .mainchain
            .execute_contract(
                sender,
                validator_set.clone(),
                &ValidatorExecuteMsg::ProposeChange {
                    period,
                    change: change.clone(),
                },
                &[],
            )
            .unwrap();
        status = attribute(&res, "status").unwrap();
    }
    assert_eq!(status, "applied");

    let acknowledgement = suite.side.acknowledgement.clone();
    for voter in voters {
        let sender = suite.validator(*voter).address.clone();
        let res = suite
            .sidechain
            .execute_contract(
                sender,
                acknowledgement.clone(),
                &acknowledgement::msg::ExecuteMsg::RelayValidatorChange {
                    period,
                    change: change.clone(),
                },
                &[],
            )
            .unwrap();
        status = attribute(&res, "status").unwrap();
    }
    assert_eq!(status, "relayed");
}

fn min_validators(suite: &Suite, sidechain: bool) -> u64 {
    let (app, contract) = if sidechain {
        (&suite.sidechain, &suite.side.validator_set)
    } else {
        (&suite.mainchain, &suite.main.validator_set)
    };
    let res: QuorumResponse = app
        .wrap()
        .query_wasm_smart(contract, &ValidatorQueryMsg::Quorum {})
        .unwrap();
    res.min_validators
}

#[test]
fn test_native_round_trip() {
    let mut suite = Suite::new();
    let start = suite.native_balance(ALICE);

    // Mainchain -> sidechain
    suite.deposit_native(ALICE, 1_000).unwrap();
    suite.relay_deposit(0, &[0, 1]);
    let wrapped = suite.side.wrapped_native.clone();
    assert_eq!(suite.side_token_balance(&wrapped, ALICE), 1_000);
    assert_eq!(suite.native_balance(ALICE), start - 1_000);

    // Sidechain -> mainchain
    suite.withdraw_native(ALICE, 400).unwrap();
    suite.sign_withdrawal(0, 0).unwrap();
    suite.sign_withdrawal(2, 0).unwrap();
    let bundle = suite.bundle(0);
    assert_eq!(bundle.len(), 2);

    let res = suite.execute_on_mainchain(0, bundle.clone()).unwrap();
    assert_eq!(attribute(&res, "release").unwrap(), "transfer");
    assert_eq!(suite.native_balance(ALICE), start - 600);
    assert_eq!(suite.native_balance(suite.main.gateway.as_str()), 600);

    // Validators close the loop and the slot frees up
    let res = suite.acknowledge(1, 0).unwrap();
    assert_eq!(attribute(&res, "status").unwrap(), "pending");
    assert_eq!(suite.pending(ALICE).ids, vec![0]);
    suite.acknowledge(2, 0).unwrap();
    assert!(suite.pending(ALICE).ids.is_empty());
    assert!(suite.side_withdrawal(0).executed);

    let err = suite.execute_on_mainchain(0, bundle).unwrap_err();
    assert!(err.root_cause().to_string().contains("already processed"));
}

#[test]
fn test_token_and_nft_round_trip() {
    let mut suite = Suite::new();
    suite.deposit_token(ALICE, 700).unwrap();
    suite.deposit_nft(ALICE, 1).unwrap();
    suite.relay_deposit(0, &[1, 2]);
    suite.relay_deposit(1, &[0, 2]);

    suite.withdraw_token(ALICE, 700).unwrap();
    suite.withdraw_nft(ALICE, 1).unwrap();
    for id in [0u64, 1] {
        suite.sign_withdrawal(0, id).unwrap();
        suite.sign_withdrawal(1, id).unwrap();
        let bundle = suite.bundle(id);
        suite.execute_on_mainchain(id, bundle).unwrap();
        suite.acknowledge_by(&[0, 1], id);
    }

    assert_eq!(suite.main_token_balance(ALICE), 1_000_000);
    assert_eq!(suite.main_token_balance(suite.main.gateway.as_str()), 0);
    assert_eq!(suite.main_nft_owner(1).unwrap(), ALICE);
    assert_eq!(
        suite.side_nft_owner(1).unwrap(),
        suite.side.gateway.to_string()
    );
}

#[test]
fn test_withdrawal_to_a_different_mainchain_recipient() {
    let mut suite = Suite::new();
    suite.deposit_token(ALICE, 100).unwrap();
    suite.relay_deposit(0, &[0, 1]);

    let token = suite.side.token.clone();
    suite.approve_side_token(&token, ALICE, 100);
    let gateway = suite.side.gateway.clone();
    suite
        .sidechain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway,
            &sidechain_gateway::msg::ExecuteMsg::Withdraw {
                token: token.to_string(),
                amount: cosmwasm_std::Uint128::new(100),
                recipient: Some(integration_tests::BOB.to_string()),
            },
            &[],
        )
        .unwrap();

    suite.sign_withdrawal(0, 0).unwrap();
    suite.sign_withdrawal(1, 0).unwrap();
    let bundle = suite.bundle(0);
    suite.execute_on_mainchain(0, bundle).unwrap();
    assert_eq!(suite.main_token_balance(integration_tests::BOB), 1_000_000 + 100);
}

#[test]
fn test_validator_change_reaches_both_ledgers() {
    let mut suite = Suite::new();
    let newcomer = TestValidator::new(4);
    govern(
        &mut suite,
        0,
        ValidatorChange::AddValidator {
            address: newcomer.address.to_string(),
            signer: newcomer.signer.clone(),
        },
        &[0, 1],
    );
    suite.validators.push(newcomer);

    // 2/3 of four validators is three signatures on both ledgers
    assert_eq!(min_validators(&suite, false), 3);
    assert_eq!(min_validators(&suite, true), 3);

    // The newcomer attests on the sidechain
    suite.deposit_native(ALICE, 90).unwrap();
    suite.relay_deposit(0, &[3, 0]);
    assert!(matches!(
        suite.side_deposit(0),
        sidechain_gateway::msg::DepositState::Pending { .. }
    ));
    suite.relay_deposit(0, &[1]);
    let wrapped = suite.side.wrapped_native.clone();
    assert_eq!(suite.side_token_balance(&wrapped, ALICE), 90);

    // ...and signs withdrawals the mainchain now accepts
    suite.withdraw_native(ALICE, 90).unwrap();
    suite.sign_withdrawal(3, 0).unwrap();
    suite.sign_withdrawal(0, 0).unwrap();
    let bundle = suite.bundle(0);
    let err = suite.execute_on_mainchain(0, bundle).unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Quorum not met: 2 valid signatures, 3 required"));

    suite.sign_withdrawal(2, 0).unwrap();
    let bundle = suite.bundle(0);
    suite.execute_on_mainchain(0, bundle).unwrap();
}

#[test]
fn test_removed_validator_loses_its_voice() {
    let mut suite = Suite::new();
    let departed = suite.validator(2).address.to_string();
    govern(
        &mut suite,
        0,
        ValidatorChange::RemoveValidator { address: departed },
        &[0, 1],
    );

    suite.deposit_native(ALICE, 10).unwrap();
    let payload = suite.observed_deposit(0);
    let err = suite.attest(2, payload).unwrap_err();
    assert!(err.root_cause().to_string().contains("not a validator"));

    suite.relay_deposit(0, &[0, 1]);
    suite.withdraw_native(ALICE, 10).unwrap();
    let err = suite.sign_withdrawal(2, 0).unwrap_err();
    assert!(err.root_cause().to_string().contains("not a validator"));

    // Two of the remaining two
    suite.sign_withdrawal(0, 0).unwrap();
    suite.sign_withdrawal(1, 0).unwrap();
    let bundle = suite.bundle(0);
    suite.execute_on_mainchain(0, bundle).unwrap();
}
