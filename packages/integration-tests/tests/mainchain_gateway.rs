//! Mainchain gateway: deposits, bundle-verified withdrawals and admin.

use common::{SignatureEntry, TokenStandard};
use cosmwasm_std::{coins, Addr, HexBinary, Uint128};
use cw_multi_test::Executor;
use integration_tests::suite::attribute;
use integration_tests::{Suite, ADMIN, ALICE, BOB, NATIVE_DENOM, RELAYER};
use mainchain_gateway::msg::{
    BulkDeposit, DepositCountResponse, DepositsResponse, ExecuteMsg, QueryMsg,
    WithdrawalHashResponse, WithdrawalResponse,
};

fn deposit_count(suite: &Suite) -> u64 {
    let res: DepositCountResponse = suite
        .mainchain
        .wrap()
        .query_wasm_smart(&suite.main.gateway, &QueryMsg::DepositCount {})
        .unwrap();
    res.count
}

fn pause(suite: &mut Suite) {
    let gateway = suite.main.gateway.clone();
    suite
        .mainchain
        .execute_contract(Addr::unchecked(ADMIN), gateway, &ExecuteMsg::Pause {}, &[])
        .unwrap();
}

/// Hash the mainchain would verify for a withdrawal with these fields.
fn hash_for(suite: &Suite, id: u64, recipient: &str, token: &str, standard: TokenStandard, amount: u128) -> Vec<u8> {
    let res: WithdrawalHashResponse = suite
        .mainchain
        .wrap()
        .query_wasm_smart(
            &suite.main.gateway,
            &QueryMsg::WithdrawalHash {
                id,
                recipient: recipient.to_string(),
                token: token.to_string(),
                standard,
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    res.hash.to_vec()
}

/// Bundle signed by `signers`, ordered by signer address.
fn bundle(suite: &Suite, signers: &[usize], hash: &[u8]) -> Vec<SignatureEntry> {
    let mut entries: Vec<SignatureEntry> = signers
        .iter()
        .map(|i| {
            let v = suite.validator(*i);
            SignatureEntry {
                signer: v.signer.clone(),
                signature: v.sign(hash),
            }
        })
        .collect();
    entries.sort_by(|a, b| a.signer.cmp(&b.signer));
    entries
}

fn withdraw(
    suite: &mut Suite,
    id: u64,
    token: &str,
    amount: u128,
    signatures: Vec<SignatureEntry>,
) -> cw_multi_test::error::AnyResult<cw_multi_test::AppResponse> {
    let gateway = suite.main.gateway.clone();
    suite.mainchain.execute_contract(
        Addr::unchecked(RELAYER),
        gateway,
        &ExecuteMsg::Withdraw {
            id,
            recipient: Some(ALICE.to_string()),
            token: token.to_string(),
            amount: Uint128::new(amount),
            signatures,
        },
        &[],
    )
}

// ============================================================================
// Deposits
// ============================================================================

#[test]
fn test_deposits_assign_sequential_ids() {
    let mut suite = Suite::new();

    let res = suite.deposit_native(ALICE, 1_000).unwrap();
    assert_eq!(attribute(&res, "deposit_id").unwrap(), "0");
    let res = suite.deposit_token(BOB, 250).unwrap();
    assert_eq!(attribute(&res, "deposit_id").unwrap(), "1");
    let res = suite.deposit_nft(ALICE, 3).unwrap();
    assert_eq!(attribute(&res, "deposit_id").unwrap(), "2");
    assert_eq!(deposit_count(&suite), 3);

    let gateway = suite.main.gateway.to_string();
    assert_eq!(suite.native_balance(&gateway), 1_000);
    assert_eq!(suite.main_token_balance(&gateway), 250);
    assert_eq!(suite.main_nft_owner(3).unwrap(), gateway);

    let native = suite.main_deposit(0).unwrap();
    assert_eq!(native.token, NATIVE_DENOM);
    assert_eq!(native.counterpart_token, suite.side.wrapped_native.to_string());
    assert_eq!(native.standard, TokenStandard::Native);

    let nft = suite.main_deposit(2).unwrap();
    assert_eq!(nft.amount, Uint128::new(3));
    assert_eq!(nft.standard, TokenStandard::NonFungible);

    let page: DepositsResponse = suite
        .mainchain
        .wrap()
        .query_wasm_smart(
            &suite.main.gateway,
            &QueryMsg::Deposits {
                start_after: Some(0),
                limit: Some(1),
            },
        )
        .unwrap();
    assert_eq!(page.deposits.len(), 1);
    assert_eq!(page.deposits[0].id, 1);
}

#[test]
fn test_deposit_for_another_owner() {
    let mut suite = Suite::new();
    let gateway = suite.main.gateway.clone();
    suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway,
            &ExecuteMsg::DepositNative {
                owner: Some(BOB.to_string()),
            },
            &coins(10, NATIVE_DENOM),
        )
        .unwrap();
    assert_eq!(suite.main_deposit(0).unwrap().owner, BOB);
}

#[test]
fn test_deposit_rejections() {
    let mut suite = Suite::new();
    let gateway = suite.main.gateway.clone();

    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway.clone(),
            &ExecuteMsg::DepositNative { owner: None },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("No funds sent"));

    // Token mapped as fungible cannot go through the NFT entry point
    let token = suite.main.token.to_string();
    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway.clone(),
            &ExecuteMsg::DepositNft {
                token: token.clone(),
                token_id: Uint128::new(1),
                owner: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("does not accept"));

    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway.clone(),
            &ExecuteMsg::DepositToken {
                token: "terra1unmapped".to_string(),
                amount: Uint128::new(5),
                owner: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Asset not mapped"));

    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway,
            &ExecuteMsg::DepositToken {
                token,
                amount: Uint128::zero(),
                owner: None,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid amount"));

    // Bob owns none of the collection
    suite.approve_main_nfts(BOB);
    let err = suite.deposit_nft(BOB, 1).unwrap_err();
    assert!(err.root_cause().to_string().contains("does not own token 1"));

    assert_eq!(deposit_count(&suite), 0);
}

#[test]
fn test_bulk_deposit_locks_every_entry() {
    let mut suite = Suite::new();
    suite.approve_main_token(ALICE, 400);
    suite.approve_main_nfts(ALICE);

    let gateway = suite.main.gateway.clone();
    let deposits = vec![
        BulkDeposit {
            token: suite.main.token.to_string(),
            amount: Uint128::new(400),
        },
        BulkDeposit {
            token: suite.main.nft.to_string(),
            amount: Uint128::new(1),
        },
        BulkDeposit {
            token: suite.main.nft.to_string(),
            amount: Uint128::new(2),
        },
    ];
    suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway.clone(),
            &ExecuteMsg::DepositBulk {
                owner: BOB.to_string(),
                deposits,
            },
            &[],
        )
        .unwrap();

    assert_eq!(deposit_count(&suite), 3);
    assert_eq!(suite.main_token_balance(gateway.as_str()), 400);
    assert_eq!(suite.main_nft_owner(1).unwrap(), gateway.to_string());
    assert_eq!(suite.main_nft_owner(2).unwrap(), gateway.to_string());
    assert!((0..3).all(|id| suite.main_deposit(id).unwrap().owner == BOB));
}

#[test]
fn test_bulk_deposit_is_all_or_nothing() {
    let mut suite = Suite::new();
    suite.approve_main_token(ALICE, 400);
    suite.approve_main_nfts(ALICE);

    let gateway = suite.main.gateway.clone();
    let deposits = vec![
        BulkDeposit {
            token: suite.main.token.to_string(),
            amount: Uint128::new(400),
        },
        // Native coins cannot be bulk deposited
        BulkDeposit {
            token: NATIVE_DENOM.to_string(),
            amount: Uint128::new(5),
        },
    ];
    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway.clone(),
            &ExecuteMsg::DepositBulk {
                owner: ALICE.to_string(),
                deposits,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("does not accept"));

    assert_eq!(deposit_count(&suite), 0);
    assert_eq!(suite.main_token_balance(gateway.as_str()), 0);
    assert_eq!(suite.main_token_balance(ALICE), 1_000_000);

    let err = suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ALICE),
            gateway,
            &ExecuteMsg::DepositBulk {
                owner: ALICE.to_string(),
                deposits: vec![],
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Batch must not be empty"));
}

#[test]
fn test_paused_gateway_rejects_deposits_and_withdrawals() {
    let mut suite = Suite::new();
    pause(&mut suite);

    let err = suite.deposit_native(ALICE, 10).unwrap_err();
    assert!(err.root_cause().to_string().contains("Bridge is paused"));

    let token = suite.main.token.to_string();
    let err = withdraw(&mut suite, 0, &token, 10, vec![]).unwrap_err();
    assert!(err.root_cause().to_string().contains("Bridge is paused"));

    let gateway = suite.main.gateway.clone();
    suite
        .mainchain
        .execute_contract(Addr::unchecked(ADMIN), gateway, &ExecuteMsg::Unpause {}, &[])
        .unwrap();
    suite.deposit_native(ALICE, 10).unwrap();
}

#[test]
fn test_admin_operations_require_admin() {
    let mut suite = Suite::new();
    let gateway = suite.main.gateway.clone();

    let err = suite
        .mainchain
        .execute_contract(Addr::unchecked(ALICE), gateway.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    suite
        .mainchain
        .execute_contract(
            Addr::unchecked(ADMIN),
            gateway.clone(),
            &ExecuteMsg::ChangeAdmin {
                new_admin: BOB.to_string(),
            },
            &[],
        )
        .unwrap();
    let err = suite
        .mainchain
        .execute_contract(Addr::unchecked(ADMIN), gateway.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
    suite
        .mainchain
        .execute_contract(Addr::unchecked(BOB), gateway, &ExecuteMsg::Pause {}, &[])
        .unwrap();
}

// ============================================================================
// Withdrawals
// ============================================================================

#[test]
fn test_withdraw_native_with_quorum_bundle() {
    let mut suite = Suite::new();
    suite.deposit_native(BOB, 5_000).unwrap();

    let hash = hash_for(&suite, 7, ALICE, NATIVE_DENOM, TokenStandard::Native, 1_200);
    let signatures = bundle(&suite, &[0, 2], &hash);
    let before = suite.native_balance(ALICE);

    let res = withdraw(&mut suite, 7, NATIVE_DENOM, 1_200, signatures).unwrap();
    assert_eq!(attribute(&res, "release").unwrap(), "transfer");
    assert_eq!(attribute(&res, "signers").unwrap(), "2");
    assert_eq!(suite.native_balance(ALICE), before + 1_200);

    let record: WithdrawalResponse = suite
        .mainchain
        .wrap()
        .query_wasm_smart(&suite.main.gateway, &QueryMsg::Withdrawal { id: 7 })
        .unwrap();
    let record = record.withdrawal.unwrap();
    assert!(record.executed);
    assert_eq!(record.standard, TokenStandard::Native);
    assert_eq!(record.signers.len(), 2);
}

#[test]
fn test_withdraw_replay_is_rejected() {
    let mut suite = Suite::new();
    let token = suite.main.token.to_string();
    let hash = hash_for(&suite, 0, ALICE, &token, TokenStandard::Fungible, 10);
    let signatures = bundle(&suite, &[0, 1, 2], &hash);

    withdraw(&mut suite, 0, &token, 10, signatures.clone()).unwrap();
    let err = withdraw(&mut suite, 0, &token, 10, signatures).unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Withdrawal 0 already processed"));
}

#[test]
fn test_withdraw_mints_when_custody_is_short() {
    let mut suite = Suite::new();
    suite.deposit_token(BOB, 100).unwrap();
    let token = suite.main.token.to_string();

    let hash = hash_for(&suite, 0, ALICE, &token, TokenStandard::Fungible, 250);
    let signatures = bundle(&suite, &[1, 2], &hash);
    let res = withdraw(&mut suite, 0, &token, 250, signatures).unwrap();

    assert_eq!(attribute(&res, "release").unwrap(), "mint");
    assert_eq!(suite.main_token_balance(ALICE), 1_000_000 + 250);
    assert_eq!(suite.main_token_balance(suite.main.gateway.as_str()), 100);
}

#[test]
fn test_withdraw_nft_returns_escrowed_token() {
    let mut suite = Suite::new();
    suite.deposit_nft(ALICE, 1).unwrap();
    let nft = suite.main.nft.to_string();

    let hash = hash_for(&suite, 4, ALICE, &nft, TokenStandard::NonFungible, 1);
    let signatures = bundle(&suite, &[0, 1], &hash);
    let res = withdraw(&mut suite, 4, &nft, 1, signatures).unwrap();
    assert_eq!(attribute(&res, "release").unwrap(), "transfer");
    assert_eq!(suite.main_nft_owner(1).unwrap(), ALICE);
}

#[test]
fn test_withdraw_bundle_must_reach_quorum() {
    let mut suite = Suite::new();
    let token = suite.main.token.to_string();
    let hash = hash_for(&suite, 0, ALICE, &token, TokenStandard::Fungible, 10);

    let sigs = bundle(&suite, &[1], &hash);
    let err = withdraw(&mut suite, 0, &token, 10, sigs).unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Quorum not met: 1 valid signatures, 2 required"));

    let err = withdraw(&mut suite, 0, &token, 10, vec![]).unwrap_err();
    assert!(err.root_cause().to_string().contains("Quorum not met"));

    // Signatures over a different amount do not match their declared signers
    let other = hash_for(&suite, 0, ALICE, &token, TokenStandard::Fungible, 11);
    let sigs = bundle(&suite, &[0, 1], &other);
    let err = withdraw(&mut suite, 0, &token, 10, sigs).unwrap_err();
    assert!(err.root_cause().to_string().contains("Malformed signature bundle"));

    // Nothing executed, so a correct bundle still goes through
    let sigs = bundle(&suite, &[0, 1], &hash);
    withdraw(&mut suite, 0, &token, 10, sigs).unwrap();
}

#[test]
fn test_withdraw_bundle_ordering_and_membership() {
    let mut suite = Suite::new();
    let token = suite.main.token.to_string();
    let hash = hash_for(&suite, 0, ALICE, &token, TokenStandard::Fungible, 10);

    let mut descending = bundle(&suite, &[0, 1], &hash);
    descending.reverse();
    let err = withdraw(&mut suite, 0, &token, 10, descending).unwrap_err();
    assert!(err.root_cause().to_string().contains("strictly ascending"));

    let single = bundle(&suite, &[0], &hash);
    let duplicated = vec![single[0].clone(), single[0].clone()];
    let err = withdraw(&mut suite, 0, &token, 10, duplicated).unwrap_err();
    assert!(err.root_cause().to_string().contains("strictly ascending"));

    let outsider = integration_tests::TestValidator::new(9);
    let mut with_outsider = bundle(&suite, &[0], &hash);
    with_outsider.push(SignatureEntry {
        signer: outsider.signer.clone(),
        signature: outsider.sign(&hash),
    });
    with_outsider.sort_by(|a, b| a.signer.cmp(&b.signer));
    let err = withdraw(&mut suite, 0, &token, 10, with_outsider).unwrap_err();
    assert!(err.root_cause().to_string().contains("is not a current validator"));

    let signer = suite.validator(0).signer.clone();
    let err = withdraw(
        &mut suite,
        0,
        &token,
        10,
        vec![SignatureEntry {
            signer,
            signature: HexBinary::from(vec![0u8; 12]),
        }],
    )
    .unwrap_err();
    assert!(err.root_cause().to_string().contains("Malformed signature"));
}
