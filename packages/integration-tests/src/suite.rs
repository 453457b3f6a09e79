//! Both ledgers deployed and wired together.

use common::{names, Quorum, SignatureEntry, TokenStandard};
use cosmwasm_std::{coins, Addr, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use mainchain_gateway::msg as main_msg;
use sidechain_gateway::msg as side_msg;
use sidechain_gateway::msg::DepositPayload;
use validator_set::msg::{InstantiateMsg as ValidatorInstantiateMsg, ValidatorInit};

use crate::nft;
use crate::signer::TestValidator;

pub const ADMIN: &str = "terra1admin";
pub const ALICE: &str = "terra1alice";
pub const BOB: &str = "terra1bob";
pub const RELAYER: &str = "terra1relayer";
pub const NATIVE_DENOM: &str = "uluna";

const INITIAL_BALANCE: u128 = 1_000_000;

// ============================================================================
// Contract Wrappers
// ============================================================================

fn contract_registry() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            registry::contract::execute,
            registry::contract::instantiate,
            registry::contract::query,
        )
        .with_migrate(registry::contract::migrate),
    )
}

fn contract_validator_set() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        validator_set::contract::execute,
        validator_set::contract::instantiate,
        validator_set::contract::query,
    ))
}

fn contract_acknowledgement() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        acknowledgement::contract::execute,
        acknowledgement::contract::instantiate,
        acknowledgement::contract::query,
    ))
}

fn contract_mainchain_gateway() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mainchain_gateway::contract::execute,
        mainchain_gateway::contract::instantiate,
        mainchain_gateway::contract::query,
    ))
}

fn contract_sidechain_gateway() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        sidechain_gateway::contract::execute,
        sidechain_gateway::contract::instantiate,
        sidechain_gateway::contract::query,
    ))
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

// ============================================================================
// Deployments
// ============================================================================

pub struct MainchainContracts {
    pub registry: Addr,
    pub validator_set: Addr,
    pub gateway: Addr,
    /// CW20 held by users, minter is the gateway
    pub token: Addr,
    pub nft: Addr,
}

pub struct SidechainContracts {
    pub registry: Addr,
    pub validator_set: Addr,
    pub acknowledgement: Addr,
    pub gateway: Addr,
    /// Counterpart of the mainchain CW20
    pub token: Addr,
    /// Counterpart of the mainchain native coin
    pub wrapped_native: Addr,
    pub nft: Addr,
}

pub struct Suite {
    pub mainchain: App,
    pub sidechain: App,
    pub main: MainchainContracts,
    pub side: SidechainContracts,
    pub validators: Vec<TestValidator>,
}

pub struct SuiteBuilder {
    validator_count: u8,
    quorum: Quorum,
    max_pending_withdrawals: Option<u32>,
}

impl Default for SuiteBuilder {
    fn default() -> Self {
        Self {
            validator_count: 3,
            quorum: Quorum { num: 2, denom: 3 },
            max_pending_withdrawals: None,
        }
    }
}

impl SuiteBuilder {
    pub fn validators(mut self, count: u8) -> Self {
        self.validator_count = count;
        self
    }

    pub fn quorum(mut self, num: u64, denom: u64) -> Self {
        self.quorum = Quorum { num, denom };
        self
    }

    pub fn max_pending_withdrawals(mut self, capacity: u32) -> Self {
        self.max_pending_withdrawals = Some(capacity);
        self
    }

    pub fn build(self) -> Suite {
        let validators: Vec<TestValidator> =
            (1..=self.validator_count).map(TestValidator::new).collect();
        let validator_inits: Vec<ValidatorInit> = validators
            .iter()
            .map(|v| ValidatorInit {
                address: v.address.to_string(),
                signer: v.signer.clone(),
            })
            .collect();

        let (mainchain, main) = deploy_mainchain(&validator_inits, self.quorum);
        let (sidechain, side) =
            deploy_sidechain(&validator_inits, self.quorum, self.max_pending_withdrawals);

        let mut suite = Suite {
            mainchain,
            sidechain,
            main,
            side,
            validators,
        };
        suite.map_tokens();
        suite
    }
}

fn fund(app: &mut App, accounts: &[&str]) {
    app.init_modules(|router, _, storage| {
        for account in accounts {
            router
                .bank
                .init_balance(
                    storage,
                    &Addr::unchecked(*account),
                    coins(INITIAL_BALANCE, NATIVE_DENOM),
                )
                .unwrap();
        }
    });
}

fn instantiate_cw20(
    app: &mut App,
    code_id: u64,
    name: &str,
    symbol: &str,
    initial_balances: Vec<Cw20Coin>,
    minter: &Addr,
) -> Addr {
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &cw20_base::msg::InstantiateMsg {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 6,
            initial_balances,
            mint: Some(MinterResponse {
                minter: minter.to_string(),
                cap: None,
            }),
            marketing: None,
        },
        &[],
        symbol,
        None,
    )
    .unwrap()
}

fn register(app: &mut App, registry: &Addr, name: &str, address: &Addr) {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        registry.clone(),
        &registry::msg::ExecuteMsg::UpdateContract {
            name: name.to_string(),
            address: address.to_string(),
        },
        &[],
    )
    .unwrap();
}

fn deploy_mainchain(validators: &[ValidatorInit], quorum: Quorum) -> (App, MainchainContracts) {
    let mut app = App::default();
    let admin = Addr::unchecked(ADMIN);
    fund(&mut app, &[ALICE, BOB]);

    let registry_code = app.store_code(contract_registry());
    let validator_code = app.store_code(contract_validator_set());
    let gateway_code = app.store_code(contract_mainchain_gateway());
    let cw20_code = app.store_code(contract_cw20());
    let nft_code = app.store_code(nft::contract_nft());

    let registry = app
        .instantiate_contract(
            registry_code,
            admin.clone(),
            &registry::msg::InstantiateMsg {
                admin: ADMIN.to_string(),
            },
            &[],
            "registry",
            Some(ADMIN.to_string()),
        )
        .unwrap();

    let validator_set = app
        .instantiate_contract(
            validator_code,
            admin.clone(),
            &ValidatorInstantiateMsg {
                validators: validators.to_vec(),
                quorum,
                acknowledgement: None,
            },
            &[],
            "validator-set",
            None,
        )
        .unwrap();

    let gateway = app
        .instantiate_contract(
            gateway_code,
            admin.clone(),
            &main_msg::InstantiateMsg {
                admin: ADMIN.to_string(),
                registry: registry.to_string(),
            },
            &[],
            "mainchain-gateway",
            None,
        )
        .unwrap();

    let token = instantiate_cw20(
        &mut app,
        cw20_code,
        "Mainchain Token",
        "MTK",
        vec![
            Cw20Coin {
                address: ALICE.to_string(),
                amount: Uint128::new(INITIAL_BALANCE),
            },
            Cw20Coin {
                address: BOB.to_string(),
                amount: Uint128::new(INITIAL_BALANCE),
            },
        ],
        &gateway,
    );

    let nft = app
        .instantiate_contract(
            nft_code,
            admin.clone(),
            &nft::InstantiateMsg {
                minters: vec![ADMIN.to_string(), gateway.to_string()],
            },
            &[],
            "mainchain-nft",
            None,
        )
        .unwrap();
    for token_id in 1..=3u32 {
        app.execute_contract(
            admin.clone(),
            nft.clone(),
            &nft::ExecuteMsg::Mint {
                token_id: token_id.to_string(),
                owner: ALICE.to_string(),
                token_uri: None,
                extension: None,
            },
            &[],
        )
        .unwrap();
    }

    register(&mut app, &registry, names::VALIDATOR, &validator_set);

    (
        app,
        MainchainContracts {
            registry,
            validator_set,
            gateway,
            token,
            nft,
        },
    )
}

fn deploy_sidechain(
    validators: &[ValidatorInit],
    quorum: Quorum,
    max_pending_withdrawals: Option<u32>,
) -> (App, SidechainContracts) {
    let mut app = App::default();
    let admin = Addr::unchecked(ADMIN);

    let registry_code = app.store_code(contract_registry());
    let ack_code = app.store_code(contract_acknowledgement());
    let validator_code = app.store_code(contract_validator_set());
    let gateway_code = app.store_code(contract_sidechain_gateway());
    let cw20_code = app.store_code(contract_cw20());
    let nft_code = app.store_code(nft::contract_nft());

    let registry = app
        .instantiate_contract(
            registry_code,
            admin.clone(),
            &registry::msg::InstantiateMsg {
                admin: ADMIN.to_string(),
            },
            &[],
            "registry",
            Some(ADMIN.to_string()),
        )
        .unwrap();

    let acknowledgement = app
        .instantiate_contract(
            ack_code,
            admin.clone(),
            &acknowledgement::msg::InstantiateMsg {
                admin: ADMIN.to_string(),
                validator_contract: None,
                operators: vec![RELAYER.to_string()],
            },
            &[],
            "acknowledgement",
            None,
        )
        .unwrap();

    let validator_set = app
        .instantiate_contract(
            validator_code,
            admin.clone(),
            &ValidatorInstantiateMsg {
                validators: validators.to_vec(),
                quorum,
                acknowledgement: Some(acknowledgement.to_string()),
            },
            &[],
            "validator-set",
            None,
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        acknowledgement.clone(),
        &acknowledgement::msg::ExecuteMsg::SetValidatorContract {
            validator_contract: validator_set.to_string(),
        },
        &[],
    )
    .unwrap();

    let gateway = app
        .instantiate_contract(
            gateway_code,
            admin.clone(),
            &side_msg::InstantiateMsg {
                admin: ADMIN.to_string(),
                registry: registry.to_string(),
                max_pending_withdrawals,
            },
            &[],
            "sidechain-gateway",
            None,
        )
        .unwrap();

    let token = instantiate_cw20(&mut app, cw20_code, "Sidechain Token", "STK", vec![], &gateway);
    let wrapped_native =
        instantiate_cw20(&mut app, cw20_code, "Wrapped Luna", "WLUNA", vec![], &gateway);

    let nft = app
        .instantiate_contract(
            nft_code,
            admin,
            &nft::InstantiateMsg {
                minters: vec![gateway.to_string()],
            },
            &[],
            "sidechain-nft",
            None,
        )
        .unwrap();

    register(&mut app, &registry, names::VALIDATOR, &validator_set);
    register(&mut app, &registry, names::ACKNOWLEDGEMENT, &acknowledgement);
    register(&mut app, &registry, names::WRAPPED_NATIVE, &wrapped_native);

    (
        app,
        SidechainContracts {
            registry,
            validator_set,
            acknowledgement,
            gateway,
            token,
            wrapped_native,
            nft,
        },
    )
}

// ============================================================================
// Event Helpers
// ============================================================================

/// Every value of attribute `key` across all events, in emission order.
pub fn attributes(res: &AppResponse, key: &str) -> Vec<String> {
    res.events
        .iter()
        .flat_map(|e| e.attributes.iter())
        .filter(|a| a.key == key)
        .map(|a| a.value.clone())
        .collect()
}

pub fn attribute(res: &AppResponse, key: &str) -> Option<String> {
    attributes(res, key).into_iter().next()
}

// ============================================================================
// Suite Operations
// ============================================================================

impl Suite {
    pub fn new() -> Self {
        SuiteBuilder::default().build()
    }

    pub fn builder() -> SuiteBuilder {
        SuiteBuilder::default()
    }

    /// Same mappings in both registries: native, CW20 and CW721.
    fn map_tokens(&mut self) {
        let mappings = [
            (
                NATIVE_DENOM.to_string(),
                self.side.wrapped_native.to_string(),
                TokenStandard::Native,
            ),
            (
                self.main.token.to_string(),
                self.side.token.to_string(),
                TokenStandard::Fungible,
            ),
            (
                self.main.nft.to_string(),
                self.side.nft.to_string(),
                TokenStandard::NonFungible,
            ),
        ];
        for (mainchain_token, sidechain_token, standard) in mappings {
            let msg = registry::msg::ExecuteMsg::MapToken {
                mainchain_token,
                sidechain_token,
                standard,
            };
            self.mainchain
                .execute_contract(Addr::unchecked(ADMIN), self.main.registry.clone(), &msg, &[])
                .unwrap();
            self.sidechain
                .execute_contract(Addr::unchecked(ADMIN), self.side.registry.clone(), &msg, &[])
                .unwrap();
        }
    }

    pub fn validator(&self, index: usize) -> &TestValidator {
        &self.validators[index]
    }

    // ------------------------------------------------------------------------
    // Mainchain deposits
    // ------------------------------------------------------------------------

    pub fn deposit_native(&mut self, sender: &str, amount: u128) -> AnyResult<AppResponse> {
        self.mainchain.execute_contract(
            Addr::unchecked(sender),
            self.main.gateway.clone(),
            &main_msg::ExecuteMsg::DepositNative { owner: None },
            &coins(amount, NATIVE_DENOM),
        )
    }

    /// Grants the gateway an allowance, then deposits.
    pub fn deposit_token(&mut self, sender: &str, amount: u128) -> AnyResult<AppResponse> {
        self.approve_main_token(sender, amount);
        self.mainchain.execute_contract(
            Addr::unchecked(sender),
            self.main.gateway.clone(),
            &main_msg::ExecuteMsg::DepositToken {
                token: self.main.token.to_string(),
                amount: Uint128::new(amount),
                owner: None,
            },
            &[],
        )
    }

    pub fn approve_main_token(&mut self, owner: &str, amount: u128) {
        self.mainchain
            .execute_contract(
                Addr::unchecked(owner),
                self.main.token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.main.gateway.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn approve_main_nfts(&mut self, owner: &str) {
        self.mainchain
            .execute_contract(
                Addr::unchecked(owner),
                self.main.nft.clone(),
                &nft::ExecuteMsg::ApproveAll {
                    operator: self.main.gateway.to_string(),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn deposit_nft(&mut self, sender: &str, token_id: u128) -> AnyResult<AppResponse> {
        self.approve_main_nfts(sender);
        self.mainchain.execute_contract(
            Addr::unchecked(sender),
            self.main.gateway.clone(),
            &main_msg::ExecuteMsg::DepositNft {
                token: self.main.nft.to_string(),
                token_id: Uint128::new(token_id),
                owner: None,
            },
            &[],
        )
    }

    pub fn main_deposit(&self, id: u64) -> Option<mainchain_gateway::state::DepositRecord> {
        let res: main_msg::DepositResponse = self
            .mainchain
            .wrap()
            .query_wasm_smart(&self.main.gateway, &main_msg::QueryMsg::Deposit { id })
            .unwrap();
        res.deposit
    }

    /// What an honest validator attests for mainchain deposit `id`.
    pub fn observed_deposit(&self, id: u64) -> DepositPayload {
        let record = self.main_deposit(id).expect("deposit exists on the mainchain");
        DepositPayload {
            id: record.id,
            owner: record.owner,
            token: record.counterpart_token,
            standard: record.standard,
            amount: record.amount,
        }
    }

    // ------------------------------------------------------------------------
    // Sidechain attestations
    // ------------------------------------------------------------------------

    pub fn attest(&mut self, validator: usize, deposit: DepositPayload) -> AnyResult<AppResponse> {
        let sender = self.validators[validator].address.clone();
        self.sidechain.execute_contract(
            sender,
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::DepositFor { deposit },
            &[],
        )
    }

    /// Relay mainchain deposit `id` with attestations from `validators`.
    pub fn relay_deposit(&mut self, id: u64, validators: &[usize]) {
        let payload = self.observed_deposit(id);
        for validator in validators {
            self.attest(*validator, payload.clone()).unwrap();
        }
    }

    pub fn side_deposit(&self, id: u64) -> side_msg::DepositState {
        let res: side_msg::DepositStateResponse = self
            .sidechain
            .wrap()
            .query_wasm_smart(&self.side.gateway, &side_msg::QueryMsg::Deposit { id })
            .unwrap();
        res.state
    }

    // ------------------------------------------------------------------------
    // Sidechain withdrawals
    // ------------------------------------------------------------------------

    pub fn approve_side_token(&mut self, token: &Addr, owner: &str, amount: u128) {
        self.sidechain
            .execute_contract(
                Addr::unchecked(owner),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.side.gateway.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn withdraw_token(&mut self, sender: &str, amount: u128) -> AnyResult<AppResponse> {
        let token = self.side.token.clone();
        self.approve_side_token(&token, sender, amount);
        self.sidechain.execute_contract(
            Addr::unchecked(sender),
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::Withdraw {
                token: token.to_string(),
                amount: Uint128::new(amount),
                recipient: None,
            },
            &[],
        )
    }

    pub fn withdraw_native(&mut self, sender: &str, amount: u128) -> AnyResult<AppResponse> {
        let token = self.side.wrapped_native.clone();
        self.approve_side_token(&token, sender, amount);
        self.sidechain.execute_contract(
            Addr::unchecked(sender),
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::WithdrawNative {
                amount: Uint128::new(amount),
                recipient: None,
            },
            &[],
        )
    }

    pub fn withdraw_nft(&mut self, sender: &str, token_id: u128) -> AnyResult<AppResponse> {
        self.sidechain
            .execute_contract(
                Addr::unchecked(sender),
                self.side.nft.clone(),
                &nft::ExecuteMsg::ApproveAll {
                    operator: self.side.gateway.to_string(),
                    expires: None,
                },
                &[],
            )
            .unwrap();
        self.sidechain.execute_contract(
            Addr::unchecked(sender),
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::WithdrawNft {
                token: self.side.nft.to_string(),
                token_id: Uint128::new(token_id),
                recipient: None,
            },
            &[],
        )
    }

    pub fn side_withdrawal(&self, id: u64) -> sidechain_gateway::state::WithdrawalRecord {
        let res: side_msg::WithdrawalResponse = self
            .sidechain
            .wrap()
            .query_wasm_smart(&self.side.gateway, &side_msg::QueryMsg::Withdrawal { id })
            .unwrap();
        res.withdrawal.expect("withdrawal exists on the sidechain")
    }

    pub fn withdrawal_hash(&self, id: u64) -> Vec<u8> {
        let res: side_msg::WithdrawalHashResponse = self
            .sidechain
            .wrap()
            .query_wasm_smart(&self.side.gateway, &side_msg::QueryMsg::WithdrawalHash { id })
            .unwrap();
        res.hash.to_vec()
    }

    pub fn pending(&self, owner: &str) -> side_msg::PendingWithdrawalsResponse {
        self.sidechain
            .wrap()
            .query_wasm_smart(
                &self.side.gateway,
                &side_msg::QueryMsg::PendingWithdrawals {
                    owner: owner.to_string(),
                },
            )
            .unwrap()
    }

    /// Validator `validator` signs withdrawal `id` and submits the signature.
    pub fn sign_withdrawal(&mut self, validator: usize, id: u64) -> AnyResult<AppResponse> {
        let signature = self.validators[validator].sign(&self.withdrawal_hash(id));
        let sender = self.validators[validator].address.clone();
        self.sidechain.execute_contract(
            sender,
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::SubmitWithdrawalSignatures {
                id,
                replace: false,
                signature,
            },
            &[],
        )
    }

    /// Ascending bundle collected on the sidechain.
    pub fn bundle(&self, id: u64) -> Vec<SignatureEntry> {
        let res: side_msg::WithdrawalSignaturesResponse = self
            .sidechain
            .wrap()
            .query_wasm_smart(
                &self.side.gateway,
                &side_msg::QueryMsg::WithdrawalSignatures { id },
            )
            .unwrap();
        res.signatures
    }

    /// Submit sidechain withdrawal `id` to the mainchain with `signatures`.
    pub fn execute_on_mainchain(
        &mut self,
        id: u64,
        signatures: Vec<SignatureEntry>,
    ) -> AnyResult<AppResponse> {
        let record = self.side_withdrawal(id);
        self.mainchain.execute_contract(
            Addr::unchecked(RELAYER),
            self.main.gateway.clone(),
            &main_msg::ExecuteMsg::Withdraw {
                id,
                recipient: Some(record.recipient),
                token: record.counterpart_token,
                amount: record.amount,
                signatures,
            },
            &[],
        )
    }

    pub fn acknowledge(&mut self, validator: usize, id: u64) -> AnyResult<AppResponse> {
        let sender = self.validator(validator).address.clone();
        self.sidechain.execute_contract(
            sender,
            self.side.gateway.clone(),
            &side_msg::ExecuteMsg::AcknowledgeWithdrawalOnMainchain { id },
            &[],
        )
    }

    /// Each of `validators` acknowledges `id` in turn.
    pub fn acknowledge_by(&mut self, validators: &[usize], id: u64) {
        for validator in validators {
            self.acknowledge(*validator, id).unwrap();
        }
    }

    // ------------------------------------------------------------------------
    // Balances
    // ------------------------------------------------------------------------

    pub fn native_balance(&self, account: &str) -> u128 {
        self.mainchain
            .wrap()
            .query_balance(account, NATIVE_DENOM)
            .unwrap()
            .amount
            .u128()
    }

    pub fn main_token_balance(&self, account: &str) -> u128 {
        cw20_balance(&self.mainchain, &self.main.token, account)
    }

    pub fn side_token_balance(&self, token: &Addr, account: &str) -> u128 {
        cw20_balance(&self.sidechain, token, account)
    }

    pub fn main_nft_owner(&self, token_id: u128) -> Option<String> {
        nft_owner(&self.mainchain, &self.main.nft, token_id)
    }

    pub fn side_nft_owner(&self, token_id: u128) -> Option<String> {
        nft_owner(&self.sidechain, &self.side.nft, token_id)
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::new()
    }
}

fn cw20_balance(app: &App, token: &Addr, account: &str) -> u128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance.u128()
}

fn nft_owner(app: &App, collection: &Addr, token_id: u128) -> Option<String> {
    app.wrap()
        .query_wasm_smart::<nft::OwnerOfResponse>(
            collection,
            &nft::QueryMsg::OwnerOf {
                token_id: token_id.to_string(),
                include_expired: None,
            },
        )
        .ok()
        .map(|res| res.owner)
}
