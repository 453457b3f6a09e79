//! Token standards and the custody messages used to lock and release assets.
//!
//! A gateway releases an asset by transferring it out of its own custody when
//! it holds enough, and by minting otherwise (the gateway must then be the
//! token's minter). NFTs held by anyone other than the gateway cannot be
//! released.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, QuerierWrapper, StdError, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use std::fmt;
use thiserror::Error;

use crate::nft::{owner_of, NftExecuteMsg};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum TokenStandard {
    /// Bank coin identified by its denom (mainchain only)
    Native,
    /// CW20 contract
    Fungible,
    /// CW721 contract; `amount` carries the token id
    NonFungible,
}

impl TokenStandard {
    /// Numeric code used in events (0 native, 20 fungible, 721 non-fungible).
    pub fn code(&self) -> u16 {
        match self {
            TokenStandard::Native => 0,
            TokenStandard::Fungible => 20,
            TokenStandard::NonFungible => 721,
        }
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenStandard::Native => "native",
            TokenStandard::Fungible => "fungible",
            TokenStandard::NonFungible => "non_fungible",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AssetError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("NFT {token_id} of {token} is held by {owner}, not the gateway")]
    NftHeldElsewhere {
        token: String,
        token_id: String,
        owner: String,
    },
}

/// How an asset left custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Transfer,
    Mint,
}

impl Release {
    pub fn as_str(&self) -> &'static str {
        match self {
            Release::Transfer => "transfer",
            Release::Mint => "mint",
        }
    }
}

/// Pull `amount` of a CW20 from `owner` into `custodian` (requires allowance).
pub fn lock_fungible(
    token: &str,
    owner: &Addr,
    custodian: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, StdError> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: custodian.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}

/// Move an NFT into `custodian` (the custodian must be an approved operator).
pub fn lock_nft(token: &str, token_id: Uint128, custodian: &Addr) -> Result<CosmosMsg, StdError> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&NftExecuteMsg::TransferNft {
            recipient: custodian.to_string(),
            token_id: token_id.to_string(),
        })?,
        funds: vec![],
    }
    .into())
}

/// Build the message that hands `amount` (or token id) of `token` to `recipient`.
pub fn release(
    querier: &QuerierWrapper,
    custodian: &Addr,
    token: &str,
    standard: TokenStandard,
    recipient: &str,
    amount: Uint128,
) -> Result<(Release, CosmosMsg), AssetError> {
    match standard {
        TokenStandard::Native => Ok((
            Release::Transfer,
            BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![Coin {
                    denom: token.to_string(),
                    amount,
                }],
            }
            .into(),
        )),
        TokenStandard::Fungible => {
            let held: BalanceResponse = querier.query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: custodian.to_string(),
                },
            )?;
            let (mode, msg) = if held.balance >= amount {
                (
                    Release::Transfer,
                    Cw20ExecuteMsg::Transfer {
                        recipient: recipient.to_string(),
                        amount,
                    },
                )
            } else {
                (
                    Release::Mint,
                    Cw20ExecuteMsg::Mint {
                        recipient: recipient.to_string(),
                        amount,
                    },
                )
            };
            Ok((
                mode,
                WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&msg)?,
                    funds: vec![],
                }
                .into(),
            ))
        }
        TokenStandard::NonFungible => {
            let token_id = amount.to_string();
            let (mode, msg) = match owner_of(querier, token, &token_id)? {
                Some(owner) if owner == custodian.as_str() => (
                    Release::Transfer,
                    NftExecuteMsg::TransferNft {
                        recipient: recipient.to_string(),
                        token_id,
                    },
                ),
                Some(owner) => {
                    return Err(AssetError::NftHeldElsewhere {
                        token: token.to_string(),
                        token_id,
                        owner,
                    })
                }
                None => (
                    Release::Mint,
                    NftExecuteMsg::Mint {
                        token_id,
                        owner: recipient.to_string(),
                        token_uri: None,
                        extension: None,
                    },
                ),
            };
            Ok((
                mode,
                WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&msg)?,
                    funds: vec![],
                }
                .into(),
            ))
        }
    }
}
