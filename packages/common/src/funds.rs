//! CW20 fund movements.
//!
//! Contracts check a sender's allowance and balance before emitting a
//! `TransferFrom`/`BurnFrom` so that shortfalls surface as typed errors
//! rather than as a failed sub-message.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FundsError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Insufficient allowance on {token}: required {required}, available {available}")]
    InsufficientAllowance {
        token: String,
        required: Uint128,
        available: Uint128,
    },

    #[error("Insufficient balance on {token}: required {required}, available {available}")]
    InsufficientBalance {
        token: String,
        required: Uint128,
        available: Uint128,
    },
}

/// Check that `spender` can pull every `(token, amount)` from `owner`.
///
/// Amounts of the same token are summed before checking; zero amounts are
/// ignored.
pub fn ensure_pullable(
    querier: &QuerierWrapper,
    owner: &str,
    spender: &Addr,
    pulls: &[(Addr, Uint128)],
) -> Result<(), FundsError> {
    let mut totals: Vec<(&Addr, Uint128)> = Vec::new();
    for (token, amount) in pulls.iter().filter(|(_, amount)| !amount.is_zero()) {
        match totals.iter().position(|(t, _)| *t == token) {
            Some(i) => totals[i].1 = totals[i].1.checked_add(*amount).map_err(StdError::from)?,
            None => totals.push((token, *amount)),
        }
    }

    for (token, required) in totals {
        let allowance: AllowanceResponse = querier.query_wasm_smart(
            token,
            &Cw20QueryMsg::Allowance {
                owner: owner.to_string(),
                spender: spender.to_string(),
            },
        )?;
        if allowance.allowance < required {
            return Err(FundsError::InsufficientAllowance {
                token: token.to_string(),
                required,
                available: allowance.allowance,
            });
        }

        let balance: BalanceResponse = querier.query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: owner.to_string(),
            },
        )?;
        if balance.balance < required {
            return Err(FundsError::InsufficientBalance {
                token: token.to_string(),
                required,
                available: balance.balance,
            });
        }
    }
    Ok(())
}

fn cw20_msg(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

pub fn transfer_from_msg(
    token: &Addr,
    owner: &str,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn transfer_msg(token: &Addr, recipient: &str, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn increase_allowance_msg(
    token: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: spender.to_string(),
            amount,
            expires: None,
        },
    )
}

pub fn burn_from_msg(token: &Addr, owner: &str, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::BurnFrom {
            owner: owner.to_string(),
            amount,
        },
    )
}

pub fn mint_msg(token: &Addr, recipient: &str, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_msg(
        token,
        &Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
    )
}
