//! Integration tests for the messenger contract using cw-multi-test.
//!
//! Two messenger instances with different blockchain IDs share one `App`;
//! the tests relay messages between them by hand.

use common::{CrossChainMessage, FeeInfo};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, to_json_vec, Addr, Binary, Deps, DepsMut, Empty, Env,
    MessageInfo, Response, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::Item;

use messenger::msg::{
    ConfigResponse, ExecuteMsg, FailedMessageResponse, InstantiateMsg, NextMessageIdResponse,
    QueryMsg, ReceiptQueueSizeResponse, ReceiveCrossChainMessageResponse,
    RedeemRelayerRewardsResponse, RelayerRewardsResponse, SendCrossChainMessageInput,
    SendCrossChainMessageResponse, SentMessageResponse, TrustedMessengerResponse,
};

const CHAIN_A: [u8; 4] = [0, 0, 0, 1];
const CHAIN_B: [u8; 4] = [0, 0, 0, 2];
const CHAIN_C: [u8; 4] = [0, 0, 0, 3];

// ============================================================================
// Mock Receiver
// ============================================================================

/// Payload receiver that counts executions. The payload `fail` always fails;
/// `gated` fails until the receiver is opened. `relay:<msg>` executes `<msg>`
/// on the calling messenger instead of counting.
mod receiver {
    use super::*;

    pub const COUNT: Item<u64> = Item::new("count");
    pub const OPEN: Item<bool> = Item::new("open");

    #[cw_serde]
    pub struct InstantiateMsg {}

    #[cw_serde]
    pub enum ExecuteMsg {
        HandleCrossChainMessage {
            source_blockchain_id: Binary,
            origin_sender_address: String,
            message: Binary,
        },
        Open {},
    }

    #[cw_serde]
    pub enum QueryMsg {
        Count {},
    }

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: InstantiateMsg,
    ) -> StdResult<Response> {
        COUNT.save(deps.storage, &0)?;
        OPEN.save(deps.storage, &false)?;
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            ExecuteMsg::HandleCrossChainMessage { message, .. } => {
                if let Some(inner) = message.as_slice().strip_prefix(b"relay:".as_slice()) {
                    return Ok(Response::new().add_message(WasmMsg::Execute {
                        contract_addr: info.sender.to_string(),
                        msg: Binary::from(inner.to_vec()),
                        funds: vec![],
                    }));
                }
                if message.as_slice() == b"fail" {
                    return Err(StdError::generic_err("receiver rejected payload"));
                }
                if message.as_slice() == b"gated" && !OPEN.load(deps.storage)? {
                    return Err(StdError::generic_err("receiver is closed"));
                }
                COUNT.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;
                Ok(Response::new())
            }
            ExecuteMsg::Open {} => {
                OPEN.save(deps.storage, &true)?;
                Ok(Response::new())
            }
        }
    }

    pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Count {} => to_json_binary(&COUNT.load(deps.storage)?),
        }
    }
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_messenger() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        messenger::contract::execute,
        messenger::contract::instantiate,
        messenger::contract::query,
    )
    .with_reply(messenger::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_receiver() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(receiver::execute, receiver::instantiate, receiver::query);
    Box::new(contract)
}

struct Suite {
    app: App,
    fee_token: Addr,
    other_token: Addr,
    messenger_a: Addr,
    messenger_b: Addr,
    messenger_c: Addr,
    receiver: Addr,
    user: Addr,
}

fn instantiate_token(app: &mut App, code_id: u64, symbol: &str, holder: &Addr) -> Addr {
    app.instantiate_contract(
        code_id,
        Addr::unchecked("admin"),
        &cw20_base::msg::InstantiateMsg {
            name: format!("{symbol} Token"),
            symbol: symbol.to_string(),
            decimals: 6,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::new(1_000_000),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        symbol,
        None,
    )
    .unwrap()
}

fn instantiate_messenger(app: &mut App, code_id: u64, chain: [u8; 4]) -> Addr {
    app.instantiate_contract(
        code_id,
        Addr::unchecked("admin"),
        &InstantiateMsg {
            blockchain_id: Binary::from(chain.to_vec()),
            admin: "admin".to_string(),
        },
        &[],
        "messenger",
        None,
    )
    .unwrap()
}

/// Have `messenger` trust `source` as the messenger of `chain`
fn trust(app: &mut App, messenger: &Addr, chain: [u8; 4], source: &Addr) {
    app.execute_contract(
        Addr::unchecked("admin"),
        messenger.clone(),
        &ExecuteMsg::SetTrustedMessenger {
            blockchain_id: Binary::from(chain.to_vec()),
            messenger_address: source.to_string(),
        },
        &[],
    )
    .unwrap();
}

fn setup() -> Suite {
    let mut app = App::default();
    let user = Addr::unchecked("user");

    let cw20_code = app.store_code(contract_cw20());
    let messenger_code = app.store_code(contract_messenger());
    let receiver_code = app.store_code(contract_receiver());

    let fee_token = instantiate_token(&mut app, cw20_code, "FEE", &user);
    let other_token = instantiate_token(&mut app, cw20_code, "OTHER", &user);

    let messenger_a = instantiate_messenger(&mut app, messenger_code, CHAIN_A);
    let messenger_b = instantiate_messenger(&mut app, messenger_code, CHAIN_B);
    let messenger_c = instantiate_messenger(&mut app, messenger_code, CHAIN_C);

    let messengers = [
        (CHAIN_A, messenger_a.clone()),
        (CHAIN_B, messenger_b.clone()),
        (CHAIN_C, messenger_c.clone()),
    ];
    for (_, local) in &messengers {
        for (chain, remote) in &messengers {
            if local != remote {
                trust(&mut app, local, *chain, remote);
            }
        }
    }

    let receiver = app
        .instantiate_contract(
            receiver_code,
            Addr::unchecked("admin"),
            &receiver::InstantiateMsg {},
            &[],
            "receiver",
            None,
        )
        .unwrap();

    Suite {
        app,
        fee_token,
        other_token,
        messenger_a,
        messenger_b,
        messenger_c,
        receiver,
        user,
    }
}

fn approve(suite: &mut Suite, token: &Addr, spender: &Addr, amount: u128) {
    suite
        .app
        .execute_contract(
            suite.user.clone(),
            token.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: spender.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
        .unwrap();
}

fn balance(suite: &Suite, token: &Addr, address: &Addr) -> Uint128 {
    let res: BalanceResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn send_input(destination: [u8; 4], to: &Addr, fee_info: FeeInfo, payload: &[u8]) -> ExecuteMsg {
    ExecuteMsg::SendCrossChainMessage(SendCrossChainMessageInput {
        destination_blockchain_id: Binary::from(destination.to_vec()),
        destination_address: to.to_string(),
        fee_info,
        required_gas_limit: 100_000,
        allowed_relayer_addresses: vec![],
        message: Binary::from(payload.to_vec()),
    })
}

/// Send `payload` from messenger A to the receiver on B with a fee in FEE
fn send_a_to_b(suite: &mut Suite, fee: u128, payload: &[u8]) -> Binary {
    if fee > 0 {
        let (token, messenger) = (suite.fee_token.clone(), suite.messenger_a.clone());
        approve(suite, &token, &messenger, fee);
    }
    let msg = send_input(
        CHAIN_B,
        &suite.receiver,
        FeeInfo::new(suite.fee_token.to_string(), Uint128::new(fee)),
        payload,
    );
    let res = suite
        .app
        .execute_contract(suite.user.clone(), suite.messenger_a.clone(), &msg, &[])
        .unwrap();
    message_id_of(&res)
}

fn message_id_of(res: &AppResponse) -> Binary {
    let data: SendCrossChainMessageResponse = from_json(res.data.as_ref().unwrap()).unwrap();
    data.message_id
}

fn sent_message(app: &App, messenger: &Addr, message_id: &Binary) -> SentMessageResponse {
    app.wrap()
        .query_wasm_smart(
            messenger,
            &QueryMsg::SentMessage {
                message_id: message_id.clone(),
            },
        )
        .unwrap()
}

/// Relay a message sent by `from` (on `source`) to `to`
fn deliver(
    suite: &mut Suite,
    from: &Addr,
    source: [u8; 4],
    to: &Addr,
    message_id: &Binary,
    relayer: &str,
) -> anyhow::Result<AppResponse> {
    let sent = sent_message(&suite.app, from, message_id);
    suite.app.execute_contract(
        Addr::unchecked(relayer),
        to.clone(),
        &ExecuteMsg::ReceiveCrossChainMessage {
            source_blockchain_id: Binary::from(source.to_vec()),
            source_messenger_address: from.to_string(),
            message: sent.message,
            relayer_reward_address: format!("{relayer}_rewards"),
        },
        &[],
    )
}

fn receiver_count(suite: &Suite) -> u64 {
    suite
        .app
        .wrap()
        .query_wasm_smart(&suite.receiver, &receiver::QueryMsg::Count {})
        .unwrap()
}

fn rewards(suite: &Suite, messenger: &Addr, relayer: &str, token: &Addr) -> Uint128 {
    let res: RelayerRewardsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            messenger,
            &QueryMsg::RelayerRewards {
                relayer: relayer.to_string(),
                fee_token_address: token.to_string(),
            },
        )
        .unwrap();
    res.amount
}

fn queue_size(suite: &Suite, messenger: &Addr, source: [u8; 4]) -> u64 {
    let res: ReceiptQueueSizeResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            messenger,
            &QueryMsg::ReceiptQueueSize {
                source_blockchain_id: Binary::from(source.to_vec()),
            },
        )
        .unwrap();
    res.size
}

/// B sends the receipt for `message_id` back to A, and it is relayed there
fn return_receipt(suite: &mut Suite, message_id: &Binary) -> AppResponse {
    let res = suite
        .app
        .execute_contract(
            Addr::unchecked("anyone"),
            suite.messenger_b.clone(),
            &ExecuteMsg::SendSpecifiedReceipts {
                source_blockchain_id: Binary::from(CHAIN_A.to_vec()),
                message_ids: vec![message_id.clone()],
                fee_info: FeeInfo::none(),
                allowed_relayer_addresses: vec![],
            },
            &[],
        )
        .unwrap();
    let receipt_message = message_id_of(&res);
    let (from, to) = (suite.messenger_b.clone(), suite.messenger_a.clone());
    deliver(suite, &from, CHAIN_B, &to, &receipt_message, "relayer_two").unwrap()
}

// ============================================================================
// Instantiate & Send
// ============================================================================

#[test]
fn test_instantiate_rejects_reserved_chain_id() {
    let mut app = App::default();
    let code_id = app.store_code(contract_messenger());

    for chain in [vec![0u8, 0, 0, 0], vec![0u8, 0, 1]] {
        let res = app.instantiate_contract(
            code_id,
            Addr::unchecked("admin"),
            &InstantiateMsg {
                blockchain_id: Binary::from(chain),
                admin: "admin".to_string(),
            },
            &[],
            "messenger",
            None,
        );
        assert!(res.is_err());
        let err_str = res.unwrap_err().root_cause().to_string();
        assert!(err_str.contains("Invalid chain ID"), "got: {}", err_str);
    }
}

#[test]
fn test_send_escrows_fee_and_assigns_predicted_id() {
    let mut suite = setup();

    let predicted: NextMessageIdResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.messenger_a,
            &QueryMsg::NextMessageId {
                destination_blockchain_id: Binary::from(CHAIN_B.to_vec()),
            },
        )
        .unwrap();

    let message_id = send_a_to_b(&mut suite, 10, b"hello");
    assert_eq!(message_id, predicted.message_id);

    assert_eq!(
        balance(&suite, &suite.fee_token, &suite.messenger_a),
        Uint128::new(10)
    );
    assert_eq!(
        balance(&suite, &suite.fee_token, &suite.user),
        Uint128::new(999_990)
    );

    let sent = sent_message(&suite.app, &suite.messenger_a, &message_id);
    assert!(!sent.delivered);
    assert_eq!(sent.fee_info.amount, Uint128::new(10));
    assert_eq!(sent.message.message_nonce, 0);
    assert_eq!(sent.message.origin_sender_address, "user");

    let config: ConfigResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.messenger_a, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.message_nonce, 1);
}

#[test]
fn test_send_rejects_invalid_input() {
    let mut suite = setup();
    let fee = FeeInfo::new(suite.fee_token.to_string(), Uint128::new(5));

    // Own chain
    let res = suite.app.execute_contract(
        suite.user.clone(),
        suite.messenger_a.clone(),
        &send_input(CHAIN_A, &suite.receiver, FeeInfo::none(), b"x"),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid destination"), "got: {}", err_str);

    // Reserved chain ID
    let res = suite.app.execute_contract(
        suite.user.clone(),
        suite.messenger_a.clone(),
        &send_input([0, 0, 0, 0], &suite.receiver, FeeInfo::none(), b"x"),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid destination"), "got: {}", err_str);

    // Zero gas
    let res = suite.app.execute_contract(
        suite.user.clone(),
        suite.messenger_a.clone(),
        &ExecuteMsg::SendCrossChainMessage(SendCrossChainMessageInput {
            destination_blockchain_id: Binary::from(CHAIN_B.to_vec()),
            destination_address: suite.receiver.to_string(),
            fee_info: FeeInfo::none(),
            required_gas_limit: 0,
            allowed_relayer_addresses: vec![],
            message: Binary::from(b"x".to_vec()),
        }),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid required gas limit"), "got: {}", err_str);

    // Fee without allowance
    let res = suite.app.execute_contract(
        suite.user.clone(),
        suite.messenger_a.clone(),
        &send_input(CHAIN_B, &suite.receiver, fee.clone(), b"x"),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Insufficient allowance"), "got: {}", err_str);

    // Fee larger than the balance
    let (token, messenger) = (suite.fee_token.clone(), suite.messenger_a.clone());
    approve(&mut suite, &token, &messenger, 2_000_000);
    let res = suite.app.execute_contract(
        suite.user.clone(),
        suite.messenger_a.clone(),
        &send_input(
            CHAIN_B,
            &suite.receiver,
            FeeInfo::new(suite.fee_token.to_string(), Uint128::new(1_500_000)),
            b"x",
        ),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Insufficient balance"), "got: {}", err_str);
}

// ============================================================================
// Delivery
// ============================================================================

#[test]
fn test_delivery_is_exactly_once() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 0, b"hello");
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    let first = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();
    let data: ReceiveCrossChainMessageResponse = from_json(first.data.unwrap()).unwrap();
    assert_eq!(data.message_id, message_id);
    assert!(!data.already_delivered);
    assert_eq!(data.receipt.relayer_reward_address, "relayer_one_rewards");

    // Racing relayer delivers the same message
    let second = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_two").unwrap();
    let data: ReceiveCrossChainMessageResponse = from_json(second.data.unwrap()).unwrap();
    assert!(data.already_delivered);
    assert_eq!(data.receipt.relayer_reward_address, "relayer_one_rewards");

    assert_eq!(receiver_count(&suite), 1);
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 1);

    let received: bool = suite
        .app
        .wrap()
        .query_wasm_smart(
            &b,
            &QueryMsg::MessageReceived {
                message_id: message_id.clone(),
            },
        )
        .unwrap();
    assert!(received);
}

#[test]
fn test_delivery_requires_trusted_source_messenger() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 0, b"hello");
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());
    deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();

    // Same message under another claimed source messenger would hash to a
    // fresh ID; it must not execute again
    let sent = sent_message(&suite.app, &a, &message_id);
    let res = suite.app.execute_contract(
        Addr::unchecked("relayer_two"),
        b.clone(),
        &ExecuteMsg::ReceiveCrossChainMessage {
            source_blockchain_id: Binary::from(CHAIN_A.to_vec()),
            source_messenger_address: "not-the-messenger".to_string(),
            message: sent.message,
            relayer_reward_address: "relayer_two_rewards".to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Untrusted source messenger"), "got: {}", err_str);
    assert_eq!(receiver_count(&suite), 1);
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 1);

    // A chain with no registered messenger cannot deliver at all
    let res = suite.app.execute_contract(
        Addr::unchecked("relayer_two"),
        b.clone(),
        &ExecuteMsg::ReceiveCrossChainMessage {
            source_blockchain_id: Binary::from(vec![0u8, 0, 0, 9]),
            source_messenger_address: a.to_string(),
            message: sent_message(&suite.app, &a, &message_id).message,
            relayer_reward_address: "relayer_two_rewards".to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Untrusted source messenger"), "got: {}", err_str);
}

#[test]
fn test_set_trusted_messenger() {
    let mut suite = setup();
    let b = suite.messenger_b.clone();
    let set = |chain: Vec<u8>, address: &str| ExecuteMsg::SetTrustedMessenger {
        blockchain_id: Binary::from(chain),
        messenger_address: address.to_string(),
    };

    let res = suite.app.execute_contract(
        Addr::unchecked("mallory"),
        b.clone(),
        &set(CHAIN_A.to_vec(), "mallory_messenger"),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);

    for (chain, address, expected) in [
        (CHAIN_B.to_vec(), "messenger", "Invalid chain ID"),
        (vec![0u8, 0, 0, 0], "messenger", "Invalid chain ID"),
        (CHAIN_A.to_vec(), "", "Invalid messenger address"),
    ] {
        let res = suite.app.execute_contract(
            Addr::unchecked("admin"),
            b.clone(),
            &set(chain, address),
            &[],
        );
        let err_str = res.unwrap_err().root_cause().to_string();
        assert!(err_str.contains(expected), "got: {}", err_str);
    }

    // Rotation replaces the previous messenger
    suite
        .app
        .execute_contract(
            Addr::unchecked("admin"),
            b.clone(),
            &set(CHAIN_A.to_vec(), "new_messenger"),
            &[],
        )
        .unwrap();
    let res: TrustedMessengerResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &b,
            &QueryMsg::TrustedMessenger {
                blockchain_id: Binary::from(CHAIN_A.to_vec()),
            },
        )
        .unwrap();
    assert_eq!(res.messenger_address, Some("new_messenger".to_string()));

    let message_id = send_a_to_b(&mut suite, 0, b"hello");
    let a = suite.messenger_a.clone();
    let res = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one");
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Untrusted source messenger"), "got: {}", err_str);
}

#[test]
fn test_payload_may_deliver_another_message() {
    let mut suite = setup();
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    let inner = send_a_to_b(&mut suite, 0, b"hello");
    let inner_delivery = to_json_vec(&ExecuteMsg::ReceiveCrossChainMessage {
        source_blockchain_id: Binary::from(CHAIN_A.to_vec()),
        source_messenger_address: a.to_string(),
        message: sent_message(&suite.app, &a, &inner).message,
        relayer_reward_address: "receiver_rewards".to_string(),
    })
    .unwrap();
    let outer = send_a_to_b(
        &mut suite,
        0,
        &[b"relay:".as_slice(), inner_delivery.as_slice()].concat(),
    );

    let res = deliver(&mut suite, &a, CHAIN_A, &b, &outer, "relayer_one").unwrap();
    assert!(!res
        .events
        .iter()
        .any(|e| e.ty == "wasm-message_execution_failed"));
    let data: ReceiveCrossChainMessageResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.message_id, outer);

    assert_eq!(receiver_count(&suite), 1);
    for id in [&inner, &outer] {
        let received: bool = suite
            .app
            .wrap()
            .query_wasm_smart(&b, &QueryMsg::MessageReceived { message_id: id.clone() })
            .unwrap();
        assert!(received);
    }
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 2);
}

#[test]
fn test_delivery_to_wrong_chain_rejected() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 0, b"hello");
    let (a, c) = (suite.messenger_a.clone(), suite.messenger_c.clone());

    let res = deliver(&mut suite, &a, CHAIN_A, &c, &message_id, "relayer_one");
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid destination"), "got: {}", err_str);
}

#[test]
fn test_allowed_relayers_enforced() {
    let mut suite = setup();
    let res = suite
        .app
        .execute_contract(
            suite.user.clone(),
            suite.messenger_a.clone(),
            &ExecuteMsg::SendCrossChainMessage(SendCrossChainMessageInput {
                destination_blockchain_id: Binary::from(CHAIN_B.to_vec()),
                destination_address: suite.receiver.to_string(),
                fee_info: FeeInfo::none(),
                required_gas_limit: 100_000,
                allowed_relayer_addresses: vec!["relayer_one".to_string()],
                message: Binary::from(b"hello".to_vec()),
            }),
            &[],
        )
        .unwrap();
    let message_id = message_id_of(&res);
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    let res = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_two");
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized relayer"), "got: {}", err_str);
    assert_eq!(receiver_count(&suite), 0);

    deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();
    assert_eq!(receiver_count(&suite), 1);

    // Once delivered, a repeat from an unlisted relayer is a plain no-op
    let res = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_two").unwrap();
    let data: ReceiveCrossChainMessageResponse = from_json(res.data.unwrap()).unwrap();
    assert!(data.already_delivered);
    assert_eq!(data.receipt.relayer_reward_address, "relayer_one_rewards");
    assert_eq!(receiver_count(&suite), 1);
}

#[test]
fn test_failed_execution_is_recorded_and_retryable() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 0, b"gated");
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    let res = deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();
    assert!(res
        .events
        .iter()
        .any(|e| e.ty == "wasm-message_execution_failed"));
    assert_eq!(receiver_count(&suite), 0);

    // Delivery stands even though execution failed
    let received: bool = suite
        .app
        .wrap()
        .query_wasm_smart(
            &b,
            &QueryMsg::MessageReceived {
                message_id: message_id.clone(),
            },
        )
        .unwrap();
    assert!(received);

    let failed: FailedMessageResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &b,
            &QueryMsg::FailedMessage {
                message_id: message_id.clone(),
            },
        )
        .unwrap();
    assert_eq!(failed.destination_address, suite.receiver.to_string());
    assert_eq!(failed.message, Binary::from(b"gated".to_vec()));

    // Retry while the cause persists reverts and keeps the record
    let retry = ExecuteMsg::RetryMessageExecution {
        message_id: message_id.clone(),
    };
    let res = suite
        .app
        .execute_contract(Addr::unchecked("anyone"), b.clone(), &retry, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("receiver is closed"), "got: {}", err_str);

    suite
        .app
        .execute_contract(
            Addr::unchecked("anyone"),
            suite.receiver.clone(),
            &receiver::ExecuteMsg::Open {},
            &[],
        )
        .unwrap();
    suite
        .app
        .execute_contract(Addr::unchecked("anyone"), b.clone(), &retry, &[])
        .unwrap();
    assert_eq!(receiver_count(&suite), 1);

    let res = suite
        .app
        .execute_contract(Addr::unchecked("anyone"), b.clone(), &retry, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("has not failed"), "got: {}", err_str);
}

#[test]
fn test_failed_payload_does_not_block_other_messages() {
    let mut suite = setup();
    let failing = send_a_to_b(&mut suite, 0, b"fail");
    let ok = send_a_to_b(&mut suite, 0, b"ok");
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    // Delivered out of order
    deliver(&mut suite, &a, CHAIN_A, &b, &ok, "relayer_one").unwrap();
    deliver(&mut suite, &a, CHAIN_A, &b, &failing, "relayer_one").unwrap();

    assert_eq!(receiver_count(&suite), 1);
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 2);
}

// ============================================================================
// Fees, Receipts & Rewards
// ============================================================================

#[test]
fn test_add_fee_amount() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 1, b"hello");
    let a = suite.messenger_a.clone();

    let add_fee = |token: &Addr, amount: u128| ExecuteMsg::AddFeeAmount {
        message_id: message_id.clone(),
        fee_token_address: token.to_string(),
        additional_fee_amount: Uint128::new(amount),
    };

    // Zero amount
    let res = suite
        .app
        .execute_contract(suite.user.clone(), a.clone(), &add_fee(&suite.fee_token, 0), &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid fee amount"), "got: {}", err_str);

    // Different token
    let res = suite.app.execute_contract(
        suite.user.clone(),
        a.clone(),
        &add_fee(&suite.other_token, 2),
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Fee token mismatch"), "got: {}", err_str);

    // Unknown message
    let res = suite.app.execute_contract(
        suite.user.clone(),
        a.clone(),
        &ExecuteMsg::AddFeeAmount {
            message_id: Binary::from(vec![7u8; 32]),
            fee_token_address: suite.fee_token.to_string(),
            additional_fee_amount: Uint128::new(2),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unknown message"), "got: {}", err_str);

    let token = suite.fee_token.clone();
    approve(&mut suite, &token, &a, 2);
    suite
        .app
        .execute_contract(suite.user.clone(), a.clone(), &add_fee(&token, 2), &[])
        .unwrap();

    let sent = sent_message(&suite.app, &a, &message_id);
    assert_eq!(sent.fee_info.amount, Uint128::new(3));
    assert_eq!(balance(&suite, &token, &a), Uint128::new(3));

    // Deliver, bring the receipt home, then the fee is final
    let b = suite.messenger_b.clone();
    deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();
    return_receipt(&mut suite, &message_id);
    assert!(sent_message(&suite.app, &a, &message_id).delivered);

    approve(&mut suite, &token, &a, 2);
    let res = suite
        .app
        .execute_contract(suite.user.clone(), a.clone(), &add_fee(&token, 2), &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("already delivered"), "got: {}", err_str);
    assert_eq!(rewards(&suite, &a, "relayer_one_rewards", &token), Uint128::new(3));
}

#[test]
fn test_receipts_piggyback_and_rewards_redeem_once() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 10, b"hello");
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());
    let token = suite.fee_token.clone();

    deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 1);

    // Any message from B to A carries the receipt
    let res = suite
        .app
        .execute_contract(
            suite.user.clone(),
            b.clone(),
            &send_input(CHAIN_A, &suite.receiver, FeeInfo::none(), b""),
            &[],
        )
        .unwrap();
    let back = message_id_of(&res);
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 0);
    assert_eq!(sent_message(&suite.app, &b, &back).message.receipts.len(), 1);

    assert_eq!(rewards(&suite, &a, "relayer_one_rewards", &token), Uint128::zero());
    deliver(&mut suite, &b, CHAIN_B, &a, &back, "relayer_two").unwrap();
    assert_eq!(rewards(&suite, &a, "relayer_one_rewards", &token), Uint128::new(10));
    assert!(sent_message(&suite.app, &a, &message_id).delivered);

    // A duplicate receipt changes nothing
    return_receipt(&mut suite, &message_id);
    assert_eq!(rewards(&suite, &a, "relayer_one_rewards", &token), Uint128::new(10));

    let redeem = ExecuteMsg::RedeemRelayerRewards {
        fee_token_address: token.to_string(),
    };
    let res = suite
        .app
        .execute_contract(Addr::unchecked("relayer_one_rewards"), a.clone(), &redeem, &[])
        .unwrap();
    let data: RedeemRelayerRewardsResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.amount, Uint128::new(10));
    assert_eq!(
        balance(&suite, &token, &Addr::unchecked("relayer_one_rewards")),
        Uint128::new(10)
    );
    assert_eq!(balance(&suite, &token, &a), Uint128::zero());

    // Redeeming an empty balance is a no-op
    let res = suite
        .app
        .execute_contract(Addr::unchecked("relayer_one_rewards"), a.clone(), &redeem, &[])
        .unwrap();
    let data: RedeemRelayerRewardsResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.amount, Uint128::zero());
}

#[test]
fn test_at_most_five_receipts_per_message() {
    let mut suite = setup();
    let (a, b) = (suite.messenger_a.clone(), suite.messenger_b.clone());

    for _ in 0..7 {
        let id = send_a_to_b(&mut suite, 0, b"");
        deliver(&mut suite, &a, CHAIN_A, &b, &id, "relayer_one").unwrap();
    }
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 7);

    let res = suite
        .app
        .execute_contract(
            suite.user.clone(),
            b.clone(),
            &send_input(CHAIN_A, &suite.receiver, FeeInfo::none(), b""),
            &[],
        )
        .unwrap();
    let back = message_id_of(&res);
    assert_eq!(sent_message(&suite.app, &b, &back).message.receipts.len(), 5);
    assert_eq!(queue_size(&suite, &b, CHAIN_A), 2);
}

#[test]
fn test_receipt_from_wrong_chain_is_ignored() {
    let mut suite = setup();
    let message_id = send_a_to_b(&mut suite, 10, b"hello");
    let (a, b, c) = (
        suite.messenger_a.clone(),
        suite.messenger_b.clone(),
        suite.messenger_c.clone(),
    );
    let token = suite.fee_token.clone();

    deliver(&mut suite, &a, CHAIN_A, &b, &message_id, "relayer_one").unwrap();

    // Chain C claims to have delivered A's message to B
    suite
        .app
        .execute_contract(
            Addr::unchecked("relayer_three"),
            a.clone(),
            &ExecuteMsg::ReceiveCrossChainMessage {
                source_blockchain_id: Binary::from(CHAIN_C.to_vec()),
                source_messenger_address: c.to_string(),
                message: CrossChainMessage {
                    message_nonce: 0,
                    origin_sender_address: "mallory".to_string(),
                    destination_blockchain_id: Binary::from(CHAIN_A.to_vec()),
                    destination_address: String::new(),
                    required_gas_limit: 0,
                    allowed_relayer_addresses: vec![],
                    receipts: vec![common::MessageReceipt {
                        message_id: message_id.clone(),
                        relayer_reward_address: "mallory".to_string(),
                    }],
                    message: Binary::default(),
                },
                relayer_reward_address: "relayer_three".to_string(),
            },
            &[],
        )
        .unwrap();

    assert!(!sent_message(&suite.app, &a, &message_id).delivered);
    assert_eq!(rewards(&suite, &a, "mallory", &token), Uint128::zero());

    // The genuine receipt from B still pays the real relayer
    return_receipt(&mut suite, &message_id);
    assert_eq!(rewards(&suite, &a, "relayer_one_rewards", &token), Uint128::new(10));
}

#[test]
fn test_specified_receipts_require_known_message() {
    let mut suite = setup();
    let res = suite.app.execute_contract(
        Addr::unchecked("anyone"),
        suite.messenger_b.clone(),
        &ExecuteMsg::SendSpecifiedReceipts {
            source_blockchain_id: Binary::from(CHAIN_A.to_vec()),
            message_ids: vec![Binary::from(vec![9u8; 32])],
            fee_info: FeeInfo::none(),
            allowed_relayer_addresses: vec![],
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unknown message"), "got: {}", err_str);
}
