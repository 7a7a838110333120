//! One simulated chain: an `App`, its messenger and the stored contract codes.

use common::{chain_id_binary, chain_id_hex, ChainId};
use cosmwasm_std::{Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use tracing::info;

use messenger::msg::{
    ExecuteMsg as MessengerExecuteMsg, QueryMsg as MessengerQueryMsg, RelayerRewardsResponse,
    SentMessageResponse,
};
use token_home::msg::RemoteSettingsResponse;

/// Owner of every contract deployed by the harness
pub const ADMIN: &str = "admin";

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

fn contract_messenger() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            messenger::contract::execute,
            messenger::contract::instantiate,
            messenger::contract::query,
        )
        .with_reply(messenger::contract::reply),
    )
}

fn contract_token_home() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        token_home::contract::execute,
        token_home::contract::instantiate,
        token_home::contract::query,
    ))
}

fn contract_token_remote() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        token_remote::contract::execute,
        token_remote::contract::instantiate,
        token_remote::contract::query,
    ))
}

struct Codes {
    cw20: u64,
    token_home: u64,
    token_remote: u64,
}

/// Parameters of a token remote pointing at a home on another chain
pub struct RemoteDeployment {
    pub home_blockchain_id: ChainId,
    pub home_transferrer_address: String,
    pub home_token_decimals: u8,
    pub initial_reserve_imbalance: Uint128,
}

pub struct Chain {
    pub name: String,
    pub blockchain_id: ChainId,
    pub app: App,
    pub messenger: Addr,
    codes: Codes,
}

impl Chain {
    /// Start a chain with its messenger deployed
    pub fn new(name: &str, blockchain_id: ChainId) -> anyhow::Result<Self> {
        let mut app = App::default();
        let cw20 = app.store_code(contract_cw20());
        let messenger_code = app.store_code(contract_messenger());
        let token_home = app.store_code(contract_token_home());
        let token_remote = app.store_code(contract_token_remote());

        let messenger = app.instantiate_contract(
            messenger_code,
            Addr::unchecked(ADMIN),
            &messenger::msg::InstantiateMsg {
                blockchain_id: chain_id_binary(&blockchain_id),
                admin: ADMIN.to_string(),
            },
            &[],
            "messenger",
            None,
        )?;
        info!(
            chain = name,
            blockchain_id = %chain_id_hex(&blockchain_id),
            messenger = %messenger,
            "Chain started"
        );

        Ok(Self {
            name: name.to_string(),
            blockchain_id,
            app,
            messenger,
            codes: Codes {
                cw20,
                token_home,
                token_remote,
            },
        })
    }

    pub fn blockchain_id_binary(&self) -> Binary {
        chain_id_binary(&self.blockchain_id)
    }

    /// Accept messages from `other`'s messenger
    pub fn trust(&mut self, other: &Chain) -> anyhow::Result<AppResponse> {
        let res = self.app.execute_contract(
            Addr::unchecked(ADMIN),
            self.messenger.clone(),
            &MessengerExecuteMsg::SetTrustedMessenger {
                blockchain_id: other.blockchain_id_binary(),
                messenger_address: other.messenger.to_string(),
            },
            &[],
        )?;
        info!(chain = %self.name, trusted = %other.name, "Messenger trusted");
        Ok(res)
    }

    /// Deploy a CW20 token minted by [`ADMIN`]
    pub fn deploy_token(
        &mut self,
        symbol: &str,
        decimals: u8,
        holders: &[(&str, u128)],
    ) -> anyhow::Result<Addr> {
        let token = self.app.instantiate_contract(
            self.codes.cw20,
            Addr::unchecked(ADMIN),
            &cw20_base::msg::InstantiateMsg {
                name: format!("{symbol} Token"),
                symbol: symbol.to_string(),
                decimals,
                initial_balances: holders
                    .iter()
                    .map(|(address, amount)| Cw20Coin {
                        address: address.to_string(),
                        amount: Uint128::new(*amount),
                    })
                    .collect(),
                mint: Some(MinterResponse {
                    minter: ADMIN.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            symbol,
            None,
        )?;
        info!(chain = %self.name, symbol, token = %token, "Token deployed");
        Ok(token)
    }

    pub fn deploy_token_home(&mut self, token: &Addr) -> anyhow::Result<Addr> {
        let home = self.app.instantiate_contract(
            self.codes.token_home,
            Addr::unchecked(ADMIN),
            &token_home::msg::InstantiateMsg {
                admin: ADMIN.to_string(),
                messenger: self.messenger.to_string(),
                token: token.to_string(),
            },
            &[],
            "token-home",
            None,
        )?;
        info!(chain = %self.name, home = %home, "Token home deployed");
        Ok(home)
    }

    /// Deploy a token remote for `token` and hand it the minter role
    pub fn deploy_token_remote(
        &mut self,
        token: &Addr,
        deployment: RemoteDeployment,
    ) -> anyhow::Result<Addr> {
        let remote = self.app.instantiate_contract(
            self.codes.token_remote,
            Addr::unchecked(ADMIN),
            &token_remote::msg::InstantiateMsg {
                messenger: self.messenger.to_string(),
                home_blockchain_id: chain_id_binary(&deployment.home_blockchain_id),
                home_transferrer_address: deployment.home_transferrer_address,
                token: token.to_string(),
                home_token_decimals: deployment.home_token_decimals,
                initial_reserve_imbalance: deployment.initial_reserve_imbalance,
            },
            &[],
            "token-remote",
            None,
        )?;
        self.app.execute_contract(
            Addr::unchecked(ADMIN),
            token.clone(),
            &Cw20ExecuteMsg::UpdateMinter {
                new_minter: Some(remote.to_string()),
            },
            &[],
        )?;
        info!(chain = %self.name, remote = %remote, "Token remote deployed");
        Ok(remote)
    }

    pub fn approve(
        &mut self,
        owner: &str,
        token: &Addr,
        spender: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(owner),
            token.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: spender.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
    }

    pub fn balance(&self, token: &Addr, address: &str) -> anyhow::Result<Uint128> {
        let res: BalanceResponse = self.app.wrap().query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )?;
        Ok(res.balance)
    }

    pub fn total_supply(&self, token: &Addr) -> anyhow::Result<Uint128> {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
        Ok(res.total_supply)
    }

    pub fn sent_message(&self, message_id: &Binary) -> anyhow::Result<SentMessageResponse> {
        Ok(self.app.wrap().query_wasm_smart(
            &self.messenger,
            &MessengerQueryMsg::SentMessage {
                message_id: message_id.clone(),
            },
        )?)
    }

    pub fn message_received(&self, message_id: &Binary) -> anyhow::Result<bool> {
        Ok(self.app.wrap().query_wasm_smart(
            &self.messenger,
            &MessengerQueryMsg::MessageReceived {
                message_id: message_id.clone(),
            },
        )?)
    }

    pub fn relayer_rewards(&self, relayer: &str, fee_token: &Addr) -> anyhow::Result<Uint128> {
        let res: RelayerRewardsResponse = self.app.wrap().query_wasm_smart(
            &self.messenger,
            &MessengerQueryMsg::RelayerRewards {
                relayer: relayer.to_string(),
                fee_token_address: fee_token.to_string(),
            },
        )?;
        Ok(res.amount)
    }

    /// Collateral ledger entry of `remote` (on `remote_chain`) held by `home`
    pub fn remote_settings(
        &self,
        home: &Addr,
        remote_chain: &Chain,
        remote: &Addr,
    ) -> anyhow::Result<RemoteSettingsResponse> {
        Ok(self.app.wrap().query_wasm_smart(
            home,
            &token_home::msg::QueryMsg::RemoteSettings {
                remote_blockchain_id: remote_chain.blockchain_id_binary(),
                remote_transferrer_address: remote.to_string(),
            },
        )?)
    }
}

/// Let `a` and `b` exchange messages in both directions
pub fn connect(a: &mut Chain, b: &mut Chain) -> anyhow::Result<()> {
    a.trust(b)?;
    b.trust(a)?;
    Ok(())
}
