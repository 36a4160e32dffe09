// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Binding layer between the campaign service and the crowdfunding contract.
//!
//! Every failure leaves this crate as a [`ContractError`] with a kind already
//! assigned, so callers match on kinds and never on node error text.

pub mod abi;
mod config;
mod error;
mod fake;
mod rpc;

use async_trait::async_trait;
use gotong_model::{CampaignId, RawCampaign, WalletAddress};

pub use config::{
    ConfigError, ContractConfig, RetryPolicy, DEFAULT_CHAIN_ID, ENV_ACCOUNT, ENV_CHAIN_ID,
    ENV_CLIENT_ID, ENV_CONTRACT_ADDRESS, ENV_RPC_URL, ENV_WALLET_URL,
};
pub use error::{ContractError, ContractErrorKind};
pub use fake::FakeContract;
pub use rpc::JsonRpcContract;

pub const CRATE_NAME: &str = "gotong-contract";

pub type TxHash = String;

/// Parallel donator and amount arrays as stored on chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Donations {
    pub donators: Vec<String>,
    pub amounts: Vec<u128>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCampaignParams {
    pub title: String,
    pub description: String,
    pub target_wei: u128,
    pub deadline_secs: u64,
    pub image: String,
}

#[async_trait]
pub trait CampaignContract: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// `None` when the call returned no usable payload.
    async fn get_campaigns(&self) -> Result<Option<Vec<RawCampaign>>, ContractError>;

    async fn get_campaign(&self, id: CampaignId) -> Result<RawCampaign, ContractError>;

    async fn get_donators(&self, id: CampaignId) -> Result<Donations, ContractError>;

    async fn number_of_campaigns(&self) -> Result<u64, ContractError>;

    /// Submits `createCampaign` with `from` as owner and returns the hash once
    /// the transaction is confirmed.
    async fn create_campaign(
        &self,
        from: &WalletAddress,
        params: &CreateCampaignParams,
    ) -> Result<TxHash, ContractError>;

    /// Submits `donateToCampaign(id)` carrying `value_wei` as transaction value.
    async fn donate_to_campaign(
        &self,
        from: &WalletAddress,
        id: CampaignId,
        value_wei: u128,
    ) -> Result<TxHash, ContractError>;

    async fn accounts(&self) -> Result<Vec<WalletAddress>, ContractError>;

    async fn chain_id(&self) -> Result<u64, ContractError>;
}
