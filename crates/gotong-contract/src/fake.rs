// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use gotong_core::{ClockPort, SystemClock};
use gotong_model::{CampaignId, RawCampaign, WalletAddress, ZERO_ADDRESS};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::config::DEFAULT_CHAIN_ID;
use crate::error::{ContractError, ContractErrorKind};
use crate::{CampaignContract, CreateCampaignParams, Donations, TxHash};

/// In-memory stand-in for the deployed contract with the same acceptance
/// rules: writes against unknown or ended campaigns revert.
pub struct FakeContract {
    campaigns: Mutex<Vec<RawCampaign>>,
    accounts: Mutex<Vec<WalletAddress>>,
    balances: Mutex<HashMap<WalletAddress, u128>>,
    next_error: Mutex<Option<ContractError>>,
    read_failure: Mutex<Option<ContractError>>,
    write_delay: Mutex<Duration>,
    chain_id: AtomicU64,
    clock: Arc<dyn ClockPort>,
    read_calls: AtomicU64,
    write_calls: AtomicU64,
    tx_counter: AtomicU64,
}

impl Default for FakeContract {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl FakeContract {
    #[must_use]
    pub fn with_clock(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            campaigns: Mutex::new(Vec::new()),
            accounts: Mutex::new(Vec::new()),
            balances: Mutex::new(HashMap::new()),
            next_error: Mutex::new(None),
            read_failure: Mutex::new(None),
            write_delay: Mutex::new(Duration::ZERO),
            chain_id: AtomicU64::new(DEFAULT_CHAIN_ID),
            clock,
            read_calls: AtomicU64::new(0),
            write_calls: AtomicU64::new(0),
            tx_counter: AtomicU64::new(0),
        }
    }

    /// Stores a campaign as-is and returns its id.
    pub async fn seed(&self, campaign: RawCampaign) -> CampaignId {
        let mut campaigns = self.campaigns.lock().await;
        campaigns.push(campaign);
        CampaignId::new(campaigns.len() as u64 - 1)
    }

    pub async fn set_accounts(&self, accounts: Vec<WalletAddress>) {
        *self.accounts.lock().await = accounts;
    }

    pub async fn set_balance(&self, account: WalletAddress, wei: u128) {
        self.balances.lock().await.insert(account, wei);
    }

    /// The next call of any kind fails with `err`.
    pub async fn fail_next(&self, err: ContractError) {
        *self.next_error.lock().await = Some(err);
    }

    /// Every read fails with `err` until cleared with `None`.
    pub async fn fail_reads(&self, err: Option<ContractError>) {
        *self.read_failure.lock().await = err;
    }

    pub async fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().await = delay;
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.chain_id.store(chain_id, Ordering::Relaxed);
    }

    #[must_use]
    pub fn reads(&self) -> u64 {
        self.read_calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn writes(&self) -> u64 {
        self.write_calls.load(Ordering::Relaxed)
    }

    async fn begin_read(&self) -> Result<(), ContractError> {
        self.read_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.next_error.lock().await.take() {
            return Err(err);
        }
        match self.read_failure.lock().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn begin_write(&self) -> Result<(), ContractError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        let delay = *self.write_delay.lock().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.next_error.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_hash(&self) -> TxHash {
        let n = self.tx_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("0x{n:064x}")
    }
}

fn index(id: CampaignId) -> Option<usize> {
    usize::try_from(id.get()).ok()
}

#[async_trait]
impl CampaignContract for FakeContract {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn get_campaigns(&self) -> Result<Option<Vec<RawCampaign>>, ContractError> {
        self.begin_read().await?;
        Ok(Some(self.campaigns.lock().await.clone()))
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<RawCampaign, ContractError> {
        self.begin_read().await?;
        let campaigns = self.campaigns.lock().await;
        let found = index(id).and_then(|i| campaigns.get(i)).cloned();
        Ok(match found {
            Some(c) => RawCampaign {
                donators: None,
                donations: None,
                ..c
            },
            None => RawCampaign {
                owner: Some(ZERO_ADDRESS.to_string()),
                title: Some(String::new()),
                description: Some(String::new()),
                target: Some(0),
                deadline: Some(0),
                amount_collected: Some(0),
                image: Some(String::new()),
                donators: None,
                donations: None,
            },
        })
    }

    async fn get_donators(&self, id: CampaignId) -> Result<Donations, ContractError> {
        self.begin_read().await?;
        let campaigns = self.campaigns.lock().await;
        Ok(index(id)
            .and_then(|i| campaigns.get(i))
            .map(|c| Donations {
                donators: c.donators.clone().unwrap_or_default(),
                amounts: c.donations.clone().unwrap_or_default(),
            })
            .unwrap_or_default())
    }

    async fn number_of_campaigns(&self) -> Result<u64, ContractError> {
        self.begin_read().await?;
        Ok(self.campaigns.lock().await.len() as u64)
    }

    async fn create_campaign(
        &self,
        from: &WalletAddress,
        params: &CreateCampaignParams,
    ) -> Result<TxHash, ContractError> {
        self.begin_write().await?;
        if params.deadline_secs <= self.clock.now_unix_secs() {
            return Err(ContractError::reverted(
                "execution reverted: the deadline should be a date in the future",
            ));
        }
        self.campaigns.lock().await.push(RawCampaign {
            owner: Some(from.as_str().to_string()),
            title: Some(params.title.clone()),
            description: Some(params.description.clone()),
            target: Some(params.target_wei),
            deadline: Some(params.deadline_secs),
            amount_collected: Some(0),
            image: Some(params.image.clone()),
            donators: Some(Vec::new()),
            donations: Some(Vec::new()),
        });
        Ok(self.next_hash())
    }

    async fn donate_to_campaign(
        &self,
        from: &WalletAddress,
        id: CampaignId,
        value_wei: u128,
    ) -> Result<TxHash, ContractError> {
        self.begin_write().await?;
        if value_wei == 0 {
            return Err(ContractError::reverted("execution reverted: zero donation"));
        }
        let now = self.clock.now_unix_secs();
        let mut campaigns = self.campaigns.lock().await;
        let campaign = index(id)
            .and_then(|i| campaigns.get_mut(i))
            .ok_or_else(|| ContractError::reverted(format!("execution reverted: no campaign {id}")))?;
        if campaign.deadline.unwrap_or(0) <= now {
            return Err(ContractError::reverted("execution reverted: campaign ended"));
        }
        if let Some(balance) = self.balances.lock().await.get_mut(from) {
            if *balance < value_wei {
                return Err(ContractError::new(
                    ContractErrorKind::InsufficientFunds,
                    "insufficient funds for gas * price + value",
                ));
            }
            *balance -= value_wei;
        }
        campaign
            .donators
            .get_or_insert_with(Vec::new)
            .push(from.as_str().to_string());
        campaign.donations.get_or_insert_with(Vec::new).push(value_wei);
        let collected = campaign.amount_collected.unwrap_or(0);
        campaign.amount_collected = Some(collected.saturating_add(value_wei));
        Ok(self.next_hash())
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, ContractError> {
        self.begin_read().await?;
        Ok(self.accounts.lock().await.clone())
    }

    async fn chain_id(&self) -> Result<u64, ContractError> {
        self.begin_read().await?;
        Ok(self.chain_id.load(Ordering::Relaxed))
    }
}
