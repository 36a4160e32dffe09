// SPDX-License-Identifier: Apache-2.0

use gotong_contract::{CampaignContract, ContractError, CreateCampaignParams};
use gotong_core::{ClockPort, Locale, Message};
use gotong_model::{
    donators_from, normalize_campaigns, Campaign, CampaignId, CreateCampaignForm, DonationForm,
    Donator, PlatformStats, WalletAddress,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::outcome::{create_failure_message, donate_failure_message, ActionResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignsSnapshot {
    pub pending: bool,
    pub campaigns: Vec<Campaign>,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignDetail {
    pub id: CampaignId,
    pub campaign: Campaign,
    pub donators: Vec<Donator>,
}

struct ServiceState {
    load: LoadState,
    campaigns: Vec<Campaign>,
    account: Option<WalletAddress>,
    /// Sequence number of the newest refetch whose outcome is in `load`.
    applied_seq: u64,
    /// Clock seconds of the last successful list read.
    loaded_at: Option<u64>,
}

/// Clears the in-flight flag when the write finishes, whatever the outcome.
struct WriteGuard<'a>(&'a AtomicBool);

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CampaignService {
    contract: Arc<dyn CampaignContract>,
    clock: Arc<dyn ClockPort>,
    locale: Locale,
    expected_chain_id: Option<u64>,
    preferred_account: Option<WalletAddress>,
    max_age_secs: Option<u64>,
    state: RwLock<ServiceState>,
    refetch_seq: AtomicU64,
    write_in_flight: AtomicBool,
}

impl CampaignService {
    #[must_use]
    pub fn new(
        contract: Arc<dyn CampaignContract>,
        clock: Arc<dyn ClockPort>,
        locale: Locale,
    ) -> Self {
        Self {
            contract,
            clock,
            locale,
            expected_chain_id: None,
            preferred_account: None,
            max_age_secs: None,
            state: RwLock::new(ServiceState {
                load: LoadState::Pending,
                campaigns: Vec::new(),
                account: None,
                applied_seq: 0,
                loaded_at: None,
            }),
            refetch_seq: AtomicU64::new(0),
            write_in_flight: AtomicBool::new(false),
        }
    }

    /// `connect_wallet` refuses providers on another chain.
    #[must_use]
    pub fn with_expected_chain_id(mut self, chain_id: u64) -> Self {
        self.expected_chain_id = Some(chain_id);
        self
    }

    /// `connect_wallet` picks this account when the provider offers it.
    #[must_use]
    pub fn with_preferred_account(mut self, account: Option<WalletAddress>) -> Self {
        self.preferred_account = account;
        self
    }

    /// A loaded list older than `secs` is re-read by `refresh_if_stale`.
    /// Zero disables expiry.
    #[must_use]
    pub fn with_max_age_secs(mut self, secs: u64) -> Self {
        self.max_age_secs = (secs > 0).then_some(secs);
        self
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn now_secs(&self) -> u64 {
        self.clock.now_unix_secs()
    }

    #[must_use]
    pub fn backend_tag(&self) -> &'static str {
        self.contract.backend_tag()
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    pub async fn campaigns(&self) -> CampaignsSnapshot {
        let state = self.state.read().await;
        CampaignsSnapshot {
            pending: state.load == LoadState::Pending,
            campaigns: state.campaigns.clone(),
            failure: match &state.load {
                LoadState::Failed(message) => Some(message.clone()),
                _ => None,
            },
        }
    }

    pub async fn stats(&self) -> PlatformStats {
        PlatformStats::from_campaigns(&self.state.read().await.campaigns)
    }

    pub async fn account(&self) -> Option<WalletAddress> {
        self.state.read().await.account.clone()
    }

    /// Re-reads the full campaign list. A failed read leaves the previous
    /// list in place and moves the load state to `Failed`. When reads
    /// overlap, a result older than the one already applied is dropped.
    #[instrument(name = "service_refetch", skip(self))]
    pub async fn refetch(&self) -> Result<usize, ContractError> {
        let seq = self.refetch_seq.fetch_add(1, Ordering::AcqRel) + 1;
        {
            let mut state = self.state.write().await;
            if matches!(state.load, LoadState::Failed(_)) {
                state.load = LoadState::Pending;
            }
        }
        let result = self.contract.get_campaigns().await;
        let mut state = self.state.write().await;
        if seq < state.applied_seq {
            debug!(seq, applied = state.applied_seq, "stale campaign read dropped");
            return result.map(|raw| normalize_campaigns(raw).len());
        }
        state.applied_seq = seq;
        match result {
            Ok(raw) => {
                let campaigns = normalize_campaigns(raw);
                let count = campaigns.len();
                state.campaigns = campaigns;
                state.load = LoadState::Ready;
                state.loaded_at = Some(self.clock.now_unix_secs());
                info!(count, "campaigns loaded");
                Ok(count)
            }
            Err(err) => {
                warn!(kind = %err.kind, error = %err, "campaign list read failed");
                state.load =
                    LoadState::Failed(Message::CampaignsLoadFailed.text(self.locale).to_string());
                Err(err)
            }
        }
    }

    /// Refetches when the loaded list has outlived the configured max age.
    /// Returns whether a read was issued.
    pub async fn refresh_if_stale(&self) -> bool {
        let Some(max_age) = self.max_age_secs else {
            return false;
        };
        let loaded_at = {
            let state = self.state.read().await;
            match (&state.load, state.loaded_at) {
                (LoadState::Ready, Some(at)) => at,
                _ => return false,
            }
        };
        if self.clock.now_unix_secs().saturating_sub(loaded_at) < max_age {
            return false;
        }
        debug!(loaded_at, max_age, "campaign cache expired");
        let _ = self.refetch().await;
        true
    }

    /// Switches the active account and refetches when it changed.
    pub async fn set_account(&self, account: Option<WalletAddress>) -> bool {
        {
            let mut state = self.state.write().await;
            if state.account == account {
                return false;
            }
            state.account = account;
        }
        let _ = self.refetch().await;
        true
    }

    #[instrument(name = "service_connect_wallet", skip(self))]
    pub async fn connect_wallet(&self) -> ActionResult {
        let accounts = match self.contract.accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(kind = %err.kind, error = %err, "wallet accounts unavailable");
                return ActionResult::failed(Message::NoWalletAccounts, self.locale);
            }
        };
        let chosen = self
            .preferred_account
            .as_ref()
            .filter(|preferred| accounts.contains(preferred))
            .or_else(|| accounts.first())
            .cloned();
        let Some(account) = chosen else {
            return ActionResult::failed(Message::NoWalletAccounts, self.locale);
        };
        if let Some(expected) = self.expected_chain_id {
            match self.contract.chain_id().await {
                Ok(actual) if actual == expected => {}
                Ok(actual) => {
                    warn!(expected, actual, "wallet on wrong network");
                    return ActionResult::failed(Message::WrongNetwork, self.locale);
                }
                Err(err) => {
                    warn!(kind = %err.kind, error = %err, "chain id unavailable");
                    return ActionResult::failed(Message::WrongNetwork, self.locale);
                }
            }
        }
        info!(account = account.as_str(), "wallet connected");
        self.set_account(Some(account)).await;
        ActionResult::ok(Message::WalletConnected, self.locale)
    }

    pub async fn disconnect_wallet(&self) -> ActionResult {
        self.set_account(None).await;
        ActionResult::ok(Message::WalletDisconnected, self.locale)
    }

    fn begin_write(&self) -> Option<WriteGuard<'_>> {
        self.write_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| WriteGuard(&self.write_in_flight))
    }

    #[must_use]
    pub fn write_in_flight(&self) -> bool {
        self.write_in_flight.load(Ordering::Acquire)
    }

    /// Creates a campaign owned by the connected account. The form is
    /// converted to contract units here; success is reported only after the
    /// campaign list has been re-read.
    #[instrument(name = "service_create_campaign", skip(self, form))]
    pub async fn create_campaign(&self, form: &CreateCampaignForm) -> ActionResult {
        let Some(from) = self.account().await else {
            return ActionResult::failed(Message::WalletNotConnected, self.locale);
        };
        let valid = match form.validate(self.now_secs()) {
            Ok(valid) => valid,
            Err(err) => return ActionResult::failed(err.message(), self.locale),
        };
        let Some(_guard) = self.begin_write() else {
            return ActionResult::failed(Message::TransactionInProgress, self.locale);
        };
        let params = CreateCampaignParams {
            title: valid.title,
            description: valid.description,
            target_wei: valid.target_wei,
            deadline_secs: valid.deadline_secs,
            image: valid.image,
        };
        match self.contract.create_campaign(&from, &params).await {
            Ok(tx) => {
                info!(tx = %tx, "campaign created");
                let _ = self.refetch().await;
                ActionResult::ok(Message::CreateSucceeded, self.locale)
            }
            Err(err) => {
                warn!(kind = %err.kind, error = %err, "create campaign failed");
                ActionResult::failed(create_failure_message(err.kind), self.locale)
            }
        }
    }

    /// Donates `amount` ether to campaign `id` from the connected account.
    #[instrument(name = "service_donate", skip(self, amount), fields(campaign_id = id.get()))]
    pub async fn donate_to_campaign(&self, id: CampaignId, amount: &str) -> ActionResult {
        let Some(from) = self.account().await else {
            return ActionResult::failed(Message::WalletNotConnected, self.locale);
        };
        let form = DonationForm {
            amount: amount.to_string(),
        };
        let value_wei = match form.validate() {
            Ok(v) => v,
            Err(err) => return ActionResult::failed(err.message(), self.locale),
        };
        let Some(_guard) = self.begin_write() else {
            return ActionResult::failed(Message::TransactionInProgress, self.locale);
        };
        match self.contract.donate_to_campaign(&from, id, value_wei).await {
            Ok(tx) => {
                info!(tx = %tx, "donation confirmed");
                let _ = self.refetch().await;
                ActionResult::ok(Message::DonateSucceeded, self.locale)
            }
            Err(err) => {
                warn!(kind = %err.kind, error = %err, "donation failed");
                ActionResult::failed(donate_failure_message(err.kind), self.locale)
            }
        }
    }

    /// Reads one campaign with its donators. A zero-address owner is how the
    /// contract reports an unknown id.
    #[instrument(name = "service_campaign_detail", skip(self), fields(campaign_id = id.get()))]
    pub async fn campaign_detail(
        &self,
        id: CampaignId,
    ) -> Result<Option<CampaignDetail>, ContractError> {
        let raw = self.contract.get_campaign(id).await?;
        let owner_is_zero = raw
            .owner
            .as_deref()
            .map_or(true, |o| WalletAddress::parse(o).map_or(o.is_empty(), |a| a.is_zero()));
        if owner_is_zero {
            return Ok(None);
        }
        let donations = self.contract.get_donators(id).await?;
        let mut campaign = raw.normalize();
        let donators = donators_from(&donations.donators, &donations.amounts);
        campaign.donators = donations.donators;
        campaign.donations = donations.amounts;
        Ok(Some(CampaignDetail {
            id,
            campaign,
            donators,
        }))
    }
}
