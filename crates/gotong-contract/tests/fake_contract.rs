// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use gotong_contract::{
    CampaignContract, ContractError, ContractErrorKind, CreateCampaignParams, FakeContract,
};
use gotong_core::FixedClock;
use gotong_model::{CampaignId, WalletAddress, ZERO_ADDRESS};

const NOW: u64 = 1_760_000_000;

fn account(last: u8) -> WalletAddress {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    WalletAddress::from_bytes(bytes)
}

fn params(deadline_secs: u64) -> CreateCampaignParams {
    CreateCampaignParams {
        title: "Jembatan".to_string(),
        description: "Jembatan desa".to_string(),
        target_wei: 2_000_000_000_000_000_000,
        deadline_secs,
        image: "https://example.com/j.png".to_string(),
    }
}

fn fake() -> (FakeContract, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at(NOW));
    (FakeContract::with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn create_then_donate_updates_the_campaign() {
    let (chain, _clock) = fake();
    chain
        .create_campaign(&account(1), &params(NOW + 86_400))
        .await
        .expect("create");
    let id = CampaignId::new(0);
    chain
        .donate_to_campaign(&account(2), id, 300)
        .await
        .expect("donate");
    chain
        .donate_to_campaign(&account(2), id, 200)
        .await
        .expect("donate again");

    let list = chain.get_campaigns().await.expect("list").expect("payload");
    assert_eq!(list[0].amount_collected, Some(500));
    assert_eq!(list[0].donations, Some(vec![300, 200]));
    let donations = chain.get_donators(id).await.expect("donators");
    assert_eq!(donations.donators.len(), 2);
    assert_eq!(chain.number_of_campaigns().await.expect("count"), 1);
    assert_eq!(chain.writes(), 3);
}

#[tokio::test]
async fn writes_revert_like_the_contract() {
    let (chain, clock) = fake();
    let err = chain
        .create_campaign(&account(1), &params(NOW))
        .await
        .expect_err("past deadline");
    assert_eq!(err.kind, ContractErrorKind::Reverted);

    chain
        .create_campaign(&account(1), &params(NOW + 60))
        .await
        .expect("create");
    let missing = chain
        .donate_to_campaign(&account(2), CampaignId::new(9), 1)
        .await
        .expect_err("unknown id");
    assert_eq!(missing.kind, ContractErrorKind::Reverted);
    let zero = chain
        .donate_to_campaign(&account(2), CampaignId::new(0), 0)
        .await
        .expect_err("zero value");
    assert_eq!(zero.kind, ContractErrorKind::Reverted);

    clock.advance(61);
    let ended = chain
        .donate_to_campaign(&account(2), CampaignId::new(0), 1)
        .await
        .expect_err("ended");
    assert_eq!(ended.kind, ContractErrorKind::Reverted);
}

#[tokio::test]
async fn balance_limits_donations() {
    let (chain, _clock) = fake();
    chain
        .create_campaign(&account(1), &params(NOW + 600))
        .await
        .expect("create");
    chain.set_balance(account(3), 10).await;
    let err = chain
        .donate_to_campaign(&account(3), CampaignId::new(0), 11)
        .await
        .expect_err("too poor");
    assert_eq!(err.kind, ContractErrorKind::InsufficientFunds);
    chain
        .donate_to_campaign(&account(3), CampaignId::new(0), 10)
        .await
        .expect("exact balance");
}

#[tokio::test]
async fn unknown_campaign_reads_as_zero_struct() {
    let (chain, _clock) = fake();
    let raw = chain.get_campaign(CampaignId::new(4)).await.expect("read");
    assert_eq!(raw.owner.as_deref(), Some(ZERO_ADDRESS));
    assert!(chain
        .get_donators(CampaignId::new(4))
        .await
        .expect("donators")
        .donators
        .is_empty());
}

#[tokio::test]
async fn injected_failures_are_one_shot_or_sticky() {
    let (chain, _clock) = fake();
    chain
        .fail_next(ContractError::transport("node down"))
        .await;
    assert!(chain.get_campaigns().await.is_err());
    assert!(chain.get_campaigns().await.is_ok());

    chain
        .fail_reads(Some(ContractError::transport("node down")))
        .await;
    assert!(chain.chain_id().await.is_err());
    assert!(chain.accounts().await.is_err());
    chain.fail_reads(None).await;
    assert_eq!(chain.reads(), 4);
    assert!(chain.accounts().await.expect("accounts").is_empty());
}
