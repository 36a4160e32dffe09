// SPDX-License-Identifier: Apache-2.0

use gotong_core::{ether_ratio, remaining_time, to_ether, Locale};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::serde_helpers::{wei_string, wei_string_vec};

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/600x400/2f3a4b/ffffff?text=Image+Not+Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(u64);

impl CampaignId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for CampaignId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCampaignIdError(pub String);

impl Display for ParseCampaignIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid campaign id `{}`", self.0)
    }
}

impl std::error::Error for ParseCampaignIdError {}

impl FromStr for CampaignId {
    type Err = ParseCampaignIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseCampaignIdError(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ParseCampaignIdError(s.to_string()))
    }
}

/// A campaign exactly as the contract binding produced it. Any field may be
/// absent when the response was partial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCampaign {
    pub owner: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub target: Option<u128>,
    pub deadline: Option<u64>,
    pub amount_collected: Option<u128>,
    pub image: Option<String>,
    pub donators: Option<Vec<String>>,
    pub donations: Option<Vec<u128>>,
}

impl RawCampaign {
    #[must_use]
    pub fn normalize(self) -> Campaign {
        Campaign {
            owner: self.owner.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            target: self.target.unwrap_or(0),
            deadline: self.deadline.unwrap_or(0),
            amount_collected: self.amount_collected.unwrap_or(0),
            image: self
                .image
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            donators: self.donators.unwrap_or_default(),
            donations: self.donations.unwrap_or_default(),
        }
    }
}

/// Normalizes a contract read. A missing payload yields an empty list.
#[must_use]
pub fn normalize_campaigns(raw: Option<Vec<RawCampaign>>) -> Vec<Campaign> {
    raw.unwrap_or_default()
        .into_iter()
        .map(RawCampaign::normalize)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub owner: String,
    pub title: String,
    pub description: String,
    #[serde(with = "wei_string")]
    pub target: u128,
    pub deadline: u64,
    #[serde(with = "wei_string")]
    pub amount_collected: u128,
    pub image: String,
    pub donators: Vec<String>,
    #[serde(with = "wei_string_vec")]
    pub donations: Vec<u128>,
}

impl Campaign {
    /// Funding progress in percent, clamped to `[0, 100]`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        (ether_ratio(self.amount_collected, self.target) * 100.0).clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn is_ended(&self, now_secs: u64) -> bool {
        self.deadline <= now_secs
    }

    #[must_use]
    pub fn remaining_time(&self, now_secs: u64, locale: Locale) -> String {
        remaining_time(self.deadline, now_secs, locale)
    }

    #[must_use]
    pub fn target_ether(&self) -> String {
        to_ether(self.target)
    }

    #[must_use]
    pub fn collected_ether(&self) -> String {
        to_ether(self.amount_collected)
    }

    /// The image to render; broken or non-http URLs fall back to the
    /// placeholder.
    #[must_use]
    pub fn display_image(&self) -> &str {
        let url = self.image.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(r) if !r.is_empty() && !r.starts_with('/') && !url.contains(char::is_whitespace) => {
                url
            }
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }

    #[must_use]
    pub fn donator_list(&self) -> Vec<Donator> {
        donators_from(&self.donators, &self.donations)
    }
}

/// One donation event with its amount rendered in ether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donator {
    pub address: String,
    pub amount: String,
}

/// Pairs donator addresses with donation amounts by position. A missing
/// amount reads as zero; surplus amounts are dropped.
#[must_use]
pub fn donators_from(addresses: &[String], amounts: &[u128]) -> Vec<Donator> {
    addresses
        .iter()
        .enumerate()
        .map(|(i, address)| Donator {
            address: address.clone(),
            amount: to_ether(amounts.get(i).copied().unwrap_or(0)),
        })
        .collect()
}
