// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::collections::BTreeSet;

use crate::campaign::Campaign;
use crate::serde_helpers::wei_string;

/// Landing page counters over the current campaign list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_campaigns: usize,
    pub unique_donators: usize,
    #[serde(with = "wei_string")]
    pub total_collected_wei: u128,
}

impl PlatformStats {
    #[must_use]
    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        let donators: BTreeSet<String> = campaigns
            .iter()
            .flat_map(|c| c.donators.iter())
            .map(|a| a.to_ascii_lowercase())
            .collect();
        let total_collected_wei = campaigns
            .iter()
            .fold(0u128, |acc, c| acc.saturating_add(c.amount_collected));
        Self {
            total_campaigns: campaigns.len(),
            unique_donators: donators.len(),
            total_collected_wei,
        }
    }
}
