// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Campaign model SSOT.
//!
//! Records here are plain data. They are rebuilt from the contract after every
//! write and never patched in place.

mod address;
mod alert;
mod campaign;
mod forms;
mod routes;
mod serde_helpers;
mod stats;

pub use address::{AddressError, WalletAddress, ZERO_ADDRESS};
pub use alert::{Alert, AlertKind};
pub use campaign::{
    donators_from, normalize_campaigns, Campaign, CampaignId, Donator, ParseCampaignIdError,
    RawCampaign, PLACEHOLDER_IMAGE_URL,
};
pub use forms::{
    deadline_to_epoch_seconds, CreateCampaignForm, DonationForm, ValidatedCampaign,
    ValidationError,
};
pub use routes::{NavItem, Route, NAV_ITEMS};
pub use stats::PlatformStats;

pub const CRATE_NAME: &str = "gotong-model";
