// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! The single owner of campaign state and the only issuer of write
//! transactions. Built once per process and shared behind `Arc`.

mod outcome;
mod service;

pub use outcome::{create_failure_message, donate_failure_message, ActionResult};
pub use service::{CampaignDetail, CampaignService, CampaignsSnapshot, LoadState};

pub const CRATE_NAME: &str = "gotong-service";
