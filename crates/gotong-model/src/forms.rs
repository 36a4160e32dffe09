// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, NaiveDate};
use gotong_core::{to_wei, Message};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    AllFieldsRequired,
    TargetMustBePositive,
    DeadlineMustBeFuture,
    DonationMustBePositive,
}

impl ValidationError {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AllFieldsRequired => "all_fields_required",
            Self::TargetMustBePositive => "target_must_be_positive",
            Self::DeadlineMustBeFuture => "deadline_must_be_future",
            Self::DonationMustBePositive => "donation_must_be_positive",
        }
    }

    #[must_use]
    pub const fn message(self) -> Message {
        match self {
            Self::AllFieldsRequired => Message::AllFieldsRequired,
            Self::TargetMustBePositive => Message::TargetMustBePositive,
            Self::DeadlineMustBeFuture => Message::DeadlineMustBeFuture,
            Self::DonationMustBePositive => Message::DonationMustBePositive,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::error::Error for ValidationError {}

/// Converts a deadline entered as `YYYY-MM-DD` (UTC midnight) or as an
/// RFC 3339 timestamp into epoch seconds.
#[must_use]
pub fn deadline_to_epoch_seconds(input: &str) -> Option<u64> {
    let input = input.trim();
    let secs = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)?.and_utc().timestamp()
    } else {
        DateTime::parse_from_rfc3339(input).ok()?.timestamp()
    };
    u64::try_from(secs).ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCampaignForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub image: String,
}

/// A create form that passed validation, converted to contract units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCampaign {
    pub title: String,
    pub description: String,
    pub target_wei: u128,
    pub deadline_secs: u64,
    pub image: String,
}

impl CreateCampaignForm {
    pub fn validate(&self, now_secs: u64) -> Result<ValidatedCampaign, ValidationError> {
        let fields = [
            &self.title,
            &self.description,
            &self.target,
            &self.deadline,
            &self.image,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::AllFieldsRequired);
        }
        let target_wei = match to_wei(&self.target) {
            Ok(v) if v > 0 => v,
            _ => return Err(ValidationError::TargetMustBePositive),
        };
        let deadline_secs = match deadline_to_epoch_seconds(&self.deadline) {
            Some(d) if d > now_secs => d,
            _ => return Err(ValidationError::DeadlineMustBeFuture),
        };
        Ok(ValidatedCampaign {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            target_wei,
            deadline_secs,
            image: self.image.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationForm {
    #[serde(default)]
    pub amount: String,
}

impl DonationForm {
    /// Returns the donation value in wei.
    pub fn validate(&self) -> Result<u128, ValidationError> {
        match to_wei(&self.amount) {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(ValidationError::DonationMustBePositive),
        }
    }
}
