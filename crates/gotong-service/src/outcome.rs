// SPDX-License-Identifier: Apache-2.0

use gotong_contract::ContractErrorKind;
use gotong_core::{Locale, Message};
use gotong_model::Alert;
use serde::Serialize;

/// Outcome of a user action. Failures carry a message ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    #[must_use]
    pub fn ok(message: Message, locale: Locale) -> Self {
        Self {
            success: true,
            message: message.text(locale).to_string(),
        }
    }

    #[must_use]
    pub fn failed(message: Message, locale: Locale) -> Self {
        Self {
            success: false,
            message: message.text(locale).to_string(),
        }
    }

    #[must_use]
    pub fn alert(&self) -> Alert {
        Alert::from_outcome(self.success, self.message.clone())
    }
}

#[must_use]
pub const fn create_failure_message(kind: ContractErrorKind) -> Message {
    match kind {
        ContractErrorKind::WalletNotConnected => Message::WalletNotConnected,
        ContractErrorKind::UserRejected => Message::TransactionRejected,
        ContractErrorKind::InsufficientFunds => Message::InsufficientFundsForGas,
        ContractErrorKind::Reverted
        | ContractErrorKind::Transport
        | ContractErrorKind::Decode
        | ContractErrorKind::Unknown => Message::CreateFailed,
    }
}

#[must_use]
pub const fn donate_failure_message(kind: ContractErrorKind) -> Message {
    match kind {
        ContractErrorKind::WalletNotConnected => Message::WalletNotConnected,
        ContractErrorKind::UserRejected => Message::TransactionRejected,
        ContractErrorKind::InsufficientFunds => Message::InsufficientFundsForDonation,
        ContractErrorKind::Reverted
        | ContractErrorKind::Transport
        | ContractErrorKind::Decode
        | ContractErrorKind::Unknown => Message::DonateFailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotong_model::AlertKind;

    #[test]
    fn insufficient_funds_wording_depends_on_action() {
        assert_eq!(
            create_failure_message(ContractErrorKind::InsufficientFunds),
            Message::InsufficientFundsForGas
        );
        assert_eq!(
            donate_failure_message(ContractErrorKind::InsufficientFunds),
            Message::InsufficientFundsForDonation
        );
        assert_eq!(
            donate_failure_message(ContractErrorKind::Transport),
            Message::DonateFailed
        );
    }

    #[test]
    fn alert_mirrors_outcome() {
        let failed = ActionResult::failed(Message::DonateFailed, Locale::En);
        assert_eq!(failed.alert().kind, AlertKind::Error);
        assert_eq!(failed.alert().text, "Donation failed. Please try again.");
        assert!(ActionResult::ok(Message::DonateSucceeded, Locale::Id).alert().is_success());
    }
}
