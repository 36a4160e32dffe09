// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractErrorKind {
    WalletNotConnected,
    UserRejected,
    InsufficientFunds,
    Reverted,
    Transport,
    Decode,
    Unknown,
}

impl ContractErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WalletNotConnected => "wallet_not_connected",
            Self::UserRejected => "user_rejected",
            Self::InsufficientFunds => "insufficient_funds",
            Self::Reverted => "reverted",
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for ContractErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ContractErrorKind::Transport, message)
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ContractErrorKind::Decode, message)
    }

    #[must_use]
    pub fn reverted(message: impl Into<String>) -> Self {
        Self::new(ContractErrorKind::Reverted, message)
    }

    /// Builds an error from a JSON-RPC error object, assigning the kind from
    /// the EIP-1193 code first and the node's message text second.
    #[must_use]
    pub fn from_rpc(code: i64, message: &str, data: Option<&str>) -> Self {
        let mut text = message.to_ascii_lowercase();
        if let Some(extra) = data {
            text.push(' ');
            text.push_str(&extra.to_ascii_lowercase());
        }
        let kind = match code {
            4001 => ContractErrorKind::UserRejected,
            4100 => ContractErrorKind::WalletNotConnected,
            _ if text.contains("user denied") || text.contains("user rejected") => {
                ContractErrorKind::UserRejected
            }
            _ if text.contains("insufficient funds") => ContractErrorKind::InsufficientFunds,
            3 => ContractErrorKind::Reverted,
            _ if text.contains("execution reverted") => ContractErrorKind::Reverted,
            _ => ContractErrorKind::Unknown,
        };
        Self::new(kind, format!("rpc error {code}: {message}"))
    }
}

impl Display for ContractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractError {}
