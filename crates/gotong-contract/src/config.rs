// SPDX-License-Identifier: Apache-2.0

use gotong_core::ConfigLayers;
use gotong_model::{AddressError, WalletAddress};
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

pub const ENV_CLIENT_ID: &str = "GOTONG_CLIENT_ID";
pub const ENV_CONTRACT_ADDRESS: &str = "GOTONG_CONTRACT_ADDRESS";
pub const ENV_CHAIN_ID: &str = "GOTONG_CHAIN_ID";
pub const ENV_RPC_URL: &str = "GOTONG_RPC_URL";
pub const ENV_WALLET_URL: &str = "GOTONG_WALLET_URL";
pub const ENV_ACCOUNT: &str = "GOTONG_ACCOUNT";
pub const ENV_RPC_TIMEOUT_MS: &str = "GOTONG_RPC_TIMEOUT_MS";
pub const ENV_RPC_RETRY_ATTEMPTS: &str = "GOTONG_RPC_RETRY_ATTEMPTS";
pub const ENV_RPC_RETRY_BASE_MS: &str = "GOTONG_RPC_RETRY_BASE_MS";
pub const ENV_RECEIPT_POLL_MS: &str = "GOTONG_RECEIPT_POLL_MS";
pub const ENV_RECEIPT_MAX_POLLS: &str = "GOTONG_RECEIPT_MAX_POLLS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingContractAddress,
    InvalidContractAddress(AddressError),
    InvalidAccount(AddressError),
    MissingRpcUrl,
    HttpClient(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContractAddress => write!(f, "{ENV_CONTRACT_ADDRESS} is not set"),
            Self::InvalidContractAddress(e) => write!(f, "invalid {ENV_CONTRACT_ADDRESS}: {e}"),
            Self::InvalidAccount(e) => write!(f, "invalid {ENV_ACCOUNT}: {e}"),
            Self::MissingRpcUrl => {
                write!(f, "set {ENV_RPC_URL} or {ENV_CLIENT_ID} to reach the network")
            }
            Self::HttpClient(e) => write!(f, "http client setup failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Network binding shared by every read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub client_id: Option<String>,
    pub contract_address: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub wallet_url: String,
    pub account: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub receipt_poll_interval: Duration,
    pub receipt_max_polls: u32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            contract_address: String::new(),
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: String::new(),
            wallet_url: String::new(),
            account: None,
            timeout: Duration::from_millis(15_000),
            retry: RetryPolicy::default(),
            receipt_poll_interval: Duration::from_millis(2_000),
            receipt_max_polls: 90,
        }
    }
}

fn layer_string(layers: &ConfigLayers, key: &str) -> Option<String> {
    layers
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn layer_u64(layers: &ConfigLayers, key: &str, default: u64) -> u64 {
    layers
        .get(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

impl ContractConfig {
    /// Reads every `GOTONG_*` network setting. Unparseable numbers fall back
    /// to their defaults; address checks happen in [`ContractConfig::validate`].
    #[must_use]
    pub fn from_layers(layers: &ConfigLayers) -> Self {
        let defaults = Self::default();
        let client_id = layer_string(layers, ENV_CLIENT_ID);
        let chain_id = layer_u64(layers, ENV_CHAIN_ID, defaults.chain_id);
        let rpc_url = layer_string(layers, ENV_RPC_URL)
            .or_else(|| {
                client_id
                    .as_ref()
                    .map(|id| format!("https://{chain_id}.rpc.thirdweb.com/{id}"))
            })
            .unwrap_or_default();
        let wallet_url = layer_string(layers, ENV_WALLET_URL).unwrap_or_else(|| rpc_url.clone());
        Self {
            client_id,
            contract_address: layer_string(layers, ENV_CONTRACT_ADDRESS).unwrap_or_default(),
            chain_id,
            rpc_url,
            wallet_url,
            account: layer_string(layers, ENV_ACCOUNT),
            timeout: Duration::from_millis(layer_u64(layers, ENV_RPC_TIMEOUT_MS, 15_000)),
            retry: RetryPolicy {
                max_attempts: usize::try_from(layer_u64(
                    layers,
                    ENV_RPC_RETRY_ATTEMPTS,
                    defaults.retry.max_attempts as u64,
                ))
                .unwrap_or(defaults.retry.max_attempts)
                .max(1),
                base_backoff_ms: layer_u64(
                    layers,
                    ENV_RPC_RETRY_BASE_MS,
                    defaults.retry.base_backoff_ms,
                ),
            },
            receipt_poll_interval: Duration::from_millis(layer_u64(
                layers,
                ENV_RECEIPT_POLL_MS,
                2_000,
            )),
            receipt_max_polls: u32::try_from(layer_u64(layers, ENV_RECEIPT_MAX_POLLS, 90))
                .unwrap_or(defaults.receipt_max_polls)
                .max(1),
        }
    }

    pub fn contract_address(&self) -> Result<WalletAddress, ConfigError> {
        if self.contract_address.is_empty() {
            return Err(ConfigError::MissingContractAddress);
        }
        WalletAddress::parse(&self.contract_address).map_err(ConfigError::InvalidContractAddress)
    }

    pub fn preferred_account(&self) -> Result<Option<WalletAddress>, ConfigError> {
        self.account
            .as_deref()
            .map(WalletAddress::parse)
            .transpose()
            .map_err(ConfigError::InvalidAccount)
    }

    /// Rejects a configuration that cannot reach the contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contract_address()?;
        self.preferred_account()?;
        if self.rpc_url.is_empty() || self.wallet_url.is_empty() {
            return Err(ConfigError::MissingRpcUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn layers(pairs: &[(&str, &str)]) -> ConfigLayers {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ConfigLayers::from_maps(vec![map])
    }

    #[test]
    fn rpc_url_defaults_to_client_gateway() {
        let cfg = ContractConfig::from_layers(&layers(&[
            ("GOTONG_CLIENT_ID", "abc123"),
            ("GOTONG_CONTRACT_ADDRESS", "0x00000000000000000000000000000000000000AA"),
        ]));
        assert_eq!(cfg.rpc_url, "https://11155111.rpc.thirdweb.com/abc123");
        assert_eq!(cfg.wallet_url, cfg.rpc_url);
        assert_eq!(cfg.retry, RetryPolicy::default());
        assert_eq!(cfg.receipt_max_polls, 90);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validation_rejects_unreachable_configs() {
        let cfg = ContractConfig::from_layers(&layers(&[("GOTONG_CLIENT_ID", "abc")]));
        assert_eq!(cfg.validate(), Err(ConfigError::MissingContractAddress));

        let cfg = ContractConfig::from_layers(&layers(&[
            ("GOTONG_CONTRACT_ADDRESS", "0x1234"),
            ("GOTONG_RPC_URL", "http://127.0.0.1:8545"),
        ]));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidContractAddress(_))
        ));

        let cfg = ContractConfig::from_layers(&layers(&[(
            "GOTONG_CONTRACT_ADDRESS",
            "0x00000000000000000000000000000000000000aa",
        )]));
        assert_eq!(cfg.validate(), Err(ConfigError::MissingRpcUrl));
    }

    #[test]
    fn numeric_overrides_fall_back_on_garbage() {
        let cfg = ContractConfig::from_layers(&layers(&[
            ("GOTONG_CHAIN_ID", "31337"),
            ("GOTONG_RPC_RETRY_ATTEMPTS", "zero"),
            ("GOTONG_RECEIPT_POLL_MS", "10"),
        ]));
        assert_eq!(cfg.chain_id, 31_337);
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.receipt_poll_interval, Duration::from_millis(10));
    }
}
