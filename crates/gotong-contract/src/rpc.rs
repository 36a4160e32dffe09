// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use gotong_model::{CampaignId, RawCampaign, WalletAddress};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::abi::{self, Token};
use crate::config::{ConfigError, ContractConfig};
use crate::error::{ContractError, ContractErrorKind};
use crate::{CampaignContract, CreateCampaignParams, Donations, TxHash};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Talks to a JSON-RPC node for reads and to a wallet provider for
/// `eth_accounts` and `eth_sendTransaction`. Signing stays with the provider.
pub struct JsonRpcContract {
    config: ContractConfig,
    contract: WalletAddress,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcContract {
    pub fn new(config: ContractConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let contract = config.contract_address()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            config,
            contract,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    async fn request(&self, url: &str, method: &str, params: Value) -> Result<Value, ContractError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContractError::transport(format!("{method} request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(ContractError::transport(format!(
                "{method} failed status={}",
                resp.status()
            )));
        }
        let parsed: RpcResponse = resp
            .json()
            .await
            .map_err(|e| ContractError::decode(format!("{method} response parse failed: {e}")))?;
        if let Some(err) = parsed.error {
            let data = err.data.as_ref().map(|d| match d {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
            return Err(ContractError::from_rpc(err.code, &err.message, data.as_deref()));
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }

    /// Read-only requests retry transport failures with linear backoff.
    #[instrument(name = "contract_rpc_read", skip(self, params))]
    async fn request_with_retry(&self, method: &str, params: Value) -> Result<Value, ContractError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.request(&self.config.rpc_url, method, params.clone()).await {
                Err(e) if e.kind == ContractErrorKind::Transport => {
                    if attempt >= self.config.retry.max_attempts {
                        return Err(e);
                    }
                    debug!(attempt, error = %e, "retrying rpc read");
                }
                other => return other,
            }
            tokio::time::sleep(Duration::from_millis(
                self.config.retry.base_backoff_ms.saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    async fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, ContractError> {
        let params = json!([
            {"to": self.contract.as_str(), "data": hex_data(&data)},
            "latest"
        ]);
        let result = self.request_with_retry("eth_call", params).await?;
        let text = result
            .as_str()
            .ok_or_else(|| ContractError::decode("eth_call result is not a string"))?;
        decode_hex(text)
    }

    #[instrument(name = "contract_send_transaction", skip(self, from, data), fields(from = %from.as_str()))]
    async fn send_transaction(
        &self,
        from: &WalletAddress,
        data: Vec<u8>,
        value_wei: u128,
    ) -> Result<TxHash, ContractError> {
        let mut tx = json!({
            "from": from.as_str(),
            "to": self.contract.as_str(),
            "data": hex_data(&data),
        });
        if value_wei > 0 {
            tx["value"] = Value::String(format!("0x{value_wei:x}"));
        }
        let result = self
            .request(&self.config.wallet_url, "eth_sendTransaction", json!([tx]))
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| ContractError::decode("eth_sendTransaction returned no hash"))?
            .to_string();
        self.wait_for_receipt(&hash).await?;
        Ok(hash)
    }

    #[instrument(name = "contract_wait_for_receipt", skip(self))]
    async fn wait_for_receipt(&self, hash: &str) -> Result<(), ContractError> {
        for poll in 0..self.config.receipt_max_polls {
            let receipt = self
                .request_with_retry("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if let Some(status) = receipt.get("status").and_then(Value::as_str) {
                return match parse_quantity(status)? {
                    1 => Ok(()),
                    _ => Err(ContractError::reverted(format!("transaction {hash} reverted"))),
                };
            }
            debug!(poll, "receipt not yet available");
            tokio::time::sleep(self.config.receipt_poll_interval).await;
        }
        Err(ContractError::transport(format!(
            "no receipt for {hash} after {} polls",
            self.config.receipt_max_polls
        )))
    }
}

fn hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn decode_hex(text: &str) -> Result<Vec<u8>, ContractError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| ContractError::decode(format!("invalid hex payload: {e}")))
}

fn parse_quantity(text: &str) -> Result<u64, ContractError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|e| ContractError::decode(format!("invalid quantity `{text}`: {e}")))
}

fn id_arg(id: CampaignId) -> [Token; 1] {
    [Token::Uint(u128::from(id.get()))]
}

#[async_trait]
impl CampaignContract for JsonRpcContract {
    fn backend_tag(&self) -> &'static str {
        "jsonrpc"
    }

    #[instrument(name = "contract_get_campaigns", skip(self))]
    async fn get_campaigns(&self) -> Result<Option<Vec<RawCampaign>>, ContractError> {
        let data = self
            .eth_call(abi::encode_call(abi::SELECTOR_GET_CAMPAIGNS, &[]))
            .await?;
        abi::decode_campaigns(&data)
    }

    #[instrument(name = "contract_get_campaign", skip(self, id), fields(campaign_id = id.get()))]
    async fn get_campaign(&self, id: CampaignId) -> Result<RawCampaign, ContractError> {
        let data = self
            .eth_call(abi::encode_call(abi::SELECTOR_CAMPAIGNS, &id_arg(id)))
            .await?;
        abi::decode_campaign(&data)
    }

    #[instrument(name = "contract_get_donators", skip(self, id), fields(campaign_id = id.get()))]
    async fn get_donators(&self, id: CampaignId) -> Result<Donations, ContractError> {
        let data = self
            .eth_call(abi::encode_call(abi::SELECTOR_GET_DONATORS, &id_arg(id)))
            .await?;
        abi::decode_donators(&data)
    }

    #[instrument(name = "contract_number_of_campaigns", skip(self))]
    async fn number_of_campaigns(&self) -> Result<u64, ContractError> {
        let data = self
            .eth_call(abi::encode_call(abi::SELECTOR_NUMBER_OF_CAMPAIGNS, &[]))
            .await?;
        abi::decode_u64(&data)
    }

    async fn create_campaign(
        &self,
        from: &WalletAddress,
        params: &CreateCampaignParams,
    ) -> Result<TxHash, ContractError> {
        let data = abi::encode_create_campaign(
            from,
            &params.title,
            &params.description,
            params.target_wei,
            params.deadline_secs,
            &params.image,
        );
        self.send_transaction(from, data, 0).await
    }

    async fn donate_to_campaign(
        &self,
        from: &WalletAddress,
        id: CampaignId,
        value_wei: u128,
    ) -> Result<TxHash, ContractError> {
        let data = abi::encode_call(abi::SELECTOR_DONATE_TO_CAMPAIGN, &id_arg(id));
        self.send_transaction(from, data, value_wei).await
    }

    #[instrument(name = "contract_accounts", skip(self))]
    async fn accounts(&self) -> Result<Vec<WalletAddress>, ContractError> {
        let result = self
            .request(&self.config.wallet_url, "eth_accounts", json!([]))
            .await?;
        let list = result
            .as_array()
            .ok_or_else(|| ContractError::decode("eth_accounts result is not an array"))?;
        list.iter()
            .map(|v| {
                let text = v
                    .as_str()
                    .ok_or_else(|| ContractError::decode("account is not a string"))?;
                WalletAddress::parse(text)
                    .map_err(|e| ContractError::decode(format!("invalid account `{text}`: {e}")))
            })
            .collect()
    }

    #[instrument(name = "contract_chain_id", skip(self))]
    async fn chain_id(&self) -> Result<u64, ContractError> {
        let result = self.request_with_retry("eth_chainId", json!([])).await?;
        let text = result
            .as_str()
            .ok_or_else(|| ContractError::decode("eth_chainId result is not a string"))?;
        parse_quantity(text)
    }
}
