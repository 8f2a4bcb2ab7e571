use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use serde_json::Value;

use safe_owner_review_core::{CallCost, ChainEstimatorPort, PortError};

use crate::AdapterConfig;

/// Chain estimator backed by an Ethereum JSON-RPC node.
///
/// Without a configured RPC URL the adapter answers with the fixed cost from
/// [`AdapterConfig`], unless the production profile is active, in which case
/// every estimate fails with a policy error.
#[derive(Debug, Clone)]
pub struct RpcEstimatorAdapter {
    mode: EstimatorMode,
}

#[derive(Debug, Clone)]
enum EstimatorMode {
    Disabled(String),
    Deterministic(CallCost),
    Rpc(RpcRuntime),
}

#[derive(Debug, Clone)]
struct RpcRuntime {
    url: String,
    client: reqwest::Client,
    next_id: Arc<AtomicU64>,
}

impl RpcEstimatorAdapter {
    pub fn with_config(config: AdapterConfig) -> Self {
        let mode = if let Some(ref url) = config.rpc_url {
            match reqwest::Client::builder()
                .timeout(Duration::from_millis(config.rpc_timeout_ms))
                .build()
            {
                Ok(client) => EstimatorMode::Rpc(RpcRuntime {
                    url: url.clone(),
                    client,
                    next_id: Arc::new(AtomicU64::new(1)),
                }),
                Err(e) if config.strict_runtime_required() => EstimatorMode::Disabled(format!(
                    "failed to initialize rpc client in production profile: {e}"
                )),
                Err(e) => {
                    tracing::warn!(error = %e, "rpc client unavailable, using deterministic estimates");
                    EstimatorMode::Deterministic(deterministic_cost(&config))
                }
            }
        } else if config.strict_runtime_required() {
            EstimatorMode::Disabled("rpc url not configured in production runtime profile".to_owned())
        } else {
            EstimatorMode::Deterministic(deterministic_cost(&config))
        };
        Self { mode }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, EstimatorMode::Rpc(_))
    }
}

fn deterministic_cost(config: &AdapterConfig) -> CallCost {
    CallCost {
        gas_units: config.deterministic_gas_units,
        gas_price: config.deterministic_gas_price,
    }
}

impl RpcRuntime {
    async fn call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });
        tracing::debug!(method, url = %self.url, "rpc request");
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("{method} request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("{method} json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(PortError::Rpc {
                code: err.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown rpc error")
                    .to_owned(),
            });
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!("{method} status {status}: {body}")));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport(format!("{method} missing result")))
    }
}

impl ChainEstimatorPort for RpcEstimatorAdapter {
    fn estimate_call_cost(
        &self,
        sender: Address,
        target: Address,
        call_data: Bytes,
    ) -> impl Future<Output = Result<CallCost, PortError>> + Send {
        async move {
            let rpc = match &self.mode {
                EstimatorMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
                EstimatorMode::Deterministic(cost) => return Ok(*cost),
                EstimatorMode::Rpc(rpc) => rpc,
            };
            let tx = serde_json::json!({
                "from": sender.to_string(),
                "to": target.to_string(),
                "data": call_data.to_string(),
            });
            let gas = rpc.call("eth_estimateGas", serde_json::json!([tx])).await?;
            let price = rpc.call("eth_gasPrice", serde_json::json!([])).await?;
            Ok(CallCost {
                gas_units: parse_quantity(&gas, "eth_estimateGas")?,
                gas_price: parse_quantity(&price, "eth_gasPrice")?,
            })
        }
    }
}

fn parse_quantity<T>(value: &Value, method: &str) -> Result<T, PortError>
where
    T: TryFrom<u128>,
{
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Transport(format!("{method} result must be a hex string")))?;
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| PortError::Transport(format!("{method} result missing 0x prefix: {raw}")))?;
    let wide = u128::from_str_radix(digits, 16)
        .map_err(|e| PortError::Transport(format!("{method} result '{raw}' invalid: {e}")))?;
    T::try_from(wide)
        .map_err(|_| PortError::Transport(format!("{method} result '{raw}' out of range")))
}
