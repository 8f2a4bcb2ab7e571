//! Review request file format

use std::path::Path;

use eyre::WrapErr;
use serde::Deserialize;

use safe_owner_review_adapters::AccountSnapshot;
use safe_owner_review_core::{PendingOwner, TxParameters};

/// Everything the earlier wizard steps hand to the review step.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub account: AccountSnapshot,
    pub pending: PendingOwner,
    #[serde(default)]
    pub tx_parameters: TxParameters,
}

impl ReviewRequest {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading review request {}", path.display()))?;
        let request: Self = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("parsing review request {}", path.display()))?;
        let owners = request.account.owners.as_ref().map_or(0, |o| o.len()) as u64;
        if request.pending.threshold == 0 || request.pending.threshold > owners + 1 {
            eyre::bail!(
                "threshold {} must be between 1 and {}",
                request.pending.threshold,
                owners + 1
            );
        }
        Ok(request)
    }
}
