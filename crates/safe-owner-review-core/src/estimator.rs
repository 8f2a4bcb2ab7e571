use alloy::primitives::Address;

use crate::config::NativeCoin;
use crate::domain::{CostEstimate, PendingOwner};
use crate::ports::{CallEncoderPort, ChainEstimatorPort, PortError};

/// Prices the `addOwnerWithThreshold` call a Safe makes on itself.
#[derive(Debug, Clone)]
pub struct CostEstimator<E, C>
where
    E: ChainEstimatorPort,
    C: CallEncoderPort,
{
    chain: E,
    encoder: C,
    native_coin: NativeCoin,
}

impl<E, C> CostEstimator<E, C>
where
    E: ChainEstimatorPort,
    C: CallEncoderPort,
{
    pub fn new(chain: E, encoder: C, native_coin: NativeCoin) -> Self {
        Self {
            chain,
            encoder,
            native_coin,
        }
    }

    /// No retry on failure; a new attempt only happens when the inputs change.
    pub async fn estimate(
        &self,
        target_account: Address,
        pending: &PendingOwner,
    ) -> Result<CostEstimate, PortError> {
        let call_data = self
            .encoder
            .encode_add_owner_call(pending.owner_address, pending.threshold)?;
        let cost = self
            .chain
            .estimate_call_cost(target_account, target_account, call_data)
            .await?;
        tracing::debug!(
            target_account = %target_account,
            owner = %pending.owner_address,
            threshold = pending.threshold,
            gas_units = cost.gas_units,
            gas_price = cost.gas_price,
            "add owner call estimated"
        );
        Ok(CostEstimate::from_call_cost(
            cost,
            self.native_coin.decimals,
        ))
    }
}
