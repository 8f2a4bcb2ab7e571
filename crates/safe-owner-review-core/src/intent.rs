use alloy::primitives::Address;

use crate::config::GasPolicy;
use crate::domain::{CostEstimate, PendingOwner, TransactionIntent, TxParameters};
use crate::ports::{CallEncoderPort, PortError};

/// Execution parameters derived from an estimate, before user overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxDefaults {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
}

impl TxDefaults {
    pub fn from_estimate(estimate: Option<&CostEstimate>, policy: &GasPolicy) -> Self {
        match estimate.and_then(|e| e.gas) {
            Some(cost) => Self {
                gas_limit: Some(policy.gas_limit_for(cost.gas_units)),
                gas_price: Some(cost.gas_price),
            },
            None => Self::default(),
        }
    }

    /// Reads the values an intent was built with. The gas limit is already
    /// final and is not margined again.
    pub fn from_intent(intent: &TransactionIntent) -> Self {
        Self {
            gas_limit: intent.parameters.gas_limit,
            gas_price: intent.parameters.gas_price,
        }
    }

    pub fn as_parameters(&self) -> TxParameters {
        TxParameters {
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
            ..TxParameters::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionIntentBuilder<C>
where
    C: CallEncoderPort,
{
    encoder: C,
    policy: GasPolicy,
}

impl<C> TransactionIntentBuilder<C>
where
    C: CallEncoderPort,
{
    pub fn new(encoder: C, policy: GasPolicy) -> Self {
        Self { encoder, policy }
    }

    pub fn build(
        &self,
        target_account: Address,
        pending: &PendingOwner,
        parameters: &TxParameters,
        latest_estimate: Option<&CostEstimate>,
    ) -> Result<TransactionIntent, PortError> {
        let call_data = self
            .encoder
            .encode_add_owner_call(pending.owner_address, pending.threshold)?;
        let defaults = TxDefaults::from_estimate(latest_estimate, &self.policy);
        Ok(TransactionIntent {
            target_account,
            call_data,
            parameters: parameters.layered_on(&defaults.as_parameters()),
        })
    }
}
