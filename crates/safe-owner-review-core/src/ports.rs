use std::future::Future;

use alloy::primitives::{Address, Bytes};
use thiserror::Error;

use crate::domain::{CallCost, OwnersState, TransactionIntent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("policy error: {0}")]
    Policy(String),
}

/// Read-only view of the Safe the owner is being added to.
pub trait AccountStatePort {
    fn current_owners(&self) -> OwnersState;
    fn account_name(&self) -> String;
    fn account_address(&self) -> Address;
}

pub trait ChainEstimatorPort {
    /// Gas needed for `sender` to call `target` with `call_data`, and the price per unit.
    fn estimate_call_cost(
        &self,
        sender: Address,
        target: Address,
        call_data: Bytes,
    ) -> impl Future<Output = Result<CallCost, PortError>> + Send;
}

pub trait CallEncoderPort {
    fn encode_add_owner_call(&self, owner: Address, threshold: u64) -> Result<Bytes, PortError>;
}

pub trait SubmissionPort {
    fn submit(&self, intent: &TransactionIntent) -> Result<(), PortError>;
}
