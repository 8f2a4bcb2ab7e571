pub mod composer;
pub mod config;
pub mod domain;
pub mod estimator;
pub mod format;
pub mod guard;
pub mod intent;
pub mod ports;
pub mod review;

pub use composer::{compose, OwnerComposition};
pub use config::{GasPolicy, NativeCoin, ReviewConfig};
pub use domain::{
    CallCost, CostEstimate, Owner, OwnerSet, OwnersState, PendingOwner, RequestKey,
    TransactionIntent, TxParameters,
};
pub use estimator::CostEstimator;
pub use format::{format_amount, format_estimate, PLACEHOLDER};
pub use guard::{CancellationGuard, GuardOutcome, RequestToken};
pub use intent::{TransactionIntentBuilder, TxDefaults};
pub use ports::{AccountStatePort, CallEncoderPort, ChainEstimatorPort, PortError, SubmissionPort};
pub use review::{ReviewAddOwner, ReviewError, ReviewSummary};
