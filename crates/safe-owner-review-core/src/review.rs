//! Review step of the add-owner flow.
//!
//! [`ReviewAddOwner`] owns everything the screen shows: the merged owner
//! list, the cost estimate kept current through a [`CancellationGuard`], the
//! tx parameters coming back from the external editor, and the single
//! [`TransactionIntent`] produced on submit. Mounting captures the account
//! snapshot; closing or dropping the controller tears the guard down so late
//! estimates are ignored.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy::primitives::Address;
use thiserror::Error;

use crate::composer::{compose, OwnerComposition};
use crate::config::{NativeCoin, ReviewConfig};
use crate::domain::{
    CostEstimate, OwnersState, PendingOwner, RequestKey, TransactionIntent, TxParameters,
};
use crate::estimator::CostEstimator;
use crate::format::{format_estimate, PLACEHOLDER};
use crate::guard::{CancellationGuard, GuardOutcome};
use crate::intent::{TransactionIntentBuilder, TxDefaults};
use crate::ports::{
    AccountStatePort, CallEncoderPort, ChainEstimatorPort, PortError, SubmissionPort,
};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review screen already closed")]
    Closed,
    #[error("failed to encode add owner call: {0}")]
    Encoding(PortError),
    #[error("submission failed: {0}")]
    Submission(PortError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub account_name: String,
    pub account_address: Address,
    pub owners: OwnersState,
    pub composition: OwnerComposition,
    pub gas_costs: String,
    pub native_coin: NativeCoin,
    pub funding_notice: String,
    /// User overrides layered on the current estimate defaults.
    pub tx_parameters: TxParameters,
    pub estimate_failed: bool,
}

#[derive(Debug, Default)]
struct CostDisplay {
    latest: Option<CostEstimate>,
    last_attempt_failed: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ReviewAddOwner<E, C>
where
    E: ChainEstimatorPort,
    C: CallEncoderPort + Clone,
{
    config: ReviewConfig,
    account_name: String,
    account_address: Address,
    owners: OwnersState,
    pending: Mutex<PendingOwner>,
    parameters: Mutex<TxParameters>,
    estimator: Arc<CostEstimator<E, C>>,
    builder: TransactionIntentBuilder<C>,
    guard: CancellationGuard,
    display: Arc<Mutex<CostDisplay>>,
}

impl<E, C> ReviewAddOwner<E, C>
where
    E: ChainEstimatorPort,
    C: CallEncoderPort + Clone,
{
    pub fn mount<A>(
        config: ReviewConfig,
        account: &A,
        pending: PendingOwner,
        parameters: TxParameters,
        chain: E,
        encoder: C,
    ) -> Self
    where
        A: AccountStatePort,
    {
        let estimator = CostEstimator::new(chain, encoder.clone(), config.native_coin.clone());
        let builder = TransactionIntentBuilder::new(encoder, config.gas_policy);
        Self {
            account_name: account.account_name(),
            account_address: account.account_address(),
            owners: account.current_owners(),
            pending: Mutex::new(pending),
            parameters: Mutex::new(parameters),
            estimator: Arc::new(estimator),
            builder,
            guard: CancellationGuard::new(),
            display: Arc::new(Mutex::new(CostDisplay::default())),
            config,
        }
    }

    pub fn pending(&self) -> PendingOwner {
        lock(&self.pending).clone()
    }

    /// Estimates the currently pending owner. A no-op if that exact request
    /// already ran.
    pub fn refresh_estimate(&self) -> impl Future<Output = GuardOutcome<PortError>> {
        self.run_estimate(self.pending())
    }

    /// Replaces the pending owner and re-estimates when the owner address or
    /// threshold changed. Any estimate still in flight for older inputs will
    /// be discarded when it resolves.
    pub fn update_pending(
        &self,
        pending: PendingOwner,
    ) -> impl Future<Output = GuardOutcome<PortError>> {
        *lock(&self.pending) = pending.clone();
        self.run_estimate(pending)
    }

    fn run_estimate(
        &self,
        pending: PendingOwner,
    ) -> impl Future<Output = GuardOutcome<PortError>> {
        let target = self.account_address;
        let key = RequestKey::new(target, &pending);
        let estimator = Arc::clone(&self.estimator);
        let display = Arc::clone(&self.display);
        let applied = Arc::clone(&self.display);

        let guarded = self.guard.run_guarded(
            key,
            move || async move { estimator.estimate(target, &pending).await },
            move |estimate: CostEstimate| {
                let mut g = lock(&applied);
                g.latest = Some(estimate);
                g.last_attempt_failed = false;
            },
        );

        async move {
            let outcome = guarded.await;
            if let GuardOutcome::Failed(e) = &outcome {
                tracing::warn!(
                    target_account = %key.target_account,
                    owner = %key.owner_address,
                    threshold = key.threshold,
                    error = %e,
                    "gas estimation failed, keeping previous cost"
                );
                lock(&display).last_attempt_failed = true;
            }
            outcome
        }
    }

    pub fn latest_estimate(&self) -> Option<CostEstimate> {
        lock(&self.display).latest.clone()
    }

    pub fn gas_costs(&self) -> String {
        self.latest_estimate()
            .map(|estimate| format_estimate(&estimate))
            .unwrap_or_else(|| PLACEHOLDER.to_owned())
    }

    pub fn edit_tx_parameters(&self, parameters: TxParameters) {
        *lock(&self.parameters) = parameters;
    }

    pub fn tx_parameters(&self) -> TxParameters {
        lock(&self.parameters).clone()
    }

    pub fn summary(&self) -> ReviewSummary {
        let pending = self.pending();
        let composition = compose(&self.owners.owners_or_empty(), &pending);
        let gas_costs = self.gas_costs();
        let (latest, estimate_failed) = {
            let g = lock(&self.display);
            (g.latest.clone(), g.last_attempt_failed)
        };
        let defaults = TxDefaults::from_estimate(latest.as_ref(), &self.config.gas_policy);
        let funding_notice = format!(
            "Make sure you have {} (fee price) {} in this wallet to fund this confirmation.",
            gas_costs, self.config.native_coin.name
        );

        ReviewSummary {
            account_name: self.account_name.clone(),
            account_address: self.account_address,
            owners: self.owners.clone(),
            composition,
            gas_costs,
            native_coin: self.config.native_coin.clone(),
            funding_notice,
            tx_parameters: self.tx_parameters().layered_on(&defaults.as_parameters()),
            estimate_failed,
        }
    }

    /// Builds the intent from the latest inputs and hands it to `submission`.
    pub fn submit<S>(&self, submission: &S) -> Result<TransactionIntent, ReviewError>
    where
        S: SubmissionPort,
    {
        if self.guard.is_torn_down() {
            return Err(ReviewError::Closed);
        }
        let pending = self.pending();
        let intent = self
            .builder
            .build(
                self.account_address,
                &pending,
                &self.tx_parameters(),
                self.latest_estimate().as_ref(),
            )
            .map_err(ReviewError::Encoding)?;
        submission.submit(&intent).map_err(ReviewError::Submission)?;
        tracing::info!(
            target_account = %intent.target_account,
            owner = %pending.owner_address,
            threshold = pending.threshold,
            gas_limit = ?intent.parameters.gas_limit,
            "add owner transaction handed to submission"
        );
        Ok(intent)
    }

    pub fn close(&self) {
        self.guard.teardown();
    }

    pub fn is_closed(&self) -> bool {
        self.guard.is_torn_down()
    }
}

impl<E, C> Drop for ReviewAddOwner<E, C>
where
    E: ChainEstimatorPort,
    C: CallEncoderPort + Clone,
{
    fn drop(&mut self) {
        self.guard.teardown();
    }
}
