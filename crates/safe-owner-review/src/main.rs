//! safe-owner-review: review the Safe transaction that adds an owner and queue it for signing

mod render;
mod request;

use safe_owner_review_adapters::{
    AdapterConfig, QueuedSubmissionAdapter, RpcEstimatorAdapter, SafeAbiEncoder,
    StaticAccountState,
};
use safe_owner_review_core::{GuardOutcome, ReviewAddOwner};

use request::ReviewRequest;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("usage: safe-owner-review <request.json>"))?;
    let request = ReviewRequest::load(&path)?;
    let config = AdapterConfig::from_env();

    tracing::info!(
        chain_id = config.chain_id,
        rpc = config.rpc_url.is_some(),
        "Starting safe-owner-review"
    );

    let account = StaticAccountState::from(request.account);
    let review = ReviewAddOwner::mount(
        config.review_config(),
        &account,
        request.pending,
        request.tx_parameters,
        RpcEstimatorAdapter::with_config(config.clone()),
        SafeAbiEncoder::new()?,
    );

    if let GuardOutcome::Applied = review.refresh_estimate().await {
        tracing::info!(gas_costs = %review.gas_costs(), "estimate ready");
    }
    print!("{}", render::review_text(&review.summary())?);

    let queue = QueuedSubmissionAdapter::in_memory();
    let intent = review.submit(&queue)?;
    println!();
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}
