pub mod abi;
pub mod account;
pub mod config;
pub mod rpc;
pub mod submission;

pub use abi::SafeAbiEncoder;
pub use account::{AccountSnapshot, StaticAccountState};
pub use config::{AdapterConfig, RuntimeProfile};
pub use rpc::RpcEstimatorAdapter;
pub use submission::QueuedSubmissionAdapter;
