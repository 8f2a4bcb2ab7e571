#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes};
use tokio::sync::oneshot;

use safe_owner_review_core::{
    AccountStatePort, CallCost, CallEncoderPort, ChainEstimatorPort, Owner, OwnerSet,
    OwnersState, PendingOwner, PortError, ReviewAddOwner, ReviewConfig, SubmissionPort,
    TransactionIntent, TxParameters,
};

pub type EstimateReply = Result<CallCost, PortError>;

/// Length-prefixed stand-in for the ABI encoding: selector, owner, threshold.
#[derive(Debug, Clone, Default)]
pub struct TestEncoder;

impl CallEncoderPort for TestEncoder {
    fn encode_add_owner_call(&self, owner: Address, threshold: u64) -> Result<Bytes, PortError> {
        if threshold == 0 {
            return Err(PortError::Validation("threshold must be positive".to_owned()));
        }
        let mut out = vec![0x0d, 0x58, 0x2f, 0x13];
        out.extend_from_slice(owner.as_slice());
        out.extend_from_slice(&threshold.to_be_bytes());
        Ok(Bytes::from(out))
    }
}

pub fn call_data(owner: Address, threshold: u64) -> Bytes {
    TestEncoder
        .encode_add_owner_call(owner, threshold)
        .expect("encode test call")
}

/// Answers every call with the same reply.
#[derive(Debug, Clone)]
pub struct FixedEstimator {
    reply: EstimateReply,
    calls: Arc<Mutex<Vec<(Address, Address, Bytes)>>>,
}

impl FixedEstimator {
    pub fn ok(cost: CallCost) -> Self {
        Self {
            reply: Ok(cost),
            calls: Arc::default(),
        }
    }

    pub fn failing(error: PortError) -> Self {
        Self {
            reply: Err(error),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(Address, Address, Bytes)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl ChainEstimatorPort for FixedEstimator {
    fn estimate_call_cost(
        &self,
        sender: Address,
        target: Address,
        call_data: Bytes,
    ) -> impl Future<Output = EstimateReply> + Send {
        self.calls
            .lock()
            .expect("calls lock")
            .push((sender, target, call_data));
        let reply = self.reply.clone();
        async move { reply }
    }
}

/// Each call waits on a reply the test sends explicitly, keyed by call data.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEstimator {
    replies: Arc<Mutex<HashMap<Bytes, oneshot::Receiver<EstimateReply>>>>,
}

impl ScriptedEstimator {
    pub fn script(&self, call_data: Bytes) -> oneshot::Sender<EstimateReply> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .expect("replies lock")
            .insert(call_data, rx);
        tx
    }
}

impl ChainEstimatorPort for ScriptedEstimator {
    fn estimate_call_cost(
        &self,
        _sender: Address,
        _target: Address,
        call_data: Bytes,
    ) -> impl Future<Output = EstimateReply> + Send {
        let rx = self
            .replies
            .lock()
            .expect("replies lock")
            .remove(&call_data);
        async move {
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(PortError::Transport("reply dropped".to_owned()))),
                None => Err(PortError::NotImplemented("no scripted reply")),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestAccount {
    pub name: String,
    pub address: Address,
    pub owners: OwnersState,
}

impl AccountStatePort for TestAccount {
    fn current_owners(&self) -> OwnersState {
        self.owners.clone()
    }

    fn account_name(&self) -> String {
        self.name.clone()
    }

    fn account_address(&self) -> Address {
        self.address
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSubmission {
    pub intents: Arc<Mutex<Vec<TransactionIntent>>>,
    pub fail_with: Option<PortError>,
}

impl SubmissionPort for RecordingSubmission {
    fn submit(&self, intent: &TransactionIntent) -> Result<(), PortError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.intents
            .lock()
            .expect("intents lock")
            .push(intent.clone());
        Ok(())
    }
}

pub fn address(hex: &str) -> Address {
    hex.parse().expect("valid test address")
}

pub fn safe_address() -> Address {
    address("0x000000000000000000000000000000000000BEEF")
}

pub fn alice() -> Owner {
    Owner {
        address: address("0x000000000000000000000000000000000000000A"),
        name: "Alice".to_owned(),
    }
}

pub fn bob_address() -> Address {
    address("0x000000000000000000000000000000000000000B")
}

pub fn pending_bob(threshold: u64) -> PendingOwner {
    PendingOwner {
        owner_address: bob_address(),
        owner_name: "Bob".to_owned(),
        threshold,
    }
}

pub fn account_with_alice() -> TestAccount {
    TestAccount {
        name: "Treasury".to_owned(),
        address: safe_address(),
        owners: OwnersState::Loaded(
            OwnerSet::try_from_owners(vec![alice()]).expect("owner set"),
        ),
    }
}

pub fn two_owner_account() -> TestAccount {
    let carol = Owner {
        address: address("0x000000000000000000000000000000000000000C"),
        name: "Carol".to_owned(),
    };
    TestAccount {
        owners: OwnersState::Loaded(
            OwnerSet::try_from_owners(vec![alice(), carol]).expect("owner set"),
        ),
        ..account_with_alice()
    }
}

/// 25_000 gas at 20 gwei = 0.0005 ETH.
pub fn half_milli_eth() -> CallCost {
    CallCost {
        gas_units: 25_000,
        gas_price: 20_000_000_000,
    }
}

pub fn mount<E>(chain: E, pending: PendingOwner) -> ReviewAddOwner<E, TestEncoder>
where
    E: ChainEstimatorPort,
{
    mount_on(&account_with_alice(), chain, pending)
}

pub fn mount_on<E>(
    account: &TestAccount,
    chain: E,
    pending: PendingOwner,
) -> ReviewAddOwner<E, TestEncoder>
where
    E: ChainEstimatorPort,
{
    ReviewAddOwner::mount(
        ReviewConfig::default(),
        account,
        pending,
        TxParameters::default(),
        chain,
        TestEncoder,
    )
}
