use std::collections::HashSet;

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::ports::PortError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub address: Address,
    pub name: String,
}

/// Owners in display order. Addresses are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerSet(Vec<Owner>);

impl OwnerSet {
    pub fn try_from_owners(owners: Vec<Owner>) -> Result<Self, PortError> {
        let mut seen = HashSet::with_capacity(owners.len());
        for owner in &owners {
            if !seen.insert(owner.address) {
                return Err(PortError::Validation(format!(
                    "duplicate owner address: {}",
                    owner.address
                )));
            }
        }
        Ok(Self(owners))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Owner> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for OwnerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let owners = Vec::<Owner>::deserialize(deserializer)?;
        Self::try_from_owners(owners).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a OwnerSet {
    type Item = &'a Owner;
    type IntoIter = std::slice::Iter<'a, Owner>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Owner collection as reported by the account-state provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnersState {
    Loaded(OwnerSet),
    Loading,
    Unknown,
}

impl OwnersState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, OwnersState::Loaded(_))
    }

    /// Owners for counting and display; anything not loaded counts as empty.
    pub fn owners_or_empty(&self) -> OwnerSet {
        match self {
            OwnersState::Loaded(owners) => owners.clone(),
            OwnersState::Loading | OwnersState::Unknown => OwnerSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOwner {
    pub owner_address: Address,
    pub owner_name: String,
    pub threshold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCost {
    pub gas_units: u64,
    pub gas_price: u128,
}

impl CallCost {
    pub fn total(&self) -> U256 {
        U256::from(self.gas_units) * U256::from(self.gas_price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Smallest chain unit (wei on EVM chains).
    pub raw_amount: U256,
    pub unit_decimals: u8,
    pub gas: Option<CallCost>,
}

impl CostEstimate {
    pub fn from_call_cost(cost: CallCost, unit_decimals: u8) -> Self {
        Self {
            raw_amount: cost.total(),
            unit_decimals,
            gas: Some(cost),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParameters {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
    pub max_priority_fee: Option<u128>,
    pub eth_nonce: Option<u64>,
    pub safe_nonce: Option<u64>,
    pub safe_tx_gas: Option<u64>,
}

impl TxParameters {
    /// Fields set on `self` win; the rest come from `defaults`.
    pub fn layered_on(&self, defaults: &TxParameters) -> TxParameters {
        TxParameters {
            gas_limit: self.gas_limit.or(defaults.gas_limit),
            gas_price: self.gas_price.or(defaults.gas_price),
            max_priority_fee: self.max_priority_fee.or(defaults.max_priority_fee),
            eth_nonce: self.eth_nonce.or(defaults.eth_nonce),
            safe_nonce: self.safe_nonce.or(defaults.safe_nonce),
            safe_tx_gas: self.safe_tx_gas.or(defaults.safe_tx_gas),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
    pub target_account: Address,
    pub call_data: Bytes,
    pub parameters: TxParameters,
}

/// Inputs that an estimate is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub target_account: Address,
    pub owner_address: Address,
    pub threshold: u64,
}

impl RequestKey {
    pub fn new(target_account: Address, pending: &PendingOwner) -> Self {
        Self {
            target_account,
            owner_address: pending.owner_address,
            threshold: pending.threshold,
        }
    }
}
