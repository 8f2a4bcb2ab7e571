use alloy::primitives::Address;
use serde::Deserialize;

use safe_owner_review_core::{AccountStatePort, OwnerSet, OwnersState, PortError};

/// Account state captured once, e.g. from a Safe info response saved to disk.
#[derive(Debug, Clone)]
pub struct StaticAccountState {
    name: String,
    address: Address,
    owners: OwnersState,
}

/// Serialized form of an account. A missing `owners` field means the owners
/// were never loaded, which is different from an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSnapshot {
    pub name: String,
    pub address: Address,
    pub owners: Option<OwnerSet>,
}

impl From<AccountSnapshot> for StaticAccountState {
    fn from(snapshot: AccountSnapshot) -> Self {
        let owners = match snapshot.owners {
            Some(owners) => OwnersState::Loaded(owners),
            None => OwnersState::Unknown,
        };
        Self::new(snapshot.name, snapshot.address, owners)
    }
}

impl StaticAccountState {
    pub fn new(name: impl Into<String>, address: Address, owners: OwnersState) -> Self {
        Self {
            name: name.into(),
            address,
            owners,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PortError> {
        let snapshot: AccountSnapshot = serde_json::from_str(raw)
            .map_err(|e| PortError::Validation(format!("invalid account snapshot: {e}")))?;
        Ok(snapshot.into())
    }
}

impl AccountStatePort for StaticAccountState {
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
