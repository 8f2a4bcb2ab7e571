use crate::domain::{Owner, OwnerSet, PendingOwner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerComposition {
    /// Existing owners, unchanged and in their existing order.
    pub display_owners: OwnerSet,
    /// Rendered after `display_owners` as the owner being added.
    pub new_owner: Owner,
    pub total_owners: u64,
    pub confirmations_required: u64,
}

impl OwnerComposition {
    pub fn threshold_label(&self) -> String {
        format!(
            "{} out of {} owner(s)",
            self.confirmations_required, self.total_owners
        )
    }

    pub fn owners_label(&self) -> String {
        format!("{} Safe owner(s)", self.total_owners)
    }
}

pub fn compose(existing: &OwnerSet, pending: &PendingOwner) -> OwnerComposition {
    let total_owners = existing.len() as u64 + 1;
    debug_assert!(
        (1..=total_owners).contains(&pending.threshold),
        "threshold {} outside 1..={}",
        pending.threshold,
        total_owners
    );

    OwnerComposition {
        display_owners: existing.clone(),
        new_owner: Owner {
            address: pending.owner_address,
            name: pending.owner_name.clone(),
        },
        total_owners,
        confirmations_required: pending.threshold,
    }
}
