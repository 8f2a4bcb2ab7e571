//! Plain-text rendering of the review summary

use std::fmt::{self, Write};

use safe_owner_review_core::{OwnersState, ReviewSummary};

pub fn review_text(summary: &ReviewSummary) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_review(&mut out, summary)?;
    Ok(out)
}

fn write_review<W: Write>(out: &mut W, summary: &ReviewSummary) -> fmt::Result {
    let composition = &summary.composition;

    writeln!(out, "Add new owner")?;
    writeln!(out, "Safe name: {}", summary.account_name)?;
    writeln!(out, "Safe address: {}", summary.account_address)?;
    writeln!(
        out,
        "Any transaction requires the confirmation of: {}",
        composition.threshold_label()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", composition.owners_label())?;
    match &summary.owners {
        OwnersState::Loaded(_) => {
            for owner in &composition.display_owners {
                writeln!(out, "  {} {}", owner.name, owner.address)?;
            }
        }
        OwnersState::Loading => writeln!(out, "  (owners loading)")?,
        OwnersState::Unknown => writeln!(out, "  (owners unknown)")?,
    }
    writeln!(out, "ADDING NEW OWNER")?;
    writeln!(
        out,
        "  {} {}",
        composition.new_owner.name, composition.new_owner.address
    )?;
    writeln!(out)?;

    let params = &summary.tx_parameters;
    writeln!(out, "Transaction parameters")?;
    writeln!(out, "  Safe nonce: {}", optional(params.safe_nonce))?;
    writeln!(out, "  SafeTxGas: {}", optional(params.safe_tx_gas))?;
    writeln!(out, "  Nonce: {}", optional(params.eth_nonce))?;
    writeln!(out, "  Gas limit: {}", optional(params.gas_limit))?;
    writeln!(out, "  Gas price: {}", optional(params.gas_price))?;
    writeln!(out)?;
    writeln!(
        out,
        "You're about to create a transaction and will have to confirm it with your currently connected wallet."
    )?;
    writeln!(out, "{}", summary.funding_notice)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "default".to_owned(), |v| v.to_string())
}
