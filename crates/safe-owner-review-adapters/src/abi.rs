use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{keccak256, Address, Bytes, U256};

use safe_owner_review_core::{CallEncoderPort, PortError};

pub const ADD_OWNER_SIGNATURE: &str = "addOwnerWithThreshold(address,uint256)";

const SAFE_OWNER_MANAGER_ABI: &str = r#"[
  {
    "type": "function",
    "name": "addOwnerWithThreshold",
    "stateMutability": "nonpayable",
    "inputs": [
      {"name": "owner", "type": "address"},
      {"name": "_threshold", "type": "uint256"}
    ],
    "outputs": []
  }
]"#;

/// Encodes Safe `OwnerManager` calls from the contract's JSON ABI.
#[derive(Debug, Clone)]
pub struct SafeAbiEncoder {
    add_owner: Function,
}

impl SafeAbiEncoder {
    pub fn new() -> Result<Self, PortError> {
        let abi: JsonAbi = serde_json::from_str(SAFE_OWNER_MANAGER_ABI)
            .map_err(|e| PortError::Validation(format!("invalid abi json: {e}")))?;
        let add_owner = abi
            .function("addOwnerWithThreshold")
            .and_then(|overloads| overloads.first())
            .cloned()
            .ok_or_else(|| {
                PortError::Validation("method not found: addOwnerWithThreshold".to_owned())
            })?;
        Ok(Self { add_owner })
    }

    pub fn add_owner_selector() -> [u8; 4] {
        let hash = keccak256(ADD_OWNER_SIGNATURE.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash.as_slice()[0..4]);
        selector
    }
}

impl CallEncoderPort for SafeAbiEncoder {
    fn encode_add_owner_call(&self, owner: Address, threshold: u64) -> Result<Bytes, PortError> {
        if threshold == 0 {
            return Err(PortError::Validation(
                "threshold must be at least 1".to_owned(),
            ));
        }
        let args = [
            DynSolValue::Address(owner),
            DynSolValue::Uint(U256::from(threshold), 256),
        ];
        let encoded = self
            .add_owner
            .abi_encode_input(&args)
            .map_err(|e| PortError::Validation(format!("abi encoding failed: {e}")))?;
        if encoded.len() < 4 || encoded[0..4] != Self::add_owner_selector() {
            return Err(PortError::Validation("ABI_SELECTOR_MISMATCH".to_owned()));
        }
        Ok(Bytes::from(encoded))
    }
}
