use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCoin {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCoin {
    fn default() -> Self {
        Self {
            name: "Ether".to_owned(),
            symbol: "ETH".to_owned(),
            decimals: 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPolicy {
    /// Added on top of the estimated gas units, in basis points.
    pub gas_limit_margin_bps: u32,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self {
            gas_limit_margin_bps: 1_000,
        }
    }
}

impl GasPolicy {
    pub fn gas_limit_for(&self, gas_units: u64) -> u64 {
        let scaled = u128::from(gas_units) * (10_000 + u128::from(self.gas_limit_margin_bps));
        u64::try_from(scaled / 10_000).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewConfig {
    pub native_coin: NativeCoin,
    pub gas_policy: GasPolicy,
}
