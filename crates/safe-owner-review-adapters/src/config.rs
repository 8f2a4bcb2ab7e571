use safe_owner_review_core::{GasPolicy, NativeCoin, ReviewConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub chain_id: u64,
    pub rpc_url: Option<String>,
    pub rpc_timeout_ms: u64,
    pub native_coin: NativeCoin,
    pub gas_limit_margin_bps: u32,
    /// Answer returned by the deterministic estimator when no RPC is configured.
    pub deterministic_gas_units: u64,
    pub deterministic_gas_price: u128,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            chain_id: 1,
            rpc_url: None,
            rpc_timeout_ms: 15_000,
            native_coin: NativeCoin::default(),
            gas_limit_margin_bps: GasPolicy::default().gas_limit_margin_bps,
            deterministic_gas_units: 25_000,
            deterministic_gas_price: 20_000_000_000,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `SAFE_REVIEW_*` values returned by `lookup`.
    /// Missing or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |name: &str| lookup(name).map(|v| v.trim().to_owned());
        let mut cfg = Self::default();
        if parse("SAFE_REVIEW_STRICT")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        {
            cfg.runtime_profile = RuntimeProfile::Production;
        }
        cfg.rpc_url = parse("SAFE_REVIEW_RPC_URL").filter(|s| !s.is_empty());
        if let Some(v) = parse("SAFE_REVIEW_CHAIN_ID").and_then(|v| v.parse().ok()) {
            cfg.chain_id = v;
        }
        if let Some(v) = parse("SAFE_REVIEW_RPC_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            cfg.rpc_timeout_ms = v;
        }
        if let Some(v) = lookup("SAFE_REVIEW_NATIVE_COIN_NAME") {
            cfg.native_coin.name = v;
        }
        if let Some(v) = lookup("SAFE_REVIEW_NATIVE_COIN_SYMBOL") {
            cfg.native_coin.symbol = v;
        }
        if let Some(v) = parse("SAFE_REVIEW_NATIVE_COIN_DECIMALS").and_then(|v| v.parse().ok()) {
            cfg.native_coin.decimals = v;
        }
        if let Some(v) = parse("SAFE_REVIEW_GAS_MARGIN_BPS").and_then(|v| v.parse().ok()) {
            cfg.gas_limit_margin_bps = v;
        }
        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn review_config(&self) -> ReviewConfig {
        ReviewConfig {
            native_coin: self.native_coin.clone(),
            gas_policy: GasPolicy {
                gas_limit_margin_bps: self.gas_limit_margin_bps,
            },
        }
    }
}
