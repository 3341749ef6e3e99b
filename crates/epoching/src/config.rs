//! Config loader untuk epoching module (TOML + serde).
//!
//! Field yang tidak ada di file memakai nilai default.

use anyhow::{ensure, Context, Result};
use epoching_proto::{Coin, DEFAULT_BOND_DENOM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default jumlah block per epoch.
pub const DEFAULT_EPOCH_INTERVAL: u64 = 10;

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpochingConfig {
    /// Denom yang diterima untuk staking command.
    pub bond_denom: String,

    /// Jumlah block per epoch.
    pub epoch_interval: u64,

    /// Filter untuk `tracing_subscriber::EnvFilter`.
    pub log_filter: String,
}

impl Default for EpochingConfig {
    fn default() -> Self {
        Self {
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
            epoch_interval: DEFAULT_EPOCH_INTERVAL,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EpochingConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            Coin::is_valid_denom(&self.bond_denom),
            "invalid bond denom '{}'",
            self.bond_denom
        );
        ensure!(
            self.epoch_interval >= 2,
            "epoch_interval must be at least 2, got {}",
            self.epoch_interval
        );
        Ok(())
    }

    /// Height block terakhir dari `epoch`.
    pub fn epoch_boundary(&self, epoch: u64) -> u64 {
        epoch.saturating_mul(self.epoch_interval)
    }
}

/// Load dan validasi config dari file TOML.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<EpochingConfig> {
    let p = path.as_ref();
    let s = fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
    let cfg: EpochingConfig =
        toml::from_str(&s).with_context(|| format!("parsing config {}", p.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
