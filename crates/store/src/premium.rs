//! Premium entitlement with optional expiry.

use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::kv::KeyValueStore;
use crate::StoreError;

pub const PREMIUM_KEY: &str = "ottape-premium";

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Purchasable durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumPlan {
    Month,
    Year,
    Lifetime,
}

impl PremiumPlan {
    /// Expiry for a purchase made at `now_ms` (None never expires).
    pub fn expires_at(self, now_ms: u64) -> Option<u64> {
        match self {
            PremiumPlan::Month => Some(now_ms.saturating_add(30 * DAY_MS)),
            PremiumPlan::Year => Some(now_ms.saturating_add(365 * DAY_MS)),
            PremiumPlan::Lifetime => None,
        }
    }
}

impl FromStr for PremiumPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "1month" => Ok(PremiumPlan::Month),
            "year" | "1year" => Ok(PremiumPlan::Year),
            "lifetime" => Ok(PremiumPlan::Lifetime),
            other => Err(format!("unknown premium plan: {other}")),
        }
    }
}

/// Stored entitlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatus {
    pub is_premium: bool,
    /// Epoch milliseconds.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

impl PremiumStatus {
    pub fn active_at(&self, now_ms: u64) -> bool {
        self.is_premium && self.expires_at.map_or(true, |t| t > now_ms)
    }
}

/// Load the entitlement, removing it from storage when it has expired.
pub fn load(kv: &mut dyn KeyValueStore, now_ms: u64) -> PremiumStatus {
    let Some(raw) = kv.get(PREMIUM_KEY) else {
        return PremiumStatus::default();
    };
    let status = match serde_json::from_str::<PremiumStatus>(&raw) {
        Ok(status) => status,
        Err(err) => {
            warn!("ignoring malformed {PREMIUM_KEY}: {err}");
            return PremiumStatus::default();
        }
    };
    if status.active_at(now_ms) {
        return status;
    }
    info!("premium expired, clearing");
    if let Err(err) = kv.remove(PREMIUM_KEY) {
        warn!("failed to clear expired premium: {err}");
    }
    PremiumStatus::default()
}

pub fn activate(
    kv: &mut dyn KeyValueStore,
    plan: PremiumPlan,
    now_ms: u64,
) -> Result<PremiumStatus, StoreError> {
    let status = PremiumStatus {
        is_premium: true,
        expires_at: plan.expires_at(now_ms),
    };
    let raw = serde_json::to_string(&status).map_err(|source| StoreError::Encode {
        key: PREMIUM_KEY,
        source,
    })?;
    kv.set(PREMIUM_KEY, &raw)?;
    Ok(status)
}

pub fn deactivate(kv: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    kv.remove(PREMIUM_KEY)
}
