//! Site and mount parameters, and the derived boost result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mounting arrangement of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountType {
    /// Fixed-tilt racking.
    Fixed,
    /// Single-axis tracker.
    Tracker,
}

/// How cluttered the space beneath the array is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstructionLevel {
    /// Open underside, little rear shading.
    Clear,
    /// Bulky racking, trays, or equipment under the modules.
    Bulky,
}

/// Caller-supplied site and mount parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteParameters {
    /// Ground reflectance fraction (0.0 - 1.0).
    pub albedo: Decimal,

    /// Mounting arrangement.
    pub mount: MountType,

    /// Module clearance height above ground, meters.
    pub clearance_m: Decimal,

    /// Ground coverage ratio (0.0 - 1.0).
    pub gcr: Decimal,

    /// Rear-side obstruction level.
    pub obstruction: ObstructionLevel,
}

/// Deterministic boost estimate for one module at one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostResult {
    /// Multiplicative current boost fraction (e.g. 0.063 for +6.3%).
    pub boost: Decimal,

    /// Isc scaled by (1 + boost), amperes.
    pub effective_isc: Decimal,

    /// Imp scaled by (1 + boost), amperes.
    pub effective_imp: Decimal,

    /// Advisory notes (sheet fuse rating, code-factor reminder).
    pub notes: Vec<String>,
}
