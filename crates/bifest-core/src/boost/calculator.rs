//! Deterministic boost calculation from site and mount parameters.
//!
//! All arithmetic is `Decimal`: the band values and multipliers are exact
//! decimal fractions and must compose without binary-float drift.

use rust_decimal::Decimal;

use crate::error::BoostError;
use crate::models::module::ModuleCandidate;
use crate::models::site::{BoostResult, MountType, ObstructionLevel, SiteParameters};

/// Albedo bands as (inclusive upper bound, fixed boost, tracker boost),
/// all in hundredths. The first band whose bound >= albedo wins.
const ALBEDO_BANDS: [(i64, i64, i64); 5] = [
    (11, 4, 5),
    (25, 7, 9),
    (40, 10, 12),
    (70, 15, 18),
    (100, 22, 25),
];

/// Fixed reminder appended to every estimate.
const CODE_FACTOR_NOTE: &str =
    "Apply NEC continuous factors and manufacturer max input currents.";

type Result<T> = std::result::Result<T, BoostError>;

/// Base boost fraction for a ground albedo and mounting arrangement.
///
/// Albedo outside 0.00-1.00 is rejected rather than clamped.
pub fn base_boost(albedo: Decimal, mount: MountType) -> Result<Decimal> {
    if albedo < Decimal::ZERO {
        return Err(BoostError::AlbedoOutOfRange(albedo));
    }

    for (bound, fixed, tracker) in ALBEDO_BANDS {
        if albedo <= Decimal::new(bound, 2) {
            let boost = match mount {
                MountType::Fixed => fixed,
                MountType::Tracker => tracker,
            };
            return Ok(Decimal::new(boost, 2));
        }
    }

    Err(BoostError::AlbedoOutOfRange(albedo))
}

/// Clearance-height multiplier. Boundary values fall into the next band.
pub fn clearance_multiplier(height_m: Decimal) -> Decimal {
    if height_m < Decimal::new(8, 1) {
        Decimal::new(7, 1)
    } else if height_m < Decimal::new(12, 1) {
        Decimal::new(9, 1)
    } else if height_m < Decimal::new(15, 1) {
        Decimal::ONE
    } else {
        Decimal::new(115, 2)
    }
}

/// Ground-coverage-ratio multiplier. Dense rows shade the ground view;
/// sparse rows open it up.
pub fn gcr_multiplier(gcr: Decimal) -> Decimal {
    if gcr >= Decimal::new(60, 2) {
        Decimal::new(85, 2)
    } else if gcr <= Decimal::new(40, 2) {
        Decimal::new(110, 2)
    } else {
        Decimal::ONE
    }
}

/// Rear obstruction multiplier.
pub fn obstruction_multiplier(obstruction: ObstructionLevel) -> Decimal {
    match obstruction {
        ObstructionLevel::Bulky => Decimal::new(85, 2),
        ObstructionLevel::Clear => Decimal::ONE,
    }
}

/// Compute the current boost for one module at one site.
///
/// The module's Isc and Imp must both be present and positive; the fuse
/// rating is optional and only feeds the notes.
pub fn compute_boost(site: &SiteParameters, module: &ModuleCandidate) -> Result<BoostResult> {
    let isc = module
        .isc
        .filter(|v| *v > Decimal::ZERO)
        .ok_or(BoostError::MissingInput("isc"))?;
    let imp = module
        .imp
        .filter(|v| *v > Decimal::ZERO)
        .ok_or(BoostError::MissingInput("imp"))?;

    let boost = base_boost(site.albedo, site.mount)?
        * clearance_multiplier(site.clearance_m)
        * gcr_multiplier(site.gcr)
        * obstruction_multiplier(site.obstruction);

    let factor = Decimal::ONE + boost;

    let mut notes = Vec::new();
    if let Some(fuse) = module.fuse {
        notes.push(format!("Sheet max fuse: {} A", fuse));
    }
    notes.push(CODE_FACTOR_NOTE.to_string());

    Ok(BoostResult {
        boost,
        effective_isc: isc * factor,
        effective_imp: imp * factor,
        notes,
    })
}
