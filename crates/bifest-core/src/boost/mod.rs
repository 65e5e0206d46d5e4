//! Rear-side current boost estimation.

mod calculator;

pub use calculator::{
    base_boost, clearance_multiplier, compute_boost, gcr_multiplier, obstruction_multiplier,
};
