//! Line-level noise filters.

use super::patterns::{IRRADIANCE_UNITS, TEMP_COEFFICIENT};

/// Marketing copy around bifacial gain; these lines pollute line-oriented
/// scans with current/percentage figures that are not ratings.
const NOISE_KEYWORDS: [&str; 5] = ["bifacial", "bifi", "rear", "gain", "boost"];

/// True if the line is dominated by bifacial/boost marketing language.
///
/// Applied before table and proximity scanning. The document-level
/// bifacial-presence flag is computed over unfiltered text, not here.
pub fn is_noise_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    NOISE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// True if the line states measurement conditions (irradiance, temperature
/// coefficients) whose stray 3-digit numbers look like watt classes.
pub fn is_measurement_line(line: &str) -> bool {
    IRRADIANCE_UNITS.is_match(line) || TEMP_COEFFICIENT.is_match(line)
}
