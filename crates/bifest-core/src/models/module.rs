//! Module candidate model - one power-class variant mined from a datasheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One power-class variant of a module family, as inferred from the sheet.
///
/// A candidate is only ever emitted when at least `watts` or `model` was
/// positively matched; the remaining fields are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleCandidate {
    /// Manufacturer model designation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Rated power class (Pmax at STC), watts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watts: Option<u32>,

    /// Short-circuit current rating, amperes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isc: Option<Decimal>,

    /// Current at maximum power point, amperes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imp: Option<Decimal>,

    /// Maximum recommended series fuse rating, amperes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuse: Option<Decimal>,
}

impl ModuleCandidate {
    /// De-duplication identity: watt class plus model designation.
    ///
    /// Missing watts map to "NA", a missing model to the empty string.
    pub fn identity_key(&self) -> String {
        let watts = self
            .watts
            .map(|w| w.to_string())
            .unwrap_or_else(|| "NA".to_string());
        format!("{}|{}", watts, self.model.as_deref().unwrap_or(""))
    }

    /// True when no field at all was matched.
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.watts.is_none()
            && self.isc.is_none()
            && self.imp.is_none()
            && self.fuse.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_identity_key_full() {
        let candidate = ModuleCandidate {
            model: Some("JKM400M-72".to_string()),
            watts: Some(400),
            ..Default::default()
        };
        assert_eq!(candidate.identity_key(), "400|JKM400M-72");
    }

    #[test]
    fn test_identity_key_missing_fields() {
        let watts_only = ModuleCandidate {
            watts: Some(320),
            ..Default::default()
        };
        assert_eq!(watts_only.identity_key(), "320|");

        let model_only = ModuleCandidate {
            model: Some("TSM-DE09".to_string()),
            ..Default::default()
        };
        assert_eq!(model_only.identity_key(), "NA|TSM-DE09");
    }

    #[test]
    fn test_is_empty() {
        assert!(ModuleCandidate::default().is_empty());

        let with_isc = ModuleCandidate {
            isc: Some(Decimal::from_str("9.5").unwrap()),
            ..Default::default()
        };
        assert!(!with_isc.is_empty());
    }
}
