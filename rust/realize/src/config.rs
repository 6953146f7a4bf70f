// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Realization configuration, passed explicitly into every call.

use std::str::FromStr;

use serde::Serialize;

/// What happens to objects left in the collection by an earlier call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegenerationMode {
    /// Keep existing objects untouched; only anchors are repositioned.
    #[default]
    Preserve,
    /// Remove every object in the collection before regenerating.
    Replace,
}

impl RegenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegenerationMode::Preserve => "preserve",
            RegenerationMode::Replace => "replace",
        }
    }
}

impl FromStr for RegenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(RegenerationMode::Preserve),
            "replace" => Ok(RegenerationMode::Replace),
            other => Err(format!("unknown regeneration mode '{other}' (expected preserve or replace)")),
        }
    }
}

impl std::fmt::Display for RegenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Realization configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizeConfig {
    pub regeneration: RegenerationMode,
    /// Apply the one-shot chair anchor correction.
    pub correct_ergonomics: bool,
    /// Escalate deltas above `assertion_tolerance` to a hard failure.
    pub assert_ergonomics: bool,
    /// Deltas above this are reported (meters).
    pub logging_tolerance: f64,
    /// Deltas above this fail in assert mode (meters).
    pub assertion_tolerance: f64,
    /// Subtracted from every support's vertical extent (meters).
    pub structural_clearance: f64,
    /// Anchor spacing along X for parts without a physical mapping.
    pub part_spacing: f64,
    /// Per-instance spacing along Y for supports without a layout.
    pub support_spacing: f64,
}

impl Default for RealizeConfig {
    fn default() -> Self {
        Self {
            regeneration: RegenerationMode::Preserve,
            correct_ergonomics: false,
            assert_ergonomics: false,
            logging_tolerance: 0.02,
            assertion_tolerance: 0.005,
            structural_clearance: 0.002,
            part_spacing: 2.0,
            support_spacing: 1.0,
        }
    }
}

impl RealizeConfig {
    /// Inset used by bed and table supports.
    pub fn fixed_leg_inset(&self) -> f64 {
        self.structural_clearance * 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RealizeConfig::default();
        assert_eq!(config.regeneration, RegenerationMode::Preserve);
        assert!(!config.correct_ergonomics);
        assert!(!config.assert_ergonomics);
        assert_eq!(config.logging_tolerance, 0.02);
        assert_eq!(config.assertion_tolerance, 0.005);
        assert_eq!(config.structural_clearance, 0.002);
        assert_eq!(config.fixed_leg_inset(), 0.01);
    }

    #[test]
    fn regeneration_mode_parses() {
        assert_eq!("preserve".parse(), Ok(RegenerationMode::Preserve));
        assert_eq!("replace".parse(), Ok(RegenerationMode::Replace));
        assert!("overwrite".parse::<RegenerationMode>().is_err());
        assert_eq!(RegenerationMode::Replace.to_string(), "replace");
    }
}
