// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use furnish_realize::{RealizeConfig, RegenerationMode};

use crate::args::RealizeArgs;

/// Environment defaults for a realize run. Command line flags win.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `FURNISH_REGEN_MODE`, `preserve` or `replace`.
    pub regeneration: RegenerationMode,
    /// `FURNISH_CORRECT`
    pub correct_ergonomics: bool,
    /// `FURNISH_ASSERT`
    pub assert_ergonomics: bool,
    /// `FURNISH_LOG_TOLERANCE` in meters.
    pub logging_tolerance: f64,
    /// `FURNISH_ASSERT_TOLERANCE` in meters.
    pub assertion_tolerance: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RealizeConfig::default();
        Self {
            regeneration: lookup("FURNISH_REGEN_MODE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.regeneration),
            correct_ergonomics: lookup("FURNISH_CORRECT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.correct_ergonomics),
            assert_ergonomics: lookup("FURNISH_ASSERT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.assert_ergonomics),
            logging_tolerance: lookup("FURNISH_LOG_TOLERANCE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.logging_tolerance),
            assertion_tolerance: lookup("FURNISH_ASSERT_TOLERANCE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.assertion_tolerance),
        }
    }

    /// Merges command line overrides into a realizer configuration.
    pub fn realize_config(&self, args: &RealizeArgs) -> RealizeConfig {
        RealizeConfig {
            regeneration: args.mode.unwrap_or(self.regeneration),
            correct_ergonomics: args.correct || self.correct_ergonomics,
            assert_ergonomics: args.assert || self.assert_ergonomics,
            logging_tolerance: self.logging_tolerance,
            assertion_tolerance: self.assertion_tolerance,
            ..RealizeConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
