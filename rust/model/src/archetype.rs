// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture archetypes with realization rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Furniture category selecting which derivation formulas apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Bed,
    Chair,
    Table,
}

impl Archetype {
    /// Returns the archetype label as it appears in descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Bed => "bed",
            Archetype::Chair => "chair",
            Archetype::Table => "table",
        }
    }

    /// Whether this archetype runs the ergonomics check after realization.
    pub fn has_ergonomics_check(&self) -> bool {
        matches!(self, Archetype::Chair)
    }
}

impl FromStr for Archetype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bed" => Ok(Archetype::Bed),
            "chair" => Ok(Archetype::Chair),
            "table" => Ok(Archetype::Table),
            other => Err(Error::UnsupportedArchetype(other.to_string())),
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
