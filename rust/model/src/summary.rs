// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Part summary adapter.
//!
//! Normalizes a description into an ordered, duplicate-free part list and
//! renders a deterministic ASCII dump:
//!
//! ```text
//! asset: chair-01
//! archetype: chair
//! detailTier: basic
//! parts:
//! - back (back)
//! - seat (seat)
//! ```

use std::fmt::Write as _;

use serde::Serialize;

use crate::description::AssetDescription;
use crate::error::Result;

/// A single normalized part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSpec {
    pub id: String,
    pub kind: String,
}

/// Normalized view of an asset description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSummary {
    pub asset_id: String,
    pub archetype: String,
    pub detail_tier: String,
    /// Parts sorted ascending by id.
    pub parts: Vec<PartSpec>,
}

impl PartSummary {
    /// Builds the summary from a parsed description.
    pub fn from_description(description: &AssetDescription) -> Self {
        // BTreeMap iteration is already ascending by key
        let parts = description
            .parts
            .iter()
            .map(|(id, part)| PartSpec {
                id: id.clone(),
                kind: part.kind.clone(),
            })
            .collect();

        Self {
            asset_id: description.asset_id.clone(),
            archetype: description.archetype.clone(),
            detail_tier: description.detail_tier.clone(),
            parts,
        }
    }

    /// Parses JSON text and summarizes it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_description(&AssetDescription::from_json(json)?))
    }

    /// Returns the part with the given id.
    pub fn part(&self, id: &str) -> Option<&PartSpec> {
        self.parts
            .binary_search_by(|p| p.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.parts[i])
    }

    /// Renders the ASCII dump, one line per part in sorted order.
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "asset: {}\narchetype: {}\ndetailTier: {}\nparts:",
            self.asset_id, self.archetype, self.detail_tier
        );
        for part in &self.parts {
            let _ = write!(out, "\n- {} ({})", part.id, part.kind);
        }
        out
    }
}

impl std::fmt::Display for PartSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "assetId": "table-07",
        "archetype": "table",
        "detailTier": "profiled",
        "parts": {
            "surface": { "kind": "surface" },
            "apron": { "kind": "trim" },
            "supports": { "kind": "supports" }
        }
    }"#;

    #[test]
    fn parts_are_sorted_by_id() {
        let summary = PartSummary::from_json(TABLE).unwrap();
        let ids: Vec<&str> = summary.parts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["apron", "supports", "surface"]);
    }

    #[test]
    fn ascii_dump_matches_layout() {
        let summary = PartSummary::from_json(TABLE).unwrap();
        assert_eq!(
            summary.to_ascii(),
            "asset: table-07\n\
             archetype: table\n\
             detailTier: profiled\n\
             parts:\n\
             - apron (trim)\n\
             - supports (supports)\n\
             - surface (surface)"
        );
        assert_eq!(summary.to_string(), summary.to_ascii());
    }

    #[test]
    fn empty_parts_render_header_only() {
        let json = r#"{"assetId":"a","archetype":"bed","detailTier":"basic","parts":{}}"#;
        let summary = PartSummary::from_json(json).unwrap();
        assert_eq!(summary.to_ascii(), "asset: a\narchetype: bed\ndetailTier: basic\nparts:");
    }

    #[test]
    fn part_lookup_is_exact() {
        let summary = PartSummary::from_json(TABLE).unwrap();
        assert_eq!(summary.part("supports").map(|p| p.kind.as_str()), Some("supports"));
        assert!(summary.part("support").is_none());
    }

    #[test]
    fn summary_is_deterministic() {
        let a = PartSummary::from_json(TABLE).unwrap();
        let b = PartSummary::from_json(TABLE).unwrap();
        assert_eq!(a, b);
    }
}
