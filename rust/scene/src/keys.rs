// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for scene storage and object identity.
//!
//! Arena keys ([`ObjectId`], [`CollectionId`], [`MeshId`]) are generational
//! slot map keys: they stay valid after other entries are removed. They are
//! host handles and carry no meaning across runs. [`ObjectKey`] is the stable
//! identity that survives persistence.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for a scene object (anchor or mesh instance).
    pub struct ObjectId;

    /// Key for a collection of objects.
    pub struct CollectionId;

    /// Key for mesh data shared by instances.
    pub struct MeshId;
}

/// Position of an object within its part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    /// The per-part anchor all instances are parented to.
    Anchor,
    /// The n-th proxy instance of the part.
    Instance(u32),
    /// The bed headboard, a singleton outside the per-part loop.
    Headboard,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Anchor => f.write_str("ANCHOR"),
            Slot::Instance(i) => write!(f, "{i}"),
            Slot::Headboard => f.write_str("HEADBOARD"),
        }
    }
}

/// Structured identity `(assetId, partId, slot)`.
///
/// The rendered name is only used for host lookup. Membership tests compare
/// the `part_id` field directly, so a part id that prefixes another (`seat`
/// and `seatCushion`) never matches by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectKey {
    pub asset_id: String,
    pub part_id: String,
    pub slot: Slot,
}

impl ObjectKey {
    pub fn new(asset_id: impl Into<String>, part_id: impl Into<String>, slot: Slot) -> Self {
        Self {
            asset_id: asset_id.into(),
            part_id: part_id.into(),
            slot,
        }
    }

    /// Key of the anchor for a part.
    pub fn anchor(asset_id: &str, part_id: &str) -> Self {
        Self::new(asset_id, part_id, Slot::Anchor)
    }

    /// Key of the `index`-th instance of a part.
    pub fn instance(asset_id: &str, part_id: &str, index: u32) -> Self {
        Self::new(asset_id, part_id, Slot::Instance(index))
    }

    /// Stable host name, `"assetId::partId::slot"`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}::{}", self.asset_id, self.part_id, self.slot)
    }
}
