// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Furnish Model
//!
//! Declarative furniture descriptions consumed by the realizer.
//!
//! An [`AssetDescription`] names an asset, its archetype (bed, chair, table),
//! a detail tier, a map of named parts and an optional physical map of
//! declared dimensions in meters. The [`PartSummary`] adapter normalizes the
//! part map into a deterministic, id-sorted list and renders the ASCII dump
//! used for quick inspection.
//!
//! ## Quick Start
//!
//! ```
//! use furnish_model::{AssetDescription, PartSummary};
//!
//! let json = r#"{
//!     "assetId": "chair-01",
//!     "archetype": "chair",
//!     "detailTier": "basic",
//!     "parts": { "seat": { "kind": "seat" }, "back": { "kind": "back" } },
//!     "physical": { "seatHeight": 0.45, "footprint": { "width": 0.5 } }
//! }"#;
//!
//! let description = AssetDescription::from_json(json).unwrap();
//! assert_eq!(description.number("footprint.width"), Some(0.5));
//!
//! let summary = PartSummary::from_description(&description);
//! assert_eq!(summary.parts[0].id, "back");
//! ```

pub mod archetype;
pub mod description;
pub mod ergonomics;
pub mod error;
pub mod summary;

pub use archetype::Archetype;
pub use description::{AssetDescription, PartDescriptor, PhysicalSpec};
pub use ergonomics::{resolve_physical, ReferenceBody};
pub use error::{Error, Result};
pub use summary::{PartSpec, PartSummary};
