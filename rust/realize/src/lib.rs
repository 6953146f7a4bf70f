// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Furnish Realize
//!
//! Turns a declarative furniture description into placeholder geometry.
//!
//! The pipeline, leaf first:
//!
//! 1. [`layout`]: four-corner support inset solver
//! 2. [`measure`]: axis-aligned world bounds over evaluated host state
//! 3. [`derive`]: proportional per-archetype dimension formulas
//! 4. [`realizer`]: idempotent anchor and proxy placement
//! 5. [`ergonomics`]: chair measure / compare / correct loop
//!
//! ```
//! use furnish_model::AssetDescription;
//! use furnish_realize::{RealizeConfig, Realizer};
//! use furnish_scene::SceneArena;
//!
//! let description = AssetDescription::from_json(r#"{
//!     "assetId": "table-1",
//!     "archetype": "table",
//!     "detailTier": "basic",
//!     "parts": { "supports": { "kind": "supports" }, "surface": { "kind": "surface" } },
//!     "physical": { "surfaceWidth": 1.2, "surfaceDepth": 0.8, "surfaceHeight": 0.75 }
//! }"#).unwrap();
//!
//! let mut scene = SceneArena::new();
//! let report = Realizer::new(RealizeConfig::default())
//!     .realize(&mut scene, &description)
//!     .unwrap();
//! assert_eq!(report.created, 5);
//! ```

pub mod config;
pub mod derive;
pub mod ergonomics;
pub mod error;
pub mod layout;
pub mod measure;
pub mod realizer;

pub use config::{RealizeConfig, RegenerationMode};
pub use derive::{
    BedDimensions, ChairDimensions, DerivedDimensions, HeadboardPlan, PartPlan, PartRole,
    TableDimensions,
};
pub use ergonomics::{ErgonomicsReport, Measurement, Metric, MetricCheck};
pub use error::{Error, Result};
pub use layout::{InsetMargin, SupportLayout};
pub use realizer::{RealizationReport, Realizer};
