// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Furnish Scene
//!
//! The scene graph surface the realizer talks to.
//!
//! [`SceneGraph`] is the port: fetch-or-create by name, local transforms,
//! parenting, evaluated world-space bounding corners and removal. Objects are
//! identified by a structured [`ObjectKey`] `(assetId, partId, slot)` whose
//! stable name is `"assetId::partId::slot"`; part membership is read from the
//! key, never from the name.
//!
//! [`SceneArena`] is an in-memory host backed by slot maps. It evaluates world
//! matrices through the parent chain at query time and round-trips to JSON,
//! which makes the realizer testable without a 3D application.

pub mod arena;
pub mod bounds;
pub mod error;
pub mod graph;
pub mod keys;
pub mod mesh;
pub mod serialization;
pub mod transform;

pub use arena::{CollectionData, ObjectData, SceneArena};
pub use bounds::Bounds;
pub use error::{Error, Result};
pub use graph::SceneGraph;
pub use keys::{CollectionId, MeshId, ObjectId, ObjectKey, Slot};
pub use mesh::{MeshData, UNIT_CUBE_MESH};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
