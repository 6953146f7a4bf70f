// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based in-memory scene host.
//!
//! The [`SceneArena`] owns every object, collection and mesh in slot maps with
//! stable, generational keys. Name indices give O(1) fetch-by-name, which is
//! what the realizer's idempotency checks rely on. Object names are global
//! across collections.

use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::keys::*;
use crate::mesh::MeshData;

/// Data stored for a scene object.
#[derive(Debug, Clone)]
pub struct ObjectData {
    pub key: ObjectKey,
    /// `None` for non-rendering objects such as anchors.
    pub mesh: Option<MeshId>,
    /// Local position, relative to the parent when one is set.
    pub location: Vector3<f64>,
    /// Local non-uniform scale.
    pub scale: Vector3<f64>,
    pub parent: Option<ObjectId>,
    pub collection: CollectionId,
}

/// Data stored for a collection: its name and members in link order.
#[derive(Debug, Clone)]
pub struct CollectionData {
    pub name: String,
    pub objects: Vec<ObjectId>,
}

/// The central arena that owns all scene entities and their name indices.
///
/// # Example
///
/// ```
/// use furnish_scene::{ObjectKey, SceneArena, SceneGraph, Vector3};
///
/// let mut scene = SceneArena::new();
/// let collection = scene.collection_or_create("chair-01").unwrap();
/// let cube = scene.unit_cube().unwrap();
/// let id = scene
///     .create_object(collection, ObjectKey::instance("chair-01", "seat", 0), Some(cube))
///     .unwrap();
/// scene.set_location(id, Vector3::new(0.0, 0.0, 0.5)).unwrap();
///
/// assert_eq!(scene.find_by_name("chair-01::seat::0"), Some(id));
/// assert_eq!(scene.object_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SceneArena {
    // Entity storage
    pub(crate) objects: SlotMap<ObjectId, ObjectData>,
    pub(crate) collections: SlotMap<CollectionId, CollectionData>,
    pub(crate) meshes: SlotMap<MeshId, MeshData>,

    // Name indices
    pub(crate) object_names: FxHashMap<String, ObjectId>,
    pub(crate) collection_names: FxHashMap<String, CollectionId>,
    pub(crate) mesh_names: FxHashMap<String, MeshId>,

    /// Reason the host refuses calls, if any.
    pub(crate) unavailable: Option<String>,
}

impl SceneArena {
    /// Creates a new, empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the host unavailable; every port call made through
    /// [`crate::SceneGraph::ensure_available`] fails until cleared.
    pub fn set_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    /// Clears a previous [`SceneArena::set_unavailable`].
    pub fn set_available(&mut self) {
        self.unavailable = None;
    }

    // --- Object operations ---

    /// Returns the object data for the given key, or `None` if not found.
    pub fn object(&self, id: ObjectId) -> Option<&ObjectData> {
        self.objects.get(id)
    }

    /// Looks an object up by its structured key and returns its data.
    pub fn object_by_key(&self, key: &ObjectKey) -> Option<&ObjectData> {
        self.object_names
            .get(&key.name())
            .and_then(|&id| self.objects.get(id))
    }

    /// Returns the number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterates over all objects.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectData)> {
        self.objects.iter()
    }

    pub(crate) fn insert_object(&mut self, data: ObjectData) -> Result<ObjectId> {
        let name = data.key.name();
        if self.object_names.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        let collection = data.collection;
        if !self.collections.contains_key(collection) {
            return Err(Error::CollectionNotFound(collection));
        }
        let id = self.objects.insert(data);
        self.object_names.insert(name, id);
        self.collections[collection].objects.push(id);
        Ok(id)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData> {
        self.objects.get_mut(id).ok_or(Error::ObjectNotFound(id))
    }

    /// Removes an object, unlinking it from its collection. Children keep
    /// their local transform and lose their parent.
    pub(crate) fn delete_object(&mut self, id: ObjectId) -> Result<ObjectData> {
        let data = self.objects.remove(id).ok_or(Error::ObjectNotFound(id))?;
        self.object_names.remove(&data.key.name());
        if let Some(collection) = self.collections.get_mut(data.collection) {
            collection.objects.retain(|&o| o != id);
        }
        for (_, child) in self.objects.iter_mut() {
            if child.parent == Some(id) {
                child.parent = None;
            }
        }
        Ok(data)
    }

    // --- Collection operations ---

    /// Returns the collection data for the given key, or `None` if not found.
    pub fn collection(&self, id: CollectionId) -> Option<&CollectionData> {
        self.collections.get(id)
    }

    /// Returns the number of collections in the scene.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub(crate) fn insert_collection(&mut self, name: &str) -> Result<CollectionId> {
        if self.collection_names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let id = self.collections.insert(CollectionData {
            name: name.to_string(),
            objects: Vec::new(),
        });
        self.collection_names.insert(name.to_string(), id);
        Ok(id)
    }

    // --- Mesh operations ---

    /// Returns the mesh data for the given key, or `None` if not found.
    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id)
    }

    /// Returns the number of meshes in the scene.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub(crate) fn insert_mesh(&mut self, mesh: MeshData) -> Result<MeshId> {
        if self.mesh_names.contains_key(&mesh.name) {
            return Err(Error::DuplicateName(mesh.name));
        }
        let name = mesh.name.clone();
        let id = self.meshes.insert(mesh);
        self.mesh_names.insert(name, id);
        Ok(id)
    }
}
