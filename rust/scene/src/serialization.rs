// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON persistence for scene arenas.
//!
//! Slot map keys are host handles, so the snapshot maps them to sequential
//! integer ids. Objects are written in collection link order and reloaded in
//! the same order, which keeps member iteration stable across runs.

use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arena::{ObjectData, SceneArena};
use crate::error::{Error, Result};
use crate::keys::{CollectionId, MeshId, ObjectId, ObjectKey};
use crate::mesh::MeshData;

/// Serializable representation of the full scene.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub meshes: Vec<MeshSnapshot>,
    pub collections: Vec<CollectionSnapshot>,
    pub objects: Vec<ObjectSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub id: usize,
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[u32; 4]>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub id: usize,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: usize,
    pub name: String,
    pub key: ObjectKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
    pub location: [f64; 3],
    pub scale: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    pub collection: usize,
}

fn lookup<K: Copy>(ids: &[K], index: usize, what: &str) -> Result<K> {
    ids.get(index)
        .copied()
        .ok_or_else(|| Error::Serialization(format!("dangling {what} reference {index}")))
}

impl SceneArena {
    /// Serializes the scene to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the scene.
    pub fn to_snapshot(&self) -> SceneSnapshot {
        let mut mesh_ids: FxHashMap<MeshId, usize> = FxHashMap::default();
        let meshes: Vec<MeshSnapshot> = self
            .meshes
            .iter()
            .enumerate()
            .map(|(i, (k, m))| {
                mesh_ids.insert(k, i);
                MeshSnapshot {
                    id: i,
                    name: m.name.clone(),
                    vertices: m.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
                    faces: m.faces.clone(),
                }
            })
            .collect();

        let mut collection_ids: FxHashMap<CollectionId, usize> = FxHashMap::default();
        let collections: Vec<CollectionSnapshot> = self
            .collections
            .iter()
            .enumerate()
            .map(|(i, (k, c))| {
                collection_ids.insert(k, i);
                CollectionSnapshot {
                    id: i,
                    name: c.name.clone(),
                }
            })
            .collect();

        let ordered: Vec<ObjectId> = self
            .collections
            .values()
            .flat_map(|c| c.objects.iter().copied())
            .collect();
        let object_ids: FxHashMap<ObjectId, usize> =
            ordered.iter().enumerate().map(|(i, &k)| (k, i)).collect();

        let objects = ordered
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| {
                let o = self.objects.get(k)?;
                Some(ObjectSnapshot {
                    id: i,
                    name: o.key.name(),
                    key: o.key.clone(),
                    mesh: o.mesh.and_then(|m| mesh_ids.get(&m).copied()),
                    location: [o.location.x, o.location.y, o.location.z],
                    scale: [o.scale.x, o.scale.y, o.scale.z],
                    parent: o.parent.and_then(|p| object_ids.get(&p).copied()),
                    collection: collection_ids[&o.collection],
                })
            })
            .collect();

        SceneSnapshot {
            meshes,
            collections,
            objects,
        }
    }

    /// Deserializes a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SceneSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Reconstructs a scene from a snapshot.
    pub fn from_snapshot(snap: &SceneSnapshot) -> Result<Self> {
        let mut scene = SceneArena::new();

        let mut mesh_keys: Vec<MeshId> = Vec::with_capacity(snap.meshes.len());
        for ms in &snap.meshes {
            let id = scene.insert_mesh(MeshData {
                name: ms.name.clone(),
                vertices: ms.vertices.iter().map(|v| Point3::new(v[0], v[1], v[2])).collect(),
                faces: ms.faces.clone(),
            })?;
            mesh_keys.push(id);
        }

        let mut collection_keys: Vec<CollectionId> = Vec::with_capacity(snap.collections.len());
        for cs in &snap.collections {
            collection_keys.push(scene.insert_collection(&cs.name)?);
        }

        let mut object_keys: Vec<ObjectId> = Vec::with_capacity(snap.objects.len());
        for os in &snap.objects {
            let mesh = match os.mesh {
                Some(m) => Some(lookup(&mesh_keys, m, "mesh")?),
                None => None,
            };
            let id = scene.insert_object(ObjectData {
                key: os.key.clone(),
                mesh,
                location: Vector3::new(os.location[0], os.location[1], os.location[2]),
                scale: Vector3::new(os.scale[0], os.scale[1], os.scale[2]),
                parent: None,
                collection: lookup(&collection_keys, os.collection, "collection")?,
            })?;
            object_keys.push(id);
        }

        // Parents last, once every object has a key
        for (os, &id) in snap.objects.iter().zip(&object_keys) {
            if let Some(p) = os.parent {
                let parent = lookup(&object_keys, p, "parent")?;
                scene.object_mut(id)?.parent = Some(parent);
            }
        }

        Ok(scene)
    }
}
