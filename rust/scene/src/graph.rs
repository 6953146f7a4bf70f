// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The scene graph port.
//!
//! This is the full capability surface the realizer consumes from a host.
//! Derivation, layout and measurement only ever see a `&mut impl SceneGraph`,
//! so they run the same against [`SceneArena`] as against a real 3D host.
//!
//! The port assumes a single writer. Nothing here locks; callers must not
//! realize into the same collection concurrently.

use nalgebra::{Point3, Vector3};

use crate::arena::{ObjectData, SceneArena};
use crate::error::{Error, Result};
use crate::keys::{CollectionId, MeshId, ObjectId, ObjectKey};
use crate::mesh::{MeshData, UNIT_CUBE_MESH};

pub trait SceneGraph {
    /// Fails with [`Error::Unavailable`] when the host cannot take calls.
    fn ensure_available(&self) -> Result<()>;

    fn find_collection(&self, name: &str) -> Option<CollectionId>;

    fn create_collection(&mut self, name: &str) -> Result<CollectionId>;

    /// Fetch-or-create a collection by name.
    fn collection_or_create(&mut self, name: &str) -> Result<CollectionId> {
        match self.find_collection(name) {
            Some(id) => Ok(id),
            None => self.create_collection(name),
        }
    }

    fn find_mesh(&self, name: &str) -> Option<MeshId>;

    fn create_mesh(&mut self, mesh: MeshData) -> Result<MeshId>;

    /// Fetch-or-create the single shared unit cube proxy mesh.
    fn unit_cube(&mut self) -> Result<MeshId> {
        match self.find_mesh(UNIT_CUBE_MESH) {
            Some(id) => Ok(id),
            None => self.create_mesh(MeshData::unit_cube()),
        }
    }

    /// Global lookup by stable object name.
    fn find_by_name(&self, name: &str) -> Option<ObjectId>;

    fn find(&self, key: &ObjectKey) -> Option<ObjectId> {
        self.find_by_name(&key.name())
    }

    /// Creates an object linked into `collection` with identity transform.
    /// `mesh` is `None` for non-rendering objects.
    fn create_object(
        &mut self,
        collection: CollectionId,
        key: ObjectKey,
        mesh: Option<MeshId>,
    ) -> Result<ObjectId>;

    fn object_key(&self, id: ObjectId) -> Option<&ObjectKey>;

    /// Members of a collection in link order.
    fn members(&self, collection: CollectionId) -> Result<Vec<ObjectId>>;

    fn location(&self, id: ObjectId) -> Option<Vector3<f64>>;

    fn set_location(&mut self, id: ObjectId, location: Vector3<f64>) -> Result<()>;

    fn set_scale(&mut self, id: ObjectId, scale: Vector3<f64>) -> Result<()>;

    fn set_transform(
        &mut self,
        id: ObjectId,
        location: Vector3<f64>,
        scale: Vector3<f64>,
    ) -> Result<()> {
        self.set_location(id, location)?;
        self.set_scale(id, scale)
    }

    /// Parents `child` to `parent`. The child's location stays local, so its
    /// world position becomes relative to the parent.
    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()>;

    /// World-space corners of the object's evaluated bounding box.
    ///
    /// `None` if the object is not a renderable mesh or has no evaluated
    /// geometry. Reflects host state at call time.
    fn evaluated_corners(&self, id: ObjectId) -> Option<[Point3<f64>; 8]>;

    fn remove_object(&mut self, id: ObjectId) -> Result<()>;
}

impl SceneGraph for SceneArena {
    fn ensure_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(Error::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn find_collection(&self, name: &str) -> Option<CollectionId> {
        self.collection_names.get(name).copied()
    }

    fn create_collection(&mut self, name: &str) -> Result<CollectionId> {
        let id = self.insert_collection(name)?;
        tracing::debug!(collection = name, "Created collection");
        Ok(id)
    }

    fn find_mesh(&self, name: &str) -> Option<MeshId> {
        self.mesh_names.get(name).copied()
    }

    fn create_mesh(&mut self, mesh: MeshData) -> Result<MeshId> {
        self.insert_mesh(mesh)
    }

    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_names.get(name).copied()
    }

    fn create_object(
        &mut self,
        collection: CollectionId,
        key: ObjectKey,
        mesh: Option<MeshId>,
    ) -> Result<ObjectId> {
        self.insert_object(ObjectData {
            key,
            mesh,
            location: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            parent: None,
            collection,
        })
    }

    fn object_key(&self, id: ObjectId) -> Option<&ObjectKey> {
        self.objects.get(id).map(|o| &o.key)
    }

    fn members(&self, collection: CollectionId) -> Result<Vec<ObjectId>> {
        self.collections
            .get(collection)
            .map(|c| c.objects.clone())
            .ok_or(Error::CollectionNotFound(collection))
    }

    fn location(&self, id: ObjectId) -> Option<Vector3<f64>> {
        self.objects.get(id).map(|o| o.location)
    }

    fn set_location(&mut self, id: ObjectId, location: Vector3<f64>) -> Result<()> {
        self.object_mut(id)?.location = location;
        Ok(())
    }

    fn set_scale(&mut self, id: ObjectId, scale: Vector3<f64>) -> Result<()> {
        self.object_mut(id)?.scale = scale;
        Ok(())
    }

    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()> {
        if !self.objects.contains_key(parent) {
            return Err(Error::ObjectNotFound(parent));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(Error::ParentCycle { child, parent });
        }
        self.object_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn evaluated_corners(&self, id: ObjectId) -> Option<[Point3<f64>; 8]> {
        let object = self.objects.get(id)?;
        let mesh = self.meshes.get(object.mesh?)?;
        let corners = mesh.bound_box()?;
        let world = self.world_matrix(id)?;
        Some(corners.map(|c| world.transform_point(&c)))
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<()> {
        let data = self.delete_object(id)?;
        tracing::debug!(object = %data.key, "Removed object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unavailable_host_reports_reason() {
        let mut scene = SceneArena::new();
        assert!(scene.ensure_available().is_ok());
        scene.set_unavailable("no display");
        let err = scene.ensure_available().unwrap_err();
        assert!(matches!(err, Error::Unavailable(ref r) if r == "no display"));
        scene.set_available();
        assert!(scene.ensure_available().is_ok());
    }

    #[test]
    fn collection_or_create_is_idempotent() {
        let mut scene = SceneArena::new();
        let a = scene.collection_or_create("bed").unwrap();
        let b = scene.collection_or_create("bed").unwrap();
        assert_eq!(a, b);
        assert_eq!(scene.collection_count(), 1);
    }

    #[test]
    fn anchors_have_no_corners() {
        let mut scene = SceneArena::new();
        let c = scene.collection_or_create("bed").unwrap();
        let anchor = scene.create_object(c, ObjectKey::anchor("bed", "frame"), None).unwrap();
        assert!(scene.evaluated_corners(anchor).is_none());
    }

    #[test]
    fn corners_follow_scale_and_parent() {
        let mut scene = SceneArena::new();
        let c = scene.collection_or_create("table").unwrap();
        let cube = scene.unit_cube().unwrap();
        let anchor = scene.create_object(c, ObjectKey::anchor("table", "surface"), None).unwrap();
        let top = scene
            .create_object(c, ObjectKey::instance("table", "surface", 0), Some(cube))
            .unwrap();
        scene
            .set_transform(top, Vector3::new(0.0, 0.0, 0.75), Vector3::new(1.2, 0.8, 0.05))
            .unwrap();
        scene.set_parent(top, anchor).unwrap();
        scene.set_location(anchor, Vector3::new(2.0, 0.0, 0.0)).unwrap();

        let corners = scene.evaluated_corners(top).unwrap();
        let xs: Vec<f64> = corners.iter().map(|p| p.x).collect();
        let zs: Vec<f64> = corners.iter().map(|p| p.z).collect();
        assert_relative_eq!(xs.iter().cloned().fold(f64::INFINITY, f64::min), 1.4, epsilon = 1e-12);
        assert_relative_eq!(xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 2.6, epsilon = 1e-12);
        assert_relative_eq!(zs.iter().cloned().fold(f64::INFINITY, f64::min), 0.725, epsilon = 1e-12);
        assert_relative_eq!(zs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 0.775, epsilon = 1e-12);
    }

    #[test]
    fn parenting_cycles_are_rejected() {
        let mut scene = SceneArena::new();
        let c = scene.collection_or_create("a").unwrap();
        let p = scene.create_object(c, ObjectKey::anchor("a", "p"), None).unwrap();
        let q = scene.create_object(c, ObjectKey::anchor("a", "q"), None).unwrap();
        scene.set_parent(q, p).unwrap();
        assert!(matches!(
            scene.set_parent(p, q),
            Err(Error::ParentCycle { .. })
        ));
        assert!(matches!(scene.set_parent(p, p), Err(Error::ParentCycle { .. })));
    }

    #[test]
    fn members_of_missing_collection_is_an_error() {
        let mut scene = SceneArena::new();
        let c = scene.collection_or_create("a").unwrap();
        assert!(scene.members(c).unwrap().is_empty());
        let mut other = SceneArena::new();
        other.collection_or_create("x").unwrap();
        let missing = other.collection_or_create("y").unwrap();
        assert!(scene.members(missing).is_err());
    }
}
