// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned world bounds read back from the host.
//!
//! Everything here reflects evaluated host state at call time, never the
//! declared input. Objects without evaluated geometry (anchors, empty
//! meshes) contribute nothing.

use furnish_scene::{Bounds, CollectionId, ObjectId, SceneGraph};

use crate::error::Result;

/// World bounds of a single object, or `None` if it has no geometry.
pub fn object_bounds<S: SceneGraph + ?Sized>(scene: &S, id: ObjectId) -> Option<Bounds> {
    let corners = scene.evaluated_corners(id)?;
    Bounds::from_points(corners)
}

/// Union of the world bounds of every member of `collection`.
pub fn collection_bounds<S: SceneGraph + ?Sized>(
    scene: &S,
    collection: CollectionId,
) -> Result<Option<Bounds>> {
    let members = scene.members(collection)?;
    Ok(Bounds::union_all(
        members.into_iter().filter_map(|id| object_bounds(scene, id)),
    ))
}

/// Union restricted to members whose key names exactly `part_id`.
pub fn part_bounds<S: SceneGraph + ?Sized>(
    scene: &S,
    collection: CollectionId,
    part_id: &str,
) -> Result<Option<Bounds>> {
    let members = scene.members(collection)?;
    Ok(Bounds::union_all(
        members
            .into_iter()
            .filter(|&id| scene.object_key(id).is_some_and(|k| k.part_id == part_id))
            .filter_map(|id| object_bounds(scene, id)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use furnish_scene::{ObjectKey, SceneArena, Vector3};

    fn scene_with_parts() -> (SceneArena, CollectionId) {
        let mut scene = SceneArena::new();
        let c = scene.collection_or_create("chair").unwrap();
        let cube = scene.unit_cube().unwrap();

        let seat = scene
            .create_object(c, ObjectKey::instance("chair", "seat", 0), Some(cube))
            .unwrap();
        scene
            .set_transform(seat, Vector3::new(0.0, 0.0, 0.432), Vector3::new(0.45, 0.45, 0.036))
            .unwrap();

        let cushion = scene
            .create_object(c, ObjectKey::instance("chair", "seatCushion", 0), Some(cube))
            .unwrap();
        scene
            .set_transform(cushion, Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.4, 0.4, 0.1))
            .unwrap();

        scene
            .create_object(c, ObjectKey::anchor("chair", "seat"), None)
            .unwrap();
        (scene, c)
    }

    #[test]
    fn anchors_contribute_nothing() {
        let (scene, _) = scene_with_parts();
        let anchor = scene.find(&ObjectKey::anchor("chair", "seat")).unwrap();
        assert!(object_bounds(&scene, anchor).is_none());
    }

    #[test]
    fn part_membership_is_exact() {
        let (scene, c) = scene_with_parts();
        let seat = part_bounds(&scene, c, "seat").unwrap().unwrap();
        assert_relative_eq!(seat.max_z, 0.45, epsilon = 1e-12);
        assert_relative_eq!(seat.min_z, 0.414, epsilon = 1e-12);

        let cushion = part_bounds(&scene, c, "seatCushion").unwrap().unwrap();
        assert_relative_eq!(cushion.max_z, 2.05, epsilon = 1e-12);
    }

    #[test]
    fn collection_bounds_union_all_members() {
        let (scene, c) = scene_with_parts();
        let b = collection_bounds(&scene, c).unwrap().unwrap();
        assert_relative_eq!(b.min_z, 0.414, epsilon = 1e-12);
        assert_relative_eq!(b.max_z, 2.05, epsilon = 1e-12);
        assert_relative_eq!(b.width(), 0.45, epsilon = 1e-12);
    }

    #[test]
    fn empty_part_has_no_bounds() {
        let (scene, c) = scene_with_parts();
        assert!(part_bounds(&scene, c, "back").unwrap().is_none());
    }
}
