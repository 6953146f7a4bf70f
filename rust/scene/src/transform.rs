// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! World transform evaluation.
//!
//! Matrices are never cached. Each query walks the parent chain, so a moved
//! anchor is reflected by every child on the very next read.

use nalgebra::{Matrix4, Point3};

use crate::arena::SceneArena;
use crate::keys::ObjectId;

impl SceneArena {
    /// Local matrix `T * S` of an object.
    pub fn local_matrix(&self, id: ObjectId) -> Option<Matrix4<f64>> {
        let o = self.objects.get(id)?;
        Some(Matrix4::new_translation(&o.location) * Matrix4::new_nonuniform_scaling(&o.scale))
    }

    /// World matrix, composed root-first through the parent chain.
    pub fn world_matrix(&self, id: ObjectId) -> Option<Matrix4<f64>> {
        let mut matrix = self.local_matrix(id)?;
        let mut current = self.objects.get(id)?.parent;
        // A chain longer than the object count means a cycle
        let mut budget = self.objects.len();
        while let Some(parent) = current {
            if budget == 0 {
                tracing::warn!(?id, "Parent chain does not terminate");
                return None;
            }
            budget -= 1;
            matrix = self.local_matrix(parent)? * matrix;
            current = self.objects.get(parent)?.parent;
        }
        Some(matrix)
    }

    /// World position of the object's origin.
    pub fn world_location(&self, id: ObjectId) -> Option<Point3<f64>> {
        self.world_matrix(id)
            .map(|m| m.transform_point(&Point3::origin()))
    }

    /// Whether `ancestor` appears in the parent chain of `id`.
    pub(crate) fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.objects.get(id).and_then(|o| o.parent);
        let mut budget = self.objects.len();
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            if budget == 0 {
                return false;
            }
            budget -= 1;
            current = self.objects.get(parent).and_then(|o| o.parent);
        }
        false
    }
}
