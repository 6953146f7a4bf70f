// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data held by the in-memory host.

use nalgebra::Point3;

use crate::bounds::Bounds;

/// Name of the shared unit cube proxy mesh.
pub const UNIT_CUBE_MESH: &str = "__unit_cube__";

/// Quad mesh in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[u32; 4]>,
}

impl MeshData {
    /// Axis-aligned cube of edge 1 centered on the origin.
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, -0.5),
            Point3::new(-0.5, 0.5, -0.5),
            Point3::new(-0.5, -0.5, 0.5),
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(-0.5, 0.5, 0.5),
        ];
        let faces = vec![
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ];
        Self {
            name: UNIT_CUBE_MESH.to_string(),
            vertices,
            faces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The 8 corners of the local bounding box, or `None` for an empty mesh.
    pub fn bound_box(&self) -> Option<[Point3<f64>; 8]> {
        let b = Bounds::from_points(self.vertices.iter().copied())?;
        Some([
            Point3::new(b.min_x, b.min_y, b.min_z),
            Point3::new(b.min_x, b.min_y, b.max_z),
            Point3::new(b.min_x, b.max_y, b.max_z),
            Point3::new(b.min_x, b.max_y, b.min_z),
            Point3::new(b.max_x, b.min_y, b.min_z),
            Point3::new(b.max_x, b.min_y, b.max_z),
            Point3::new(b.max_x, b.max_y, b.max_z),
            Point3::new(b.max_x, b.max_y, b.min_z),
        ])
    }
}
