// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds in world space.
//!
//! Bounds compose by componentwise min/max. The union is commutative and
//! associative, so aggregating over a collection gives the same result in any
//! member order.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds `(minX, maxX, minY, maxY, minZ, maxZ)` in f64 precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Tight bounds around a set of points, or `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.x, first.x, first.y, first.y, first.z, first.z);
        for p in iter {
            bounds.expand(&p);
        }
        Some(bounds)
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand(&mut self, p: &Point3<f64>) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }

    /// Componentwise union.
    #[inline]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            min_z: self.min_z.min(other.min_z),
            max_z: self.max_z.max(other.max_z),
        }
    }

    /// Union of every bounds in `iter`, or `None` if it yields nothing.
    pub fn union_all<I>(iter: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Bounds>,
    {
        iter.into_iter().reduce(|acc, b| acc.union(&b))
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Extent along Z.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> [Bounds; 3] {
        [
            Bounds::new(-1.0, 1.0, -2.0, 0.5, 0.0, 3.0),
            Bounds::new(0.25, 4.0, -0.5, 0.75, -1.5, 1.0),
            Bounds::new(-3.5, -2.0, 1.0, 9.0, 2.0, 2.5),
        ]
    }

    #[test]
    fn from_points_is_tight() {
        let b = Bounds::from_points([
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 4.0, 0.5),
            Point3::new(0.0, 0.0, -7.0),
        ])
        .unwrap();
        assert_eq!(b, Bounds::new(-1.0, 1.0, -2.0, 4.0, -7.0, 3.0));
    }

    #[test]
    fn from_no_points_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn union_is_commutative() {
        let [a, b, c] = sample();
        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(b.union(&c), c.union(&b));
        assert_eq!(a.union(&c), c.union(&a));
    }

    #[test]
    fn union_is_associative() {
        let [a, b, c] = sample();
        assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
    }

    #[test]
    fn union_all_matches_pairwise() {
        let [a, b, c] = sample();
        let all = Bounds::union_all([c, a, b]).unwrap();
        assert_eq!(all, a.union(&b).union(&c));
        assert!(Bounds::union_all(std::iter::empty()).is_none());
    }

    #[test]
    fn extents_and_center() {
        let b = Bounds::new(-0.25, 0.25, -1.0, 1.0, 0.0, 0.9);
        assert_relative_eq!(b.width(), 0.5);
        assert_relative_eq!(b.depth(), 2.0);
        assert_relative_eq!(b.height(), 0.9);
        assert_relative_eq!(b.center().z, 0.45);
        assert!(b.is_finite());
    }
}
