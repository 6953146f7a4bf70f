// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical resolution from a human reference body.
//!
//! Descriptions that arrive without a physical map can have one resolved from
//! a [`ReferenceBody`]. Every resolved value is rounded to millimeters so the
//! output is stable across platforms.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::description::PhysicalSpec;

/// Canonical human measurements in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBody {
    /// Floor to top of head.
    pub standing_height: f64,
    /// Floor to knee center.
    pub knee_height: f64,
    /// Floor to hip joint.
    pub hip_height: f64,
    pub standing_eye_height: f64,
    pub seated_eye_height: f64,
    /// Floor to elbow, seated in neutral posture.
    pub seated_elbow_height: f64,
    /// Bi-acromial breadth.
    pub shoulder_width: f64,
    /// Shoulder to fingertip.
    pub arm_length: f64,
}

impl Default for ReferenceBody {
    /// Neutral adult baseline.
    fn default() -> Self {
        Self {
            standing_height: 1.7,
            knee_height: 0.46,
            hip_height: 0.9,
            standing_eye_height: 1.6,
            seated_eye_height: 1.2,
            seated_elbow_height: 0.7,
            shoulder_width: 0.45,
            arm_length: 0.65,
        }
    }
}

/// Rounds to a fixed number of decimal places.
#[inline]
fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

fn set_footprint(spec: &mut PhysicalSpec, width: f64, depth: f64, margin: f64) {
    spec.set_number("footprint.width", round_to(width + margin, 3));
    spec.set_number("footprint.depth", round_to(depth + margin, 3));
}

/// Resolves a physical map for `archetype` from `body`.
///
/// `has_arms` only affects chairs, which gain an `armHeight` field.
pub fn resolve_physical(archetype: Archetype, has_arms: bool, body: &ReferenceBody) -> PhysicalSpec {
    let mut spec = PhysicalSpec::new();
    match archetype {
        Archetype::Chair => {
            let seat_height = round_to(body.knee_height * 0.95, 3);
            let seat_depth = round_to(body.hip_height * 0.5, 3);
            let seat_width = round_to(body.shoulder_width + 0.1, 3);
            let back_height = round_to((body.seated_eye_height - seat_height - 0.2).max(0.4), 3);

            spec.set_number("seatHeight", seat_height);
            spec.set_number("seatDepth", seat_depth);
            spec.set_number("seatWidth", seat_width);
            spec.set_number("backHeight", back_height);
            if has_arms {
                let arm_height =
                    round_to((body.seated_elbow_height - seat_height - 0.05).max(0.18), 3);
                spec.set_number("armHeight", arm_height);
            }
            spec.set_number("totalHeight", round_to(seat_height + back_height, 3));
            set_footprint(&mut spec, seat_width, seat_depth, 0.08);
        }
        Archetype::Table => {
            let surface_width = round_to(body.shoulder_width * 2.0, 3);
            let surface_depth = round_to(body.arm_length * 0.75, 3);

            spec.set_number("surfaceHeight", round_to(body.seated_elbow_height + 0.03, 3));
            spec.set_number("surfaceWidth", surface_width);
            spec.set_number("surfaceDepth", surface_depth);
            spec.set_number("clearanceHeight", round_to(body.knee_height + 0.05, 3));
            set_footprint(&mut spec, surface_width, surface_depth, 0.12);
        }
        Archetype::Bed => {
            let mattress_thickness = round_to(0.22, 3);
            let clearance_under = round_to(0.18, 3);
            let sleeping_height = round_to(clearance_under + mattress_thickness, 3);
            let sleeping_width = round_to(body.shoulder_width * 1.8, 3);
            let sleeping_length = round_to(body.standing_height + 0.25, 3);

            spec.set_number("sleepingHeight", sleeping_height);
            spec.set_number("sleepingWidth", sleeping_width);
            spec.set_number("sleepingLength", sleeping_length);
            spec.set_number("mattressThickness", mattress_thickness);
            spec.set_number("clearanceUnder", clearance_under);
            // No headboard by default: total height equals sleeping height
            spec.set_number("totalHeight", sleeping_height);
            set_footprint(&mut spec, sleeping_width, sleeping_length, 0.12);
        }
    }
    tracing::debug!(archetype = %archetype, has_arms, "Resolved physical map from reference body");
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn chair_resolution() {
        let spec = resolve_physical(Archetype::Chair, false, &ReferenceBody::default());
        assert_relative_eq!(spec.number("seatHeight").unwrap(), 0.437);
        assert_relative_eq!(spec.number("seatDepth").unwrap(), 0.45);
        assert_relative_eq!(spec.number("seatWidth").unwrap(), 0.55);
        assert_relative_eq!(spec.number("backHeight").unwrap(), 0.563);
        assert_relative_eq!(spec.number("totalHeight").unwrap(), 1.0);
        assert_relative_eq!(spec.number("footprint.width").unwrap(), 0.63);
        assert_relative_eq!(spec.number("footprint.depth").unwrap(), 0.53);
        assert!(spec.number("armHeight").is_none());
    }

    #[test]
    fn chair_arms_have_minimum_height() {
        let spec = resolve_physical(Archetype::Chair, true, &ReferenceBody::default());
        // 0.7 - 0.437 - 0.05 = 0.213
        assert_relative_eq!(spec.number("armHeight").unwrap(), 0.213);

        let low_elbow = ReferenceBody {
            seated_elbow_height: 0.5,
            ..ReferenceBody::default()
        };
        let spec = resolve_physical(Archetype::Chair, true, &low_elbow);
        assert_relative_eq!(spec.number("armHeight").unwrap(), 0.18);
    }

    #[test]
    fn table_resolution() {
        let spec = resolve_physical(Archetype::Table, false, &ReferenceBody::default());
        assert_relative_eq!(spec.number("surfaceHeight").unwrap(), 0.73);
        assert_relative_eq!(spec.number("surfaceWidth").unwrap(), 0.9);
        assert_relative_eq!(spec.number("surfaceDepth").unwrap(), 0.488);
        assert_relative_eq!(spec.number("clearanceHeight").unwrap(), 0.51);
        assert_relative_eq!(spec.number("footprint.width").unwrap(), 1.02);
        assert_relative_eq!(spec.number("footprint.depth").unwrap(), 0.608);
    }

    #[test]
    fn bed_resolution() {
        let spec = resolve_physical(Archetype::Bed, false, &ReferenceBody::default());
        assert_relative_eq!(spec.number("sleepingHeight").unwrap(), 0.4);
        assert_relative_eq!(spec.number("sleepingWidth").unwrap(), 0.81);
        assert_relative_eq!(spec.number("sleepingLength").unwrap(), 1.95);
        assert_relative_eq!(spec.number("totalHeight").unwrap(), 0.4);
        assert_relative_eq!(spec.number("footprint.width").unwrap(), 0.93);
    }

    #[test]
    fn resolution_is_deterministic() {
        let body = ReferenceBody::default();
        for archetype in [Archetype::Bed, Archetype::Chair, Archetype::Table] {
            assert_eq!(
                resolve_physical(archetype, true, &body),
                resolve_physical(archetype, true, &body)
            );
        }
    }
}
