// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension derivation.
//!
//! Maps a physical record to part scales, vertical offsets and thickness
//! values with fixed proportional formulas per archetype. A multi-field
//! quantity is only derived when every field it depends on is present;
//! missing inputs never turn into zeros.

use furnish_model::{Archetype, PhysicalSpec};
use nalgebra::Vector3;

use crate::config::RealizeConfig;
use crate::layout::{InsetMargin, SupportLayout};

/// Instances created for a support part.
pub const SUPPORT_COUNT: u32 = 4;

const BED_LEG_RATIO: f64 = 0.05;
const BED_BACK_RATIO: f64 = 0.8;
const HEADBOARD_WIDTH_RATIO: f64 = 0.6;
const TABLE_LEG_RATIO: f64 = 0.05;
const TABLE_TOP_RATIO: f64 = 0.08;
const SEAT_THICKNESS_RATIO: f64 = 0.08;
const BACK_WIDTH_RATIO: f64 = 0.9;
const BACK_THICKNESS_RATIO: f64 = 0.8;

fn field(physical: Option<&PhysicalSpec>, path: &str) -> Option<f64> {
    physical.and_then(|p| p.number(path))
}

fn vector(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Option<Vector3<f64>> {
    Some(Vector3::new(x?, y?, z?))
}

/// How a part is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartRole {
    /// Horizontal surface resting on its supports (bed mattress, table top).
    Surface,
    /// Chair seat; its top sits at the declared seat height.
    Seat,
    /// Four legs on the floor, spread by the support layout.
    Supports,
    /// Chair back, rising from the rear edge of the seat.
    Back,
    /// No physical mapping for this archetype.
    Unmapped,
}

/// Placement plan for one part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartPlan {
    pub role: PartRole,
    /// Number of proxy instances.
    pub count: u32,
    /// Proxy scale, `None` leaves the unit cube unscaled.
    pub scale: Option<Vector3<f64>>,
    /// Instance location relative to the anchor. Support instances take
    /// their X/Y from the layout instead.
    pub offset: Vector3<f64>,
}

impl PartPlan {
    fn new(role: PartRole, count: u32, scale: Option<Vector3<f64>>) -> Self {
        Self {
            role,
            count,
            scale,
            offset: Vector3::zeros(),
        }
    }

    fn unmapped() -> Self {
        Self::new(PartRole::Unmapped, 1, None)
    }

    /// Surface resting at `height`: `z = height + scale.z / 2`.
    fn surface(scale: Option<Vector3<f64>>, height: Option<f64>) -> Self {
        let mut plan = Self::new(PartRole::Surface, 1, scale);
        if let (Some(s), Some(h)) = (scale, height) {
            plan.offset.z = h + s.z / 2.0;
        }
        plan
    }

    /// Floor-seated legs: `z = scale.z / 2`.
    fn supports(scale: Option<Vector3<f64>>) -> Self {
        let mut plan = Self::new(PartRole::Supports, SUPPORT_COUNT, scale);
        if let Some(s) = scale {
            plan.offset.z = s.z / 2.0;
        }
        plan
    }

    pub fn is_mapped(&self) -> bool {
        self.role != PartRole::Unmapped
    }
}

/// The bed headboard singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadboardPlan {
    pub scale: Vector3<f64>,
    pub location: Vector3<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BedDimensions {
    pub sleeping_width: Option<f64>,
    pub sleeping_length: Option<f64>,
    pub mattress_thickness: Option<f64>,
    pub leg_thickness: Option<f64>,
    pub back_thickness: Option<f64>,
    pub surface_height: Option<f64>,
    pub headboard_height: Option<f64>,
    pub surface_scale: Option<Vector3<f64>>,
    pub support_scale: Option<Vector3<f64>>,
    pub headboard_scale: Option<Vector3<f64>>,
}

impl BedDimensions {
    pub fn derive(physical: Option<&PhysicalSpec>, clearance: f64) -> Self {
        let width = field(physical, "sleepingWidth");
        let length = field(physical, "sleepingLength");
        let sleeping_height = field(physical, "sleepingHeight");
        let total_height = field(physical, "totalHeight");
        let mattress = field(physical, "mattressThickness");
        let clearance_under = field(physical, "clearanceUnder");

        let leg_thickness = width.map(|w| w * BED_LEG_RATIO);
        let back_thickness = mattress.map(|m| m * BED_BACK_RATIO);
        let surface_height = sleeping_height.map(|h| h - mattress.unwrap_or(0.0));
        let headboard_height = total_height.zip(sleeping_height).map(|(t, s)| t - s);

        let headboard_scale = match (width, back_thickness, headboard_height) {
            (Some(w), Some(t), Some(h)) if h > 0.0 => {
                Some(Vector3::new(w * HEADBOARD_WIDTH_RATIO, t, h))
            }
            _ => None,
        };

        Self {
            sleeping_width: width,
            sleeping_length: length,
            mattress_thickness: mattress,
            leg_thickness,
            back_thickness,
            surface_height,
            headboard_height,
            surface_scale: vector(width, length, mattress),
            support_scale: vector(
                leg_thickness,
                leg_thickness,
                clearance_under.map(|c| c - clearance),
            ),
            headboard_scale,
        }
    }

    fn part_plan(&self, part_id: &str) -> PartPlan {
        match part_id {
            "sleepSurface" => PartPlan::surface(self.surface_scale, self.surface_height),
            "frame" => PartPlan::supports(self.support_scale),
            _ => PartPlan::unmapped(),
        }
    }

    /// Behind the far edge of the mattress, resting on top of it.
    fn headboard(&self) -> Option<HeadboardPlan> {
        let scale = self.headboard_scale?;
        let y = self
            .sleeping_length
            .map(|l| l / 2.0 + scale.y / 2.0)
            .unwrap_or(0.0);
        let z = match (self.surface_height, self.surface_scale) {
            (Some(h), Some(s)) => h + s.z + scale.z / 2.0,
            _ => 0.0,
        };
        Some(HeadboardPlan {
            scale,
            location: Vector3::new(0.0, y, z),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDimensions {
    pub surface_width: Option<f64>,
    pub surface_depth: Option<f64>,
    pub surface_height: Option<f64>,
    pub leg_thickness: Option<f64>,
    pub surface_scale: Option<Vector3<f64>>,
    pub support_scale: Option<Vector3<f64>>,
}

impl TableDimensions {
    pub fn derive(physical: Option<&PhysicalSpec>, clearance: f64) -> Self {
        let width = field(physical, "surfaceWidth");
        let depth = field(physical, "surfaceDepth");
        let height = field(physical, "surfaceHeight");
        let leg_thickness = width.map(|w| w * TABLE_LEG_RATIO);
        let top = width.zip(depth).map(|(w, d)| w.min(d) * TABLE_TOP_RATIO);

        Self {
            surface_width: width,
            surface_depth: depth,
            surface_height: height,
            leg_thickness,
            surface_scale: vector(width, depth, top),
            support_scale: vector(leg_thickness, leg_thickness, height.map(|h| h - clearance)),
        }
    }

    fn part_plan(&self, part_id: &str) -> PartPlan {
        match part_id {
            "surface" => PartPlan::surface(self.surface_scale, self.surface_height),
            "supports" => PartPlan::supports(self.support_scale),
            _ => PartPlan::unmapped(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChairDimensions {
    pub seat_width: Option<f64>,
    pub seat_depth: Option<f64>,
    pub seat_height: Option<f64>,
    pub footprint_width: Option<f64>,
    pub footprint_depth: Option<f64>,
    pub leg_thickness: Option<f64>,
    pub seat_thickness: Option<f64>,
    pub back_width: Option<f64>,
    pub back_thickness: Option<f64>,
    pub back_height: Option<f64>,
    pub seat_scale: Option<Vector3<f64>>,
    pub support_scale: Option<Vector3<f64>>,
    pub back_scale: Option<Vector3<f64>>,
}

impl ChairDimensions {
    pub fn derive(physical: Option<&PhysicalSpec>, clearance: f64) -> Self {
        let seat_width = field(physical, "seatWidth");
        let seat_depth = field(physical, "seatDepth");
        let seat_height = field(physical, "seatHeight");
        let total_height = field(physical, "totalHeight");
        let footprint_width = field(physical, "footprint.width");
        let footprint_depth = field(physical, "footprint.depth");

        let leg_thickness = footprint_width.zip(seat_width).map(|(f, s)| (f - s) / 2.0);
        let seat_thickness = seat_width.map(|s| s * SEAT_THICKNESS_RATIO);
        let back_width = seat_width.map(|s| s * BACK_WIDTH_RATIO);
        let back_thickness = seat_thickness.map(|t| t * BACK_THICKNESS_RATIO);
        let back_height = total_height.zip(seat_height).map(|(t, s)| t - s);

        Self {
            seat_width,
            seat_depth,
            seat_height,
            footprint_width,
            footprint_depth,
            leg_thickness,
            seat_thickness,
            back_width,
            back_thickness,
            back_height,
            seat_scale: vector(seat_width, seat_depth, seat_thickness),
            support_scale: vector(
                leg_thickness,
                leg_thickness,
                seat_height.map(|h| h - clearance),
            ),
            back_scale: vector(back_width, back_thickness, back_height),
        }
    }

    fn part_plan(&self, part_id: &str) -> PartPlan {
        match part_id {
            "seat" => {
                let mut plan = PartPlan::new(PartRole::Seat, 1, self.seat_scale);
                if let Some(s) = self.seat_scale {
                    // Sinks below the origin when the seat height is unknown
                    plan.offset.z = self.seat_height.unwrap_or(0.0) - s.z / 2.0;
                }
                plan
            }
            "supports" => PartPlan::supports(self.support_scale),
            "back" => {
                let mut plan = PartPlan::new(PartRole::Back, 1, self.back_scale);
                if let (Some(d), Some(t)) = (self.seat_depth, self.back_thickness) {
                    plan.offset.y = d / 2.0 - t / 2.0;
                }
                if let (Some(s), Some(h)) = (self.seat_height, self.back_height) {
                    plan.offset.z = s + h / 2.0;
                }
                plan
            }
            _ => PartPlan::unmapped(),
        }
    }
}

/// Derived dimensions for one description.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedDimensions {
    Bed(BedDimensions),
    Table(TableDimensions),
    Chair(ChairDimensions),
}

impl DerivedDimensions {
    pub fn derive(
        archetype: Archetype,
        physical: Option<&PhysicalSpec>,
        config: &RealizeConfig,
    ) -> Self {
        let clearance = config.structural_clearance;
        match archetype {
            Archetype::Bed => Self::Bed(BedDimensions::derive(physical, clearance)),
            Archetype::Table => Self::Table(TableDimensions::derive(physical, clearance)),
            Archetype::Chair => Self::Chair(ChairDimensions::derive(physical, clearance)),
        }
    }

    /// Corner layout for the archetype's supports.
    pub fn support_layout(&self, config: &RealizeConfig) -> Option<SupportLayout> {
        match self {
            Self::Bed(d) => SupportLayout::solve(
                d.sleeping_width,
                d.sleeping_length,
                d.leg_thickness,
                InsetMargin::Fixed(config.fixed_leg_inset()),
            ),
            Self::Table(d) => SupportLayout::solve(
                d.surface_width,
                d.surface_depth,
                d.leg_thickness,
                InsetMargin::Fixed(config.fixed_leg_inset()),
            ),
            Self::Chair(d) => SupportLayout::solve(
                d.footprint_width,
                d.footprint_depth,
                d.leg_thickness,
                InsetMargin::WidthProportional(d.seat_width?),
            ),
        }
    }

    pub fn part_plan(&self, part_id: &str) -> PartPlan {
        match self {
            Self::Bed(d) => d.part_plan(part_id),
            Self::Table(d) => d.part_plan(part_id),
            Self::Chair(d) => d.part_plan(part_id),
        }
    }

    /// Headboard placement, bed only and only when its height is positive.
    pub fn headboard(&self) -> Option<HeadboardPlan> {
        match self {
            Self::Bed(d) => d.headboard(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn physical(value: serde_json::Value) -> PhysicalSpec {
        match value {
            serde_json::Value::Object(map) => PhysicalSpec::from(map),
            _ => unreachable!(),
        }
    }

    fn bed() -> PhysicalSpec {
        physical(json!({
            "sleepingWidth": 1.4, "sleepingLength": 2.0, "sleepingHeight": 0.5,
            "totalHeight": 1.1, "mattressThickness": 0.2, "clearanceUnder": 0.3
        }))
    }

    fn chair() -> PhysicalSpec {
        physical(json!({
            "seatWidth": 0.45, "seatDepth": 0.45, "seatHeight": 0.45, "totalHeight": 0.9,
            "footprint": { "width": 0.5, "depth": 0.5 }
        }))
    }

    #[test]
    fn bed_formulas() {
        let d = BedDimensions::derive(Some(&bed()), 0.002);
        assert_relative_eq!(d.leg_thickness.unwrap(), 0.07, epsilon = 1e-12);
        assert_relative_eq!(d.surface_height.unwrap(), 0.3, epsilon = 1e-12);
        assert_relative_eq!(d.back_thickness.unwrap(), 0.16, epsilon = 1e-12);
        assert_relative_eq!(d.headboard_height.unwrap(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(
            d.support_scale.unwrap(),
            Vector3::new(0.07, 0.07, 0.298),
            epsilon = 1e-12
        );
        assert_relative_eq!(d.surface_scale.unwrap(), Vector3::new(1.4, 2.0, 0.2), epsilon = 1e-12);
        assert_relative_eq!(
            d.headboard_scale.unwrap(),
            Vector3::new(0.84, 0.16, 0.6),
            epsilon = 1e-12
        );
    }

    #[test]
    fn bed_surface_sits_on_frame() {
        let d = DerivedDimensions::derive(Archetype::Bed, Some(&bed()), &RealizeConfig::default());
        let surface = d.part_plan("sleepSurface");
        assert_eq!(surface.role, PartRole::Surface);
        assert_relative_eq!(surface.offset.z, 0.4, epsilon = 1e-12);

        let frame = d.part_plan("frame");
        assert_eq!(frame.count, SUPPORT_COUNT);
        assert_relative_eq!(frame.offset.z, 0.149, epsilon = 1e-12);
    }

    #[test]
    fn headboard_stands_behind_mattress() {
        let d = DerivedDimensions::derive(Archetype::Bed, Some(&bed()), &RealizeConfig::default());
        let h = d.headboard().unwrap();
        assert_relative_eq!(h.location.y, 1.0 + 0.08, epsilon = 1e-12);
        // Surface top at 0.5, headboard centered 0.3 above it
        assert_relative_eq!(h.location.z, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn headboard_skipped_when_not_taller_than_sleeping_height() {
        let mut spec = bed();
        spec.set_number("totalHeight", 0.5);
        let d = DerivedDimensions::derive(Archetype::Bed, Some(&spec), &RealizeConfig::default());
        assert!(d.headboard().is_none());
    }

    #[test]
    fn surface_height_without_mattress() {
        let spec = physical(json!({ "sleepingHeight": 0.5 }));
        let d = BedDimensions::derive(Some(&spec), 0.002);
        assert_eq!(d.surface_height, Some(0.5));
        assert!(d.surface_scale.is_none());
        assert!(d.back_thickness.is_none());
    }

    #[test]
    fn table_formulas() {
        let spec = physical(json!({ "surfaceWidth": 1.2, "surfaceDepth": 0.8, "surfaceHeight": 0.75 }));
        let d = TableDimensions::derive(Some(&spec), 0.002);
        assert_relative_eq!(d.leg_thickness.unwrap(), 0.06, epsilon = 1e-12);
        assert_relative_eq!(d.surface_scale.unwrap(), Vector3::new(1.2, 0.8, 0.064), epsilon = 1e-12);
        assert_relative_eq!(d.support_scale.unwrap(), Vector3::new(0.06, 0.06, 0.748), epsilon = 1e-12);

        let surface = d.part_plan("surface");
        assert_relative_eq!(surface.offset.z, 0.75 + 0.032, epsilon = 1e-12);
    }

    #[test]
    fn chair_formulas() {
        let d = ChairDimensions::derive(Some(&chair()), 0.002);
        assert_relative_eq!(d.leg_thickness.unwrap(), 0.025, epsilon = 1e-12);
        assert_relative_eq!(d.seat_thickness.unwrap(), 0.036, epsilon = 1e-12);
        assert_relative_eq!(d.back_height.unwrap(), 0.45, epsilon = 1e-12);
        assert_relative_eq!(d.back_width.unwrap(), 0.405, epsilon = 1e-12);
        assert_relative_eq!(d.back_thickness.unwrap(), 0.0288, epsilon = 1e-12);
        assert_relative_eq!(
            d.support_scale.unwrap(),
            Vector3::new(0.025, 0.025, 0.448),
            epsilon = 1e-12
        );
    }

    #[test]
    fn chair_seat_top_at_seat_height() {
        let d = ChairDimensions::derive(Some(&chair()), 0.002);
        let seat = d.part_plan("seat");
        assert_eq!(seat.role, PartRole::Seat);
        assert_relative_eq!(seat.offset.z + seat.scale.unwrap().z / 2.0, 0.45, epsilon = 1e-12);

        let back = d.part_plan("back");
        assert_relative_eq!(back.offset.y, 0.225 - 0.0144, epsilon = 1e-12);
        assert_relative_eq!(back.offset.z, 0.675, epsilon = 1e-12);
    }

    #[test]
    fn chair_seat_without_height_sinks_below_origin() {
        let spec = physical(json!({ "seatWidth": 0.45, "seatDepth": 0.45 }));
        let d = ChairDimensions::derive(Some(&spec), 0.002);
        let seat = d.part_plan("seat");
        assert_relative_eq!(seat.offset.z, -0.018, epsilon = 1e-12);
    }

    #[test]
    fn chair_layout_uses_footprint_and_seat_width_margin() {
        let d = DerivedDimensions::derive(Archetype::Chair, Some(&chair()), &RealizeConfig::default());
        let layout = d.support_layout(&RealizeConfig::default()).unwrap();
        let (x, y) = layout.corner(0).unwrap();
        assert_relative_eq!(x, -0.23075, epsilon = 1e-12);
        assert_relative_eq!(y, -0.23075, epsilon = 1e-12);
    }

    #[test]
    fn missing_fields_skip_whole_derivations() {
        let spec = physical(json!({ "seatWidth": 0.45 }));
        let d = ChairDimensions::derive(Some(&spec), 0.002);
        assert!(d.leg_thickness.is_none());
        assert!(d.seat_scale.is_none());
        assert!(d.support_scale.is_none());
        assert!(d.back_scale.is_none());
        assert_relative_eq!(d.seat_thickness.unwrap(), 0.036, epsilon = 1e-12);

        let derived = DerivedDimensions::Chair(d);
        assert!(derived.support_layout(&RealizeConfig::default()).is_none());
        let seat = derived.part_plan("seat");
        assert!(seat.scale.is_none());
        assert_eq!(seat.offset, Vector3::zeros());
    }

    #[test]
    fn no_physical_means_no_scales() {
        let d = DerivedDimensions::derive(Archetype::Table, None, &RealizeConfig::default());
        assert!(d.part_plan("surface").scale.is_none());
        assert!(d.part_plan("supports").scale.is_none());
        assert!(d.support_layout(&RealizeConfig::default()).is_none());
    }

    fn assert_positive(scale: Option<Vector3<f64>>, what: &str) {
        let scale = scale.unwrap_or_else(|| panic!("{what} not derived"));
        assert!(scale.iter().all(|&c| c > 0.0), "{what} has a non-positive component: {scale:?}");
    }

    #[test]
    fn complete_specs_derive_positive_scales() {
        for (width, length, sleeping, total, mattress, under) in [
            (0.9, 1.9, 0.45, 0.9, 0.15, 0.2),
            (1.4, 2.0, 0.5, 1.1, 0.2, 0.3),
            (1.8, 2.1, 0.6, 1.3, 0.3, 0.05),
        ] {
            let spec = physical(json!({
                "sleepingWidth": width, "sleepingLength": length, "sleepingHeight": sleeping,
                "totalHeight": total, "mattressThickness": mattress, "clearanceUnder": under
            }));
            let d = BedDimensions::derive(Some(&spec), 0.002);
            assert_positive(d.surface_scale, "bed surface");
            assert_positive(d.support_scale, "bed supports");
            assert_positive(d.headboard_scale, "headboard");
        }

        for (width, depth, height) in [(0.6, 0.6, 0.45), (1.2, 0.8, 0.75), (2.4, 1.0, 1.05)] {
            let spec = physical(json!({
                "surfaceWidth": width, "surfaceDepth": depth, "surfaceHeight": height
            }));
            let d = TableDimensions::derive(Some(&spec), 0.002);
            assert_positive(d.surface_scale, "table surface");
            assert_positive(d.support_scale, "table supports");
        }

        for (seat_width, seat_depth, seat_height, total, fw, fd) in [
            (0.4, 0.4, 0.42, 0.8, 0.44, 0.44),
            (0.45, 0.45, 0.45, 0.9, 0.5, 0.5),
            (0.55, 0.5, 0.48, 1.1, 0.65, 0.6),
        ] {
            let spec = physical(json!({
                "seatWidth": seat_width, "seatDepth": seat_depth, "seatHeight": seat_height,
                "totalHeight": total, "footprint": { "width": fw, "depth": fd }
            }));
            let d = ChairDimensions::derive(Some(&spec), 0.002);
            assert_positive(d.seat_scale, "seat");
            assert_positive(d.support_scale, "chair supports");
            assert_positive(d.back_scale, "back");
        }
    }

    #[test]
    fn unknown_parts_are_unmapped() {
        let d = DerivedDimensions::derive(Archetype::Chair, Some(&chair()), &RealizeConfig::default());
        let arm = d.part_plan("armrest");
        assert!(!arm.is_mapped());
        assert_eq!(arm.count, 1);
        assert!(arm.scale.is_none());
        // Mapped names are archetype specific
        let d = DerivedDimensions::derive(Archetype::Bed, Some(&bed()), &RealizeConfig::default());
        assert!(!d.part_plan("seat").is_mapped());
    }
}
