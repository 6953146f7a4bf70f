// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chair ergonomics: measure, compare, correct, assert.
//!
//! Correction is a single rigid shift of the seat and back anchors. Bounds
//! move exactly with anchor translation, so one shift followed by one
//! re-measure is enough.

use furnish_model::PhysicalSpec;
use furnish_scene::{CollectionId, ObjectKey, SceneGraph, Vector3};
use serde::Serialize;

use crate::config::RealizeConfig;
use crate::error::{Error, Result};
use crate::measure::{collection_bounds, part_bounds};

/// Part whose top defines the measured seat height.
pub const SEAT_PART: &str = "seat";
/// Part shifted by the total height delta.
pub const BACK_PART: &str = "back";

/// A checked chair dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "seatHeight")]
    SeatHeight,
    #[serde(rename = "totalHeight")]
    TotalHeight,
    #[serde(rename = "footprint.width")]
    FootprintWidth,
    #[serde(rename = "footprint.depth")]
    FootprintDepth,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::SeatHeight,
        Metric::TotalHeight,
        Metric::FootprintWidth,
        Metric::FootprintDepth,
    ];

    /// Physical field path, also used as the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::SeatHeight => "seatHeight",
            Metric::TotalHeight => "totalHeight",
            Metric::FootprintWidth => "footprint.width",
            Metric::FootprintDepth => "footprint.depth",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics read back from evaluated geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Seat part top above the collection floor.
    pub seat_height: f64,
    pub total_height: f64,
    pub footprint_width: f64,
    pub footprint_depth: f64,
}

impl Measurement {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SeatHeight => self.seat_height,
            Metric::TotalHeight => self.total_height,
            Metric::FootprintWidth => self.footprint_width,
            Metric::FootprintDepth => self.footprint_depth,
        }
    }
}

/// Measures the chair in `collection`.
///
/// `None` when the collection or its seat part has no geometry.
pub fn measure<S: SceneGraph + ?Sized>(
    scene: &S,
    collection: CollectionId,
) -> Result<Option<Measurement>> {
    let Some(bounds) = collection_bounds(scene, collection)? else {
        return Ok(None);
    };
    let Some(seat) = part_bounds(scene, collection, SEAT_PART)? else {
        return Ok(None);
    };
    Ok(Some(Measurement {
        seat_height: seat.max_z - bounds.min_z,
        total_height: bounds.height(),
        footprint_width: bounds.width(),
        footprint_depth: bounds.depth(),
    }))
}

/// One declared-versus-measured comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCheck {
    pub metric: Metric,
    pub measured: f64,
    pub declared: f64,
    /// `measured − declared`
    pub delta: f64,
    pub exceeds_logging: bool,
    pub exceeds_assertion: bool,
}

/// Compares every declared metric that was also measured.
///
/// Deltas above the logging tolerance are reported as warnings and never
/// fail here.
pub fn compare(
    measurement: &Measurement,
    spec: &PhysicalSpec,
    config: &RealizeConfig,
) -> Vec<MetricCheck> {
    Metric::ALL
        .iter()
        .filter_map(|&metric| {
            let declared = spec.number(metric.as_str())?;
            let measured = measurement.get(metric);
            let delta = measured - declared;
            let check = MetricCheck {
                metric,
                measured,
                declared,
                delta,
                exceeds_logging: delta.abs() > config.logging_tolerance,
                exceeds_assertion: delta.abs() > config.assertion_tolerance,
            };
            if check.exceeds_logging {
                tracing::warn!(
                    metric = %metric,
                    measured,
                    declared,
                    delta,
                    tolerance = config.logging_tolerance,
                    "Ergonomic mismatch"
                );
            }
            Some(check)
        })
        .collect()
}

/// Anchor shifts applied by the corrector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub seat_shift: Option<f64>,
    pub back_shift: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgonomicsReport {
    pub measurement: Measurement,
    pub checks: Vec<MetricCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<Correction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_measurement: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_checks: Option<Vec<MetricCheck>>,
}

impl ErgonomicsReport {
    /// Post-correction checks when correction ran, initial checks otherwise.
    pub fn final_checks(&self) -> &[MetricCheck] {
        self.corrected_checks.as_deref().unwrap_or(&self.checks)
    }

    pub fn is_within_logging_tolerance(&self) -> bool {
        self.final_checks().iter().all(|c| !c.exceeds_logging)
    }
}

/// Runs the measure / compare / correct / assert loop for one chair.
///
/// Returns `Ok(None)` when there is nothing to measure.
pub fn verify<S: SceneGraph + ?Sized>(
    scene: &mut S,
    collection: CollectionId,
    asset_id: &str,
    declared: &PhysicalSpec,
    config: &RealizeConfig,
) -> Result<Option<ErgonomicsReport>> {
    let Some(measurement) = measure(&*scene, collection)? else {
        tracing::warn!(asset = asset_id, "No seat geometry to measure, skipping ergonomics check");
        return Ok(None);
    };
    let checks = compare(&measurement, declared, config);
    let mut report = ErgonomicsReport {
        measurement,
        checks,
        correction: None,
        corrected_measurement: None,
        corrected_checks: None,
    };

    if config.correct_ergonomics {
        let correction = correct(scene, asset_id, &measurement, declared)?;
        if let Some(corrected) = measure(&*scene, collection)? {
            report.corrected_checks = Some(compare(&corrected, declared, config));
            report.corrected_measurement = Some(corrected);
        }
        report.correction = Some(correction);
    }

    if config.assert_ergonomics {
        if let Some(check) = report.final_checks().iter().find(|c| c.exceeds_assertion) {
            tracing::error!(
                asset = asset_id,
                metric = %check.metric,
                delta = check.delta,
                tolerance = config.assertion_tolerance,
                "Ergonomics assertion failed"
            );
            return Err(Error::ErgonomicsAssertion {
                metric: check.metric,
                measured: check.measured,
                declared: check.declared,
                delta: check.delta,
                tolerance: config.assertion_tolerance,
            });
        }
    }

    Ok(Some(report))
}

/// Shifts the seat anchor by the seat height delta and the back anchor by
/// the total height delta, both taken from `measurement`.
fn correct<S: SceneGraph + ?Sized>(
    scene: &mut S,
    asset_id: &str,
    measurement: &Measurement,
    declared: &PhysicalSpec,
) -> Result<Correction> {
    let mut correction = Correction::default();

    let seat_delta = declared
        .number(Metric::SeatHeight.as_str())
        .map(|d| d - measurement.seat_height);
    if let Some(dz) = seat_delta {
        if shift_anchor(scene, asset_id, SEAT_PART, dz)? {
            correction.seat_shift = Some(dz);
        }
    }

    // Back follows the total height delta, not a back-specific one
    let total_delta = declared
        .number(Metric::TotalHeight.as_str())
        .map(|d| d - measurement.total_height);
    if let Some(dz) = total_delta {
        if shift_anchor(scene, asset_id, BACK_PART, dz)? {
            correction.back_shift = Some(dz);
        }
    }

    tracing::debug!(
        asset = asset_id,
        seat_shift = ?correction.seat_shift,
        back_shift = ?correction.back_shift,
        "Applied ergonomics correction"
    );
    Ok(correction)
}

fn shift_anchor<S: SceneGraph + ?Sized>(
    scene: &mut S,
    asset_id: &str,
    part_id: &str,
    dz: f64,
) -> Result<bool> {
    let Some(anchor) = scene.find(&ObjectKey::anchor(asset_id, part_id)) else {
        tracing::debug!(asset = asset_id, part = part_id, "No anchor to shift");
        return Ok(false);
    };
    let location = scene.location(anchor).unwrap_or_else(Vector3::zeros);
    scene.set_location(anchor, location + Vector3::new(0.0, 0.0, dz))?;
    Ok(true)
}
