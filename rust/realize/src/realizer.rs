// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry realization.
//!
//! Every part gets a non-rendering anchor and `count` unit-cube proxies
//! parented to it. Anchors are repositioned on every call; proxies are only
//! placed when first created, so hand edits to existing proxies survive a
//! `preserve` run.

use furnish_model::{Archetype, AssetDescription, PartSummary};
use furnish_scene::{Bounds, CollectionId, MeshId, ObjectId, ObjectKey, SceneGraph, Slot, Vector3};
use serde::Serialize;

use crate::config::{RealizeConfig, RegenerationMode};
use crate::derive::{DerivedDimensions, HeadboardPlan, PartPlan, PartRole};
use crate::ergonomics::{self, ErgonomicsReport};
use crate::error::{Error, Result};
use crate::layout::{column_offset, SupportLayout};
use crate::measure::collection_bounds;

/// Part id under which the bed headboard singleton is keyed.
pub const HEADBOARD_PART: &str = "headboard";

/// Outcome of one realization call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizationReport {
    pub asset_id: String,
    pub archetype: Archetype,
    pub regeneration: RegenerationMode,
    /// Objects removed before regenerating (`replace` only).
    pub removed: usize,
    /// Anchors placed, new or existing.
    pub anchors: usize,
    pub created: usize,
    /// Existing proxies left untouched.
    pub preserved: usize,
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ergonomics: Option<ErgonomicsReport>,
}

#[derive(Debug, Default)]
struct Tally {
    anchors: usize,
    created: usize,
    preserved: usize,
}

/// Realizes descriptions into a scene host with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Realizer {
    config: RealizeConfig,
}

impl Realizer {
    pub fn new(config: RealizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RealizeConfig {
        &self.config
    }

    /// Realizes `description` into its collection.
    ///
    /// Host availability and the archetype are checked before anything is
    /// written, so those failures leave the scene untouched.
    pub fn realize<S: SceneGraph + ?Sized>(
        &self,
        scene: &mut S,
        description: &AssetDescription,
    ) -> Result<RealizationReport> {
        scene
            .ensure_available()
            .map_err(|source| Error::HostUnavailable { source })?;
        let archetype: Archetype = description.archetype.parse()?;

        let summary = PartSummary::from_description(description);
        tracing::debug!(asset = %summary.asset_id, "Part summary:\n{}", summary.to_ascii());

        let physical = description.physical.as_ref();
        let dims = DerivedDimensions::derive(archetype, physical, &self.config);
        let layout = dims.support_layout(&self.config);
        if layout.is_none() {
            tracing::debug!(asset = %summary.asset_id, "No support layout, using column fallback");
        }

        let collection = scene.collection_or_create(&summary.asset_id)?;
        let removed = match self.config.regeneration {
            RegenerationMode::Replace => clear_collection(scene, collection)?,
            RegenerationMode::Preserve => 0,
        };
        let cube = scene.unit_cube()?;

        let mut tally = Tally::default();
        for (index, part) in summary.parts.iter().enumerate() {
            let plan = dims.part_plan(&part.id);
            self.place_part(
                scene,
                collection,
                cube,
                PartRef {
                    asset_id: &summary.asset_id,
                    part_id: &part.id,
                    index,
                },
                &plan,
                layout.as_ref(),
                &mut tally,
            )?;
        }

        if let Some(headboard) = dims.headboard() {
            place_headboard(scene, collection, cube, &summary.asset_id, &headboard, &mut tally)?;
        }

        let ergonomics = match physical {
            Some(declared) if archetype.has_ergonomics_check() => ergonomics::verify(
                scene,
                collection,
                &summary.asset_id,
                declared,
                &self.config,
            )?,
            _ => None,
        };

        let bounds = collection_bounds(&*scene, collection)?;

        tracing::info!(
            asset = %summary.asset_id,
            archetype = %archetype,
            mode = %self.config.regeneration,
            removed,
            anchors = tally.anchors,
            created = tally.created,
            preserved = tally.preserved,
            "Realized asset"
        );

        Ok(RealizationReport {
            asset_id: summary.asset_id,
            archetype,
            regeneration: self.config.regeneration,
            removed,
            anchors: tally.anchors,
            created: tally.created,
            preserved: tally.preserved,
            bounds,
            ergonomics,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn place_part<S: SceneGraph + ?Sized>(
        &self,
        scene: &mut S,
        collection: CollectionId,
        cube: MeshId,
        part: PartRef<'_>,
        plan: &PartPlan,
        layout: Option<&SupportLayout>,
        tally: &mut Tally,
    ) -> Result<()> {
        let anchor = find_or_create(
            scene,
            collection,
            ObjectKey::anchor(part.asset_id, part.part_id),
            None,
        )?;
        let base = anchor_location(plan, part.index, layout.is_some(), self.config.part_spacing);
        scene.set_location(anchor, base)?;
        tally.anchors += 1;

        for sub_index in 0..plan.count {
            let key = ObjectKey::instance(part.asset_id, part.part_id, sub_index);
            if scene.find(&key).is_some() {
                tracing::debug!(object = %key, "Preserving existing object");
                tally.preserved += 1;
                continue;
            }

            let id = scene.create_object(collection, key, Some(cube))?;
            if let Some(scale) = plan.scale {
                scene.set_scale(id, scale)?;
            }
            let location = instance_location(plan, sub_index, layout, self.config.support_spacing);
            scene.set_location(id, location)?;
            scene.set_parent(id, anchor)?;
            tracing::debug!(
                part = part.part_id,
                sub_index,
                scaled = plan.scale.is_some(),
                "Created proxy"
            );
            tally.created += 1;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct PartRef<'a> {
    asset_id: &'a str,
    part_id: &'a str,
    /// Position in the id-sorted part list.
    index: usize,
}

fn find_or_create<S: SceneGraph + ?Sized>(
    scene: &mut S,
    collection: CollectionId,
    key: ObjectKey,
    mesh: Option<MeshId>,
) -> Result<ObjectId> {
    match scene.find(&key) {
        Some(id) => Ok(id),
        None => Ok(scene.create_object(collection, key, mesh)?),
    }
}

fn clear_collection<S: SceneGraph + ?Sized>(
    scene: &mut S,
    collection: CollectionId,
) -> Result<usize> {
    let members = scene.members(collection)?;
    let count = members.len();
    for id in members {
        scene.remove_object(id)?;
    }
    tracing::debug!(removed = count, "Cleared collection");
    Ok(count)
}

fn place_headboard<S: SceneGraph + ?Sized>(
    scene: &mut S,
    collection: CollectionId,
    cube: MeshId,
    asset_id: &str,
    plan: &HeadboardPlan,
    tally: &mut Tally,
) -> Result<()> {
    let key = ObjectKey::new(asset_id, HEADBOARD_PART, Slot::Headboard);
    if scene.find(&key).is_some() {
        tracing::debug!(object = %key, "Preserving existing headboard");
        tally.preserved += 1;
        return Ok(());
    }
    let id = scene.create_object(collection, key, Some(cube))?;
    scene.set_transform(id, plan.location, plan.scale)?;
    tally.created += 1;
    Ok(())
}

/// Mapped parts sit at the origin. Parts without a mapping, and supports
/// without a layout, are spread along X by their position in the part list.
fn anchor_location(plan: &PartPlan, index: usize, has_layout: bool, spacing: f64) -> Vector3<f64> {
    let spread = match plan.role {
        PartRole::Surface | PartRole::Seat | PartRole::Back => false,
        PartRole::Supports => !has_layout,
        PartRole::Unmapped => true,
    };
    if spread {
        Vector3::new(index as f64 * spacing, 0.0, 0.0)
    } else {
        Vector3::zeros()
    }
}

fn instance_location(
    plan: &PartPlan,
    sub_index: u32,
    layout: Option<&SupportLayout>,
    spacing: f64,
) -> Vector3<f64> {
    let mut location = plan.offset;
    if plan.role == PartRole::Supports {
        match layout.and_then(|l| l.corner(sub_index)) {
            Some((x, y)) => {
                location.x = x;
                location.y = y;
            }
            None => location.y = column_offset(sub_index, spacing),
        }
    }
    location
}
