// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Four-corner support layout.
//!
//! Given a rectangular surface of width `W` and depth `D`, supports of
//! thickness `T` are pulled in from each edge by half their thickness plus an
//! inset margin `m`:
//!
//! ```text
//! (±(W/2 − T/2 − m), ±(D/2 − T/2 − m))
//! ```

/// Ratio of seat width used as the chair leg inset.
pub const WIDTH_PROPORTIONAL_INSET: f64 = 0.015;

/// Number of corners a layout produces.
pub const CORNER_COUNT: usize = 4;

/// Rule for the extra inward pull beyond half the support thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsetMargin {
    /// Constant margin in meters.
    Fixed(f64),
    /// Proportional to the given width (`width × 0.015`).
    WidthProportional(f64),
}

impl InsetMargin {
    /// Resolved margin in meters.
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            InsetMargin::Fixed(m) => m,
            InsetMargin::WidthProportional(width) => width * WIDTH_PROPORTIONAL_INSET,
        }
    }
}

/// Corner positions for four supports, relative to the surface center.
///
/// Order is fixed: (−,−), (+,−), (−,+), (+,+).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportLayout {
    corners: [(f64, f64); CORNER_COUNT],
}

impl SupportLayout {
    /// Solves the layout, or returns `None` when any dimension is missing or
    /// non-finite. Callers then fall back to [`column_offset`].
    pub fn solve(
        width: Option<f64>,
        depth: Option<f64>,
        thickness: Option<f64>,
        margin: InsetMargin,
    ) -> Option<Self> {
        let (w, d, t) = (width?, depth?, thickness?);
        let m = margin.value();
        if ![w, d, t, m].iter().all(|v| v.is_finite()) {
            return None;
        }

        let x = w / 2.0 - t / 2.0 - m;
        let y = d / 2.0 - t / 2.0 - m;
        Some(Self {
            corners: [(-x, -y), (x, -y), (-x, y), (x, y)],
        })
    }

    /// Corner for the `index`-th support.
    pub fn corner(&self, index: u32) -> Option<(f64, f64)> {
        self.corners.get(index as usize).copied()
    }

    pub fn corners(&self) -> &[(f64, f64); CORNER_COUNT] {
        &self.corners
    }
}

/// Degenerate single-column placement used when no layout can be solved.
#[inline]
pub fn column_offset(index: u32, spacing: f64) -> f64 {
    index as f64 * spacing
}
