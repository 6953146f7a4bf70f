// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::ergonomics::Metric;

/// Result type for realization
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during realization
#[derive(Error, Debug)]
pub enum Error {
    /// Raised before any host mutation.
    #[error("scene host unavailable")]
    HostUnavailable {
        #[source]
        source: furnish_scene::Error,
    },

    #[error("invalid input: {0}")]
    Input(#[from] furnish_model::Error),

    #[error("scene error: {0}")]
    Scene(#[from] furnish_scene::Error),

    #[error(
        "ergonomics assertion failed for {metric}: measured {measured:.4}, declared {declared:.4}, \
         delta {delta:+.4} exceeds {tolerance}"
    )]
    ErgonomicsAssertion {
        metric: Metric,
        measured: f64,
        declared: f64,
        delta: f64,
        tolerance: f64,
    },
}
