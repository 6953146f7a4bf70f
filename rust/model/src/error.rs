// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for description parsing.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the input boundary.
///
/// Only structural problems are errors. Missing or non-numeric physical
/// fields are not: they degrade the affected derived quantity instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required structural key (`assetId`, `archetype`, `detailTier`,
    /// `parts`, or a part's `kind`) is missing or has the wrong type.
    #[error("malformed asset description: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The archetype has no derivation rules.
    #[error("unsupported archetype: {0}")]
    UnsupportedArchetype(String),
}
