// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scene operations.

use crate::keys::{CollectionId, ObjectId};

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing host state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host cannot accept calls right now.
    #[error("scene host unavailable: {0}")]
    Unavailable(String),

    /// A referenced object is not in the scene.
    #[error("object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// A referenced collection is not in the scene.
    #[error("collection not found: {0:?}")]
    CollectionNotFound(CollectionId),

    /// An object with this name already exists.
    #[error("object name already in use: {0}")]
    DuplicateName(String),

    /// Parenting would make an object its own ancestor.
    #[error("parenting {child:?} to {parent:?} would create a cycle")]
    ParentCycle { child: ObjectId, parent: ObjectId },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
