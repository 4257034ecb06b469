// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model tables and topology parsing.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading model tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A topology string contained a token that is neither a node id,
    /// an arc flag nor a group marker.
    #[error("malformed topology token: {token:?}")]
    MalformedTopology {
        /// The offending token as it appeared in the (uppercased) input.
        token: String,
    },

    /// A standalone `P` marker was not followed by a node id.
    #[error("dangling inclusion-point marker at end of topology string")]
    DanglingPointMarker,

    /// An entity selection string could not be parsed.
    #[error("malformed selection list: {0:?}")]
    MalformedSelection(String),
}
