// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the output channel engine.
//!
//! Runtime value operations never fail: out-of-range values are clamped or
//! wrapped and refused hardware syncs are reported through return values.
//! Errors only surface when channels and outputs are constructed from a
//! configuration, or when an output is addressed with an unknown channel
//! index.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A channel or output configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A JSON configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The output has no channel at the given index.
    #[error("no channel at index {0}")]
    UnknownChannel(usize),

    /// The operation requires a different device category.
    #[error("operation requires the {0} category")]
    UnsupportedCategory(&'static str),
}

/// Errors detected while validating channel and output configurations.
///
/// These are construction-time defects: a channel that passed validation can
/// never produce one of them later.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The channel range is empty (`max <= min`).
    #[error("degenerate channel range [{min}, {max}]")]
    DegenerateRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// A bound is NaN or infinite.
    #[error("channel bounds must be finite")]
    NonFiniteBound,

    /// The resolution is not a positive finite number.
    #[error("invalid resolution {0}")]
    InvalidResolution(f64),

    /// The dimming rate is not a positive finite number.
    #[error("invalid dimming rate {0} per ms")]
    InvalidDimRate(f64),

    /// The dimming floor lies outside the channel range.
    #[error("dimming floor {floor} is outside [{min}, {max}]")]
    DimFloorOutOfRange {
        /// Configured dimming floor.
        floor: f64,
        /// Channel minimum.
        min: f64,
        /// Channel maximum.
        max: f64,
    },

    /// An output must have at least one (primary) channel.
    #[error("output has no channels")]
    NoChannels,

    /// Two channels of the same output share an id.
    #[error("duplicate channel id: {0}")]
    DuplicateChannelId(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_display() {
        let err = ConfigError::DegenerateRange { min: 5.0, max: 5.0 };
        assert_eq!(err.to_string(), "degenerate channel range [5, 5]");
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::NoChannels.into();
        assert!(matches!(err, Error::Config(ConfigError::NoChannels)));
        assert_eq!(err.to_string(), "configuration error: output has no channels");
    }

    #[test]
    fn unknown_channel_display() {
        assert_eq!(Error::UnknownChannel(3).to_string(), "no channel at index 3");
    }

    #[test]
    fn parse_error_from_serde() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
