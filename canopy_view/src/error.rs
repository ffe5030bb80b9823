// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the viewport primitives.

use core::fmt;

/// Error returned when a viewport operation would break a viewport invariant.
///
/// Every operation that returns this error leaves the viewport untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewError {
    /// A zoom factor would be non-finite, non-positive, or outside the
    /// configured limits.
    ZoomOutOfRange {
        /// The rejected zoom factor.
        zoom: f64,
        /// Lower zoom limit in effect.
        min: f64,
        /// Upper zoom limit in effect.
        max: f64,
    },
    /// A box (or tree size) has a zero, negative, or non-finite extent.
    DegenerateBox,
    /// The screen (or minimap) has a zero, negative, or non-finite extent.
    DegenerateScreen,
    /// An angle window is empty, inverted, or outside `[-180, 180]`.
    InvalidAngleWindow {
        /// Requested lower angle, in degrees.
        min: f64,
        /// Requested upper angle, in degrees.
        max: f64,
    },
    /// A coordinate or offset is not a finite number.
    NonFinite,
    /// A query-string parameter could not be parsed as a finite number.
    InvalidQueryValue {
        /// The offending parameter name (`x`, `y`, `w` or `h`).
        key: &'static str,
    },
    /// A configuration value is outside its valid domain.
    InvalidConfig {
        /// Name of the offending setting.
        setting: &'static str,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomOutOfRange { zoom, min, max } => {
                write!(f, "zoom {zoom} is outside the allowed range [{min}, {max}]")
            }
            Self::DegenerateBox => f.write_str("box has an empty or non-finite extent"),
            Self::DegenerateScreen => f.write_str("screen has an empty or non-finite extent"),
            Self::InvalidAngleWindow { min, max } => {
                write!(f, "angle window [{min}, {max}] is not a valid slice of [-180, 180]")
            }
            Self::NonFinite => f.write_str("coordinate is not a finite number"),
            Self::InvalidQueryValue { key } => {
                write!(f, "query parameter `{key}` is not a finite number")
            }
            Self::InvalidConfig { setting } => {
                write!(f, "configuration value `{setting}` is out of range")
            }
        }
    }
}

impl core::error::Error for ViewError {}
