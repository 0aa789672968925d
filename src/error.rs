//! Error types for the crate
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and draw operations ([`Error`]).
//!
//! Draw errors never reach the host through the canvas API: the
//! [`Hub75Display`](crate::display::Hub75Display) logs them and drops the
//! offending call. They are returned directly by the lower-level
//! [`translate`](crate::format::translate) and [`blit`](crate::blit::blit)
//! functions.
//!
//! ## Example
//!
//! ```
//! use hub75_canvas::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Zero-sized panel
//! let result = Dimensions::new(0, 32);
//! assert!(result.is_err());
//! ```

use crate::config::{PanelLayout, PinRole, ShiftDriver};
use crate::format::{ColorBitness, ColorOrder, PixelPipeline};

/// Errors that can occur while drawing a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The driver has no encoding for this buffer description
    UnsupportedFormat {
        /// Bitness of the source buffer
        bitness: ColorBitness,
        /// Channel order of the source buffer
        order: ColorOrder,
        /// Pixel pipeline in effect
        pipeline: PixelPipeline,
    },
    /// Source buffer is shorter than the region and layout require
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Source layout addresses bytes beyond `usize::MAX`
    LayoutOverflow,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFormat {
                bitness,
                order,
                pipeline,
            } => write!(
                f,
                "Unsupported pixel format: {}-bit {order:?} in {pipeline:?} pipeline",
                bitness.bits()
            ),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::LayoutOverflow => write!(f, "Source layout overflows the address space"),
        }
    }
}

impl core::error::Error for Error {}

/// Why a panel layout was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutViolation {
    /// Layout rows or columns is zero
    Empty,
    /// A single panel must use [`PanelLayout::Horizontal`]
    SinglePanelNotHorizontal,
    /// [`PanelLayout::Horizontal`] chains panels in one row only
    HorizontalMultiRow,
    /// Serpentine layouts flip alternate rows and need more than one row
    SerpentineSingleRow,
    /// Zigzag layouts need more than one row and more than one column
    ZigzagNotGrid,
}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// Panel dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid panel dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Panel width requested
        width: u16,
        /// Panel height requested
        height: u16,
    },
    /// The virtual canvas does not fit 16-bit coordinates
    CanvasTooLarge {
        /// Virtual width in pixels
        width: u32,
        /// Virtual height in pixels
        height: u32,
    },
    /// The layout grid and chaining pattern do not agree
    InvalidLayout {
        /// Chaining pattern requested
        layout: PanelLayout,
        /// Panel rows requested
        rows: u8,
        /// Panel columns requested
        cols: u8,
        /// Rule that was broken
        violation: LayoutViolation,
    },
    /// A pin has no assignment from either a board preset or an override
    MissingPin(PinRole),
    /// No board preset with this name exists
    UnknownBoard,
    /// The shift driver needs the inverted clock phase
    ClockPhaseRequired(ShiftDriver),
    /// A numeric setting is outside its accepted range
    OutOfRange {
        /// Setting name
        field: &'static str,
        /// Value provided
        value: u32,
        /// Smallest accepted value
        min: u32,
        /// Largest accepted value
        max: u32,
    },
    /// An explicit minimum refresh rate was combined with an update interval
    ///
    /// The refresh rate is derived from the update interval unless the
    /// interval is "never".
    RefreshRateConflict,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid panel dimensions {width}x{height}")
            }
            Self::CanvasTooLarge { width, height } => {
                write!(f, "Virtual canvas {width}x{height} exceeds 16-bit coordinates")
            }
            Self::InvalidLayout {
                layout,
                rows,
                cols,
                violation,
            } => write!(
                f,
                "Invalid layout {layout:?} with {rows} rows and {cols} cols: {violation:?}"
            ),
            Self::MissingPin(role) => write!(
                f,
                "Required pin {role:?} is missing; specify a board preset or provide all pins"
            ),
            Self::UnknownBoard => write!(f, "Unknown board preset"),
            Self::ClockPhaseRequired(driver) => {
                write!(f, "{driver:?} shift driver requires inverted clock phase")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} {value} out of range {min}..={max}"),
            Self::RefreshRateConflict => write!(
                f,
                "Cannot set both min refresh rate and update interval (except never)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
