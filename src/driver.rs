//! Panel driver and host collaborator contracts
//!
//! This module provides the [`PanelDriver`] trait implemented by the
//! scan-driving engine (DMA, bit-plane timing, pin multiplexing), and the
//! [`LivenessSignal`] trait through which the display keeps a cooperative
//! watchdog fed during long pixel loops.
//!
//! ## Example
//!
//! ```
//! use hub75_canvas::driver::{PanelDriver, PixelBlock};
//!
//! /// Driver that discards everything, for bring-up without a panel.
//! struct NullDriver;
//!
//! impl PanelDriver for NullDriver {
//!     type Error = core::convert::Infallible;
//!
//!     fn initialize(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!     fn set_pixel(&mut self, _x: u16, _y: u16, _r: u8, _g: u8, _b: u8) {}
//!     fn draw_pixels(&mut self, _block: PixelBlock<'_>) {}
//!     fn clear(&mut self) {}
//!     fn flip_buffer(&mut self) {}
//!     fn set_brightness(&mut self, _level: u8) {}
//! }
//! ```

use core::fmt::Debug;

use crate::blit::Region;
use crate::format::PixelEncoding;

/// A block of pixels handed to [`PanelDriver::draw_pixels`]
///
/// `data` holds exactly `region.w * region.h * encoding.bytes_per_pixel()`
/// bytes with rows packed back to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBlock<'a> {
    /// Destination on the virtual canvas
    pub region: Region,
    /// Packed pixel bytes
    pub data: &'a [u8],
    /// Encoding of `data`
    pub encoding: PixelEncoding,
    /// Multi-byte pixels are stored most significant byte first
    pub big_endian: bool,
}

/// Trait for the HUB75 scan-driving engine
///
/// Coordinates are virtual canvas coordinates; the driver maps them onto
/// chained panels according to the [`Config`](crate::config::Config) it was
/// built from. The display never calls a drawing method with coordinates
/// outside the canvas.
pub trait PanelDriver {
    /// Error type for initialization
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// One-time hardware setup
    ///
    /// # Errors
    ///
    /// Returns an error if the panel cannot be driven. The display does not
    /// retry.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Set a single pixel
    fn set_pixel(&mut self, x: u16, y: u16, r: u8, g: u8, b: u8);

    /// Transfer a block of encoded pixels
    fn draw_pixels(&mut self, block: PixelBlock<'_>);

    /// Turn every pixel off
    fn clear(&mut self);

    /// Present the back buffer
    ///
    /// Only called when double buffering is configured.
    fn flip_buffer(&mut self);

    /// Set the global brightness
    fn set_brightness(&mut self, level: u8);
}

/// Host watchdog collaborator
///
/// The display runs on the host's single cooperative loop. Pixel writes call
/// [`feed`](Self::feed) so that a full-canvas fill cannot starve the
/// watchdog.
pub trait LivenessSignal {
    /// Signal that the current task is still making progress
    fn feed(&mut self);
}

/// [`LivenessSignal`] for hosts without a watchdog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoWatchdog;

impl LivenessSignal for NoWatchdog {
    fn feed(&mut self) {}
}

impl<T: LivenessSignal + ?Sized> LivenessSignal for &mut T {
    fn feed(&mut self) {
        (**self).feed();
    }
}
