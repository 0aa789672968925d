//! HUB75 LED Matrix Canvas
//!
//! A display surface for chained HUB75 RGB LED panels. It sits between a
//! host rendering loop and a scan-driving panel driver: it validates the
//! panel configuration, translates host pixel formats into driver formats,
//! clips drawing to the virtual canvas and moves pixel buffers to the driver
//! with as few transfers as possible.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - Panel grids with serpentine and zigzag chaining
//! - Pin presets for common controller boards
//! - Packed and strided buffer transfers
//! - Brightness gating and double buffering
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hub75_canvas::{
//!     Builder, Color, ColorBitness, ColorOrder, Dimensions, Hub75Display, PanelLayout,
//!     PixelSource,
//! };
//! # use hub75_canvas::{PanelDriver, PixelBlock};
//! # struct PanelEngine;
//! # impl PanelDriver for PanelEngine {
//! #     type Error = core::convert::Infallible;
//! #     fn initialize(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_pixel(&mut self, _x: u16, _y: u16, _r: u8, _g: u8, _b: u8) {}
//! #     fn draw_pixels(&mut self, _block: PixelBlock<'_>) {}
//! #     fn clear(&mut self) {}
//! #     fn flip_buffer(&mut self) {}
//! #     fn set_brightness(&mut self, _level: u8) {}
//! # }
//! let dims = match Dimensions::new(64, 32) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .dimensions(dims)
//!     .layout(2, 2, PanelLayout::TopLeftDown)
//!     .board("adafruit-matrix-portal-s3")
//!     .double_buffer(true)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Hub75Display::new(config);
//! display.setup(|_config| PanelEngine);
//! display.dump_config();
//!
//! let sprite = [0u8; 16 * 16 * 2];
//! display.update(|display| {
//!     display.draw_pixel_at(127, 63, Color::RED);
//!     display.draw_pixels_at(
//!         8,
//!         8,
//!         16,
//!         16,
//!         &PixelSource::packed(&sprite, ColorBitness::Rgb565, ColorOrder::Rgb),
//!     );
//! });
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Buffer-to-driver transfer and clipping
pub mod blit;
/// Pin presets for known controller boards
pub mod boards;
/// RGB color type
pub mod color;
/// Display configuration types and builder
pub mod config;
/// Canvas operations
pub mod display;
/// Panel driver and watchdog contracts
pub mod driver;
/// Error types
pub mod error;
/// Host-to-driver pixel format translation
pub mod format;
/// Enable/brightness state machine
pub mod state;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use blit::{PixelSource, Region, SourceLayout, Transfer};
pub use boards::Board;
pub use color::Color;
pub use config::{
    Builder, ClockSpeed, Config, Dimensions, Layout, PanelLayout, PinRole, Pins, ScanPattern,
    ShiftDriver,
};
pub use display::Hub75Display;
pub use driver::{LivenessSignal, NoWatchdog, PanelDriver, PixelBlock};
pub use error::{BuilderError, Error, LayoutViolation};
pub use format::{
    ColorBitness, ColorOrder, DriverColorOrder, PixelEncoding, PixelFormat, PixelPipeline,
};
pub use state::{PowerState, RuntimeState};
