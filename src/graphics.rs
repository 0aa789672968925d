//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem for [`Hub75Display`]. Pixels go through
//! [`Hub75Display::draw_pixel_at`], so drawing off the canvas, before setup
//! or at zero brightness is silently ignored.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use hub75_canvas::{Builder, Color, Dimensions, Hub75Display};
//! # use hub75_canvas::{PanelDriver, PixelBlock};
//! # struct NullDriver;
//! # impl PanelDriver for NullDriver {
//! #     type Error = core::convert::Infallible;
//! #     fn initialize(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_pixel(&mut self, _x: u16, _y: u16, _r: u8, _g: u8, _b: u8) {}
//! #     fn draw_pixels(&mut self, _block: PixelBlock<'_>) {}
//! #     fn clear(&mut self) {}
//! #     fn flip_buffer(&mut self) {}
//! #     fn set_brightness(&mut self, _level: u8) {}
//! # }
//! # let dims = match Dimensions::new(64, 32) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).board("esp32-trinity").build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Hub75Display::new(config);
//! display.setup(|_config| NullDriver);
//!
//! display.update(|display| {
//!     let _ = Rectangle::new(Point::new(0, 0), Size::new(64, 8))
//!         .into_styled(PrimitiveStyle::with_fill(Color::BLUE))
//!         .draw(display);
//!
//!     let _ = Circle::new(Point::new(50, 14), 12)
//!         .into_styled(PrimitiveStyle::with_stroke(Color::RED, 1))
//!         .draw(display);
//!
//!     let _ = Text::new(
//!         "HUB75",
//!         Point::new(2, 24),
//!         MonoTextStyle::new(&FONT_6X10, Color::WHITE),
//!     )
//!     .draw(display);
//! });
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Color;
use crate::display::Hub75Display;
use crate::driver::{LivenessSignal, PanelDriver};

impl<D, W> DrawTarget for Hub75Display<D, W>
where
    D: PanelDriver,
    W: LivenessSignal,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel_at(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<D, W> OriginDimensions for Hub75Display<D, W>
where
    D: PanelDriver,
    W: LivenessSignal,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
