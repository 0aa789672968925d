//! Color type for RGB LED matrix panels
//!
//! HUB75 panels take one 8-bit intensity per channel. The driver performs
//! its own gamma correction and bit-plane expansion, so this type only
//! carries the raw channel values handed to [`PanelDriver::set_pixel`].
//!
//! A color is "off" when every channel is zero. Filling the canvas with an
//! off color takes the driver's hardware clear path instead of writing
//! every pixel.
//!
//! ## Example
//!
//! ```
//! use hub75_canvas::Color;
//!
//! let amber = Color::new(255, 191, 0);
//! assert!(amber.is_on());
//! assert!(!Color::BLACK.is_on());
//! ```
//!
//! [`PanelDriver::set_pixel`]: crate::driver::PanelDriver::set_pixel

/// 24-bit RGB color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// All channels off
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// All channels at full intensity
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Full red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Full green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Full blue
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a color from its channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether any channel is lit
    ///
    /// ## Example
    ///
    /// ```
    /// use hub75_canvas::Color;
    ///
    /// assert!(Color::new(0, 0, 1).is_on());
    /// assert!(!Color::new(0, 0, 0).is_on());
    /// ```
    pub const fn is_on(&self) -> bool {
        self.r != 0 || self.g != 0 || self.b != 0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU24;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb888 {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_off() {
        assert!(!Color::BLACK.is_on());
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_any_single_channel_is_on() {
        assert!(Color::new(1, 0, 0).is_on());
        assert!(Color::new(0, 1, 0).is_on());
        assert!(Color::new(0, 0, 1).is_on());
        assert!(Color::WHITE.is_on());
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_rgb888_conversion_keeps_channels() {
        use embedded_graphics_core::pixelcolor::Rgb888;

        let color = Color::from(Rgb888::new(12, 34, 56));
        assert_eq!(color, Color::new(12, 34, 56));
        assert_eq!(Rgb888::from(color), Rgb888::new(12, 34, 56));
    }
}
