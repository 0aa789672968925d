//! Pixel format translation
//!
//! Callers hand the display raw buffers described by a [`ColorBitness`] and a
//! [`ColorOrder`]. The panel driver only understands its own
//! [`PixelFormat`] and [`DriverColorOrder`] enumerations. [`translate`]
//! resolves one into the other, or rejects combinations the driver cannot
//! consume.
//!
//! | Bitness     | Pipeline | Format          | Bytes/pixel | Order mapping           |
//! |-------------|----------|-----------------|-------------|-------------------------|
//! | `Rgb565`    | any      | `Rgb565`        | 2           | RGB->RGB, BGR->BGR      |
//! | `Rgb888`    | any      | `Rgb888`        | 3           | RGB->RGB, BGR->BGR      |
//! | `Xrgb8888`  | `Padded` | `Rgb888Padded`  | 4           | RGB->RGB, others->BGR   |
//!
//! Everything else is [`Error::UnsupportedFormat`].
//!
//! ## Example
//!
//! ```
//! use hub75_canvas::format::{
//!     translate, ColorBitness, ColorOrder, DriverColorOrder, PixelFormat, PixelPipeline,
//! };
//!
//! let encoding = match translate(ColorBitness::Rgb565, ColorOrder::Bgr, PixelPipeline::Packed) {
//!     Ok(encoding) => encoding,
//!     Err(_) => return,
//! };
//! assert_eq!(encoding.format, PixelFormat::Rgb565);
//! assert_eq!(encoding.order, DriverColorOrder::Bgr);
//! assert_eq!(encoding.bytes_per_pixel(), 2);
//! ```

use crate::error::Error;

/// Bit depth of a caller-supplied pixel buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorBitness {
    /// 8-bit 3-3-2 packed color
    Rgb332,
    /// 16-bit 5-6-5 packed color
    Rgb565,
    /// 24-bit color, three tightly packed bytes
    Rgb888,
    /// 32-bit color, three channel bytes plus one padding byte
    Xrgb8888,
}

impl ColorBitness {
    /// Number of bits per pixel in the source buffer
    pub const fn bits(self) -> u8 {
        match self {
            Self::Rgb332 => 8,
            Self::Rgb565 => 16,
            Self::Rgb888 => 24,
            Self::Xrgb8888 => 32,
        }
    }
}

/// Channel order of a caller-supplied pixel buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Blue, green, red
    Bgr,
    /// Green, red, blue
    Grb,
}

/// Pixel pipeline the crate is integrated with
///
/// Graphics libraries that render into 32-bit pixels with a padding byte use
/// the [`Padded`](Self::Padded) pipeline. Only that pipeline may submit
/// [`ColorBitness::Xrgb8888`] buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelPipeline {
    /// Buffers are at most 24 bits per pixel
    #[default]
    Packed,
    /// Full-color buffers carry a padding byte per pixel
    Padded,
}

/// Pixel encoding understood by the panel driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16-bit 5-6-5
    Rgb565,
    /// 24-bit, tightly packed
    Rgb888,
    /// 24-bit color in 32-bit words
    Rgb888Padded,
}

impl PixelFormat {
    /// Bytes occupied by one pixel in this format
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => 2,
            Self::Rgb888 => 3,
            Self::Rgb888Padded => 4,
        }
    }
}

/// Channel order understood by the panel driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverColorOrder {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Blue, green, red
    Bgr,
}

/// Resolved driver-side description of a pixel buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelEncoding {
    /// Driver pixel format
    pub format: PixelFormat,
    /// Driver channel order
    pub order: DriverColorOrder,
}

impl PixelEncoding {
    /// Bytes occupied by one pixel
    pub const fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }
}

/// Resolve a caller buffer description into a driver encoding
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] when the driver has no encoding for
/// the combination: 8-bit buffers, 32-bit buffers outside the
/// [`PixelPipeline::Padded`] pipeline, or a GRB order on a 16/24-bit buffer.
pub fn translate(
    bitness: ColorBitness,
    order: ColorOrder,
    pipeline: PixelPipeline,
) -> Result<PixelEncoding, Error> {
    let unsupported = Error::UnsupportedFormat {
        bitness,
        order,
        pipeline,
    };

    match (bitness, pipeline) {
        (ColorBitness::Rgb565, _) => Ok(PixelEncoding {
            format: PixelFormat::Rgb565,
            order: exact_order(order).ok_or(unsupported)?,
        }),
        (ColorBitness::Rgb888, _) => Ok(PixelEncoding {
            format: PixelFormat::Rgb888,
            order: exact_order(order).ok_or(unsupported)?,
        }),
        // Padded pixels are native little-endian words; non-RGB orders are BGR.
        (ColorBitness::Xrgb8888, PixelPipeline::Padded) => Ok(PixelEncoding {
            format: PixelFormat::Rgb888Padded,
            order: if order == ColorOrder::Rgb {
                DriverColorOrder::Rgb
            } else {
                DriverColorOrder::Bgr
            },
        }),
        (ColorBitness::Xrgb8888, PixelPipeline::Packed) | (ColorBitness::Rgb332, _) => {
            Err(unsupported)
        }
    }
}

fn exact_order(order: ColorOrder) -> Option<DriverColorOrder> {
    match order {
        ColorOrder::Rgb => Some(DriverColorOrder::Rgb),
        ColorOrder::Bgr => Some(DriverColorOrder::Bgr),
        ColorOrder::Grb => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_is_two_bytes_and_keeps_order() {
        let encoding = translate(ColorBitness::Rgb565, ColorOrder::Rgb, PixelPipeline::Packed)
            .unwrap();
        assert_eq!(encoding.format, PixelFormat::Rgb565);
        assert_eq!(encoding.order, DriverColorOrder::Rgb);
        assert_eq!(encoding.bytes_per_pixel(), 2);

        let encoding = translate(ColorBitness::Rgb565, ColorOrder::Bgr, PixelPipeline::Padded)
            .unwrap();
        assert_eq!(encoding.order, DriverColorOrder::Bgr);
        assert_eq!(encoding.bytes_per_pixel(), 2);
    }

    #[test]
    fn test_rgb888_is_three_bytes_in_both_pipelines() {
        for pipeline in [PixelPipeline::Packed, PixelPipeline::Padded] {
            let encoding = translate(ColorBitness::Rgb888, ColorOrder::Bgr, pipeline).unwrap();
            assert_eq!(encoding.format, PixelFormat::Rgb888);
            assert_eq!(encoding.order, DriverColorOrder::Bgr);
            assert_eq!(encoding.bytes_per_pixel(), 3);
        }
    }

    #[test]
    fn test_padded_format_requires_padded_pipeline() {
        let result = translate(ColorBitness::Xrgb8888, ColorOrder::Rgb, PixelPipeline::Packed);
        assert!(matches!(
            result,
            Err(Error::UnsupportedFormat {
                bitness: ColorBitness::Xrgb8888,
                pipeline: PixelPipeline::Packed,
                ..
            })
        ));

        let encoding =
            translate(ColorBitness::Xrgb8888, ColorOrder::Rgb, PixelPipeline::Padded).unwrap();
        assert_eq!(encoding.format, PixelFormat::Rgb888Padded);
        assert_eq!(encoding.order, DriverColorOrder::Rgb);
        assert_eq!(encoding.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_padded_format_maps_non_rgb_orders_to_bgr() {
        for order in [ColorOrder::Bgr, ColorOrder::Grb] {
            let encoding = translate(ColorBitness::Xrgb8888, order, PixelPipeline::Padded).unwrap();
            assert_eq!(encoding.order, DriverColorOrder::Bgr);
        }
    }

    #[test]
    fn test_packed_formats_never_select_padded_encoding() {
        for bitness in [ColorBitness::Rgb565, ColorBitness::Rgb888] {
            for pipeline in [PixelPipeline::Packed, PixelPipeline::Padded] {
                let encoding = translate(bitness, ColorOrder::Rgb, pipeline).unwrap();
                assert_ne!(encoding.format, PixelFormat::Rgb888Padded);
            }
        }
    }

    #[test]
    fn test_rgb332_is_unsupported() {
        let result = translate(ColorBitness::Rgb332, ColorOrder::Rgb, PixelPipeline::Padded);
        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_grb_order_is_unsupported_for_packed_formats() {
        let result = translate(ColorBitness::Rgb888, ColorOrder::Grb, PixelPipeline::Packed);
        assert!(matches!(
            result,
            Err(Error::UnsupportedFormat {
                order: ColorOrder::Grb,
                ..
            })
        ));
    }

    #[test]
    fn test_bitness_bits() {
        assert_eq!(ColorBitness::Rgb332.bits(), 8);
        assert_eq!(ColorBitness::Rgb565.bits(), 16);
        assert_eq!(ColorBitness::Rgb888.bits(), 24);
        assert_eq!(ColorBitness::Xrgb8888.bits(), 32);
    }
}
