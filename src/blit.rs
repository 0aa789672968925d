//! Buffer-to-driver transfer
//!
//! [`blit`] moves a rectangle of encoded pixels from a caller buffer to the
//! panel driver. The buffer may be a window into a larger image: its
//! [`SourceLayout`] gives the columns skipped before the window
//! (`x_offset`), the rows skipped above it (`y_offset`) and the columns
//! following it on every row (`x_pad`).
//!
//! ```text
//!            x_offset      w        x_pad
//!           |<------>|<-------->|<------>|
//!  y_offset {  ....................................
//!           {  ....................................
//!              ........##########........  <- row 0
//!              ........##########........  <- row 1
//! ```
//!
//! When all three are zero the buffer is packed and goes out in a single
//! [`PanelDriver::draw_pixels`] call. Otherwise every row is sent on its own.

use crate::driver::{PanelDriver, PixelBlock};
use crate::error::Error;
use crate::format::{ColorBitness, ColorOrder, PixelEncoding};

/// Rectangle on the virtual canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Position of the drawn window inside the source buffer, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceLayout {
    /// Pixels before the window on every row
    pub x_offset: usize,
    /// Rows before the window
    pub y_offset: usize,
    /// Pixels after the window on every row
    pub x_pad: usize,
}

impl SourceLayout {
    /// Layout of a packed buffer
    pub const PACKED: Self = Self {
        x_offset: 0,
        y_offset: 0,
        x_pad: 0,
    };

    /// Whether rows of the window are contiguous and start at byte 0
    ///
    /// Any nonzero field makes the buffer strided, even if the effective
    /// stride equals the window width.
    pub const fn is_packed(&self) -> bool {
        self.x_offset == 0 && self.x_pad == 0 && self.y_offset == 0
    }

    /// Full source row width in pixels for a window `width` pixels wide
    ///
    /// Returns `None` if the width overflows `usize`.
    pub const fn stride(&self, width: usize) -> Option<usize> {
        match self.x_offset.checked_add(width) {
            Some(partial) => partial.checked_add(self.x_pad),
            None => None,
        }
    }

    /// Byte offset of window row `row`
    ///
    /// Returns `None` if the offset overflows `usize`.
    ///
    /// ## Example
    ///
    /// ```
    /// use hub75_canvas::blit::SourceLayout;
    ///
    /// let layout = SourceLayout { x_offset: 2, y_offset: 1, x_pad: 3 };
    /// // stride = 2 + 4 + 3 = 9 pixels, 3 bytes each
    /// assert_eq!(layout.row_offset(4, 0, 3), Some((9 + 2) * 3));
    /// assert_eq!(layout.row_offset(4, 1, 3), Some((2 * 9 + 2) * 3));
    /// ```
    pub fn row_offset(&self, width: usize, row: usize, bytes_per_pixel: usize) -> Option<usize> {
        self.y_offset
            .checked_add(row)?
            .checked_mul(self.stride(width)?)?
            .checked_add(self.x_offset)?
            .checked_mul(bytes_per_pixel)
    }

    /// Bytes the buffer must hold for a `width` x `height` window
    ///
    /// Returns `None` if the length overflows `usize`.
    pub fn required_len(&self, width: usize, height: usize, bytes_per_pixel: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return Some(0);
        }
        let row_len = width.checked_mul(bytes_per_pixel)?;
        if self.is_packed() {
            return row_len.checked_mul(height);
        }
        self.row_offset(width, height - 1, bytes_per_pixel)?
            .checked_add(row_len)
    }
}

/// A caller-supplied pixel buffer and its description
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSource<'a> {
    /// Raw pixel bytes
    pub data: &'a [u8],
    /// Bit depth of every pixel
    pub bitness: ColorBitness,
    /// Channel order of every pixel
    pub order: ColorOrder,
    /// Multi-byte pixels are stored most significant byte first
    pub big_endian: bool,
    /// Window position inside `data`
    pub layout: SourceLayout,
}

impl<'a> PixelSource<'a> {
    /// Describe a packed little-endian buffer
    pub const fn packed(data: &'a [u8], bitness: ColorBitness, order: ColorOrder) -> Self {
        Self {
            data,
            bitness,
            order,
            big_endian: false,
            layout: SourceLayout::PACKED,
        }
    }

    /// Set the window position inside the buffer
    #[must_use]
    pub const fn with_layout(mut self, layout: SourceLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the byte order of multi-byte pixels
    #[must_use]
    pub const fn with_big_endian(mut self, big_endian: bool) -> Self {
        self.big_endian = big_endian;
        self
    }
}

/// Transfer strategy chosen by [`blit`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Nothing to draw
    Empty,
    /// One bulk call covering every row
    Packed,
    /// One call per row
    RowByRow {
        /// Number of calls issued
        rows: u16,
    },
}

/// Send a window of `source` to `dest` on the driver
///
/// `dest` is not checked against the canvas; the caller clips first.
///
/// # Errors
///
/// Returns [`Error::BufferTooSmall`] when `source.data` cannot hold the
/// window described by `dest` and `source.layout`, and
/// [`Error::LayoutOverflow`] when the layout addresses bytes beyond
/// `usize::MAX`. Both are checked before the first driver call, so a failed
/// blit never draws anything.
pub fn blit<D: PanelDriver>(
    driver: &mut D,
    dest: Region,
    source: &PixelSource<'_>,
    encoding: PixelEncoding,
) -> Result<Transfer, Error> {
    if dest.is_empty() {
        return Ok(Transfer::Empty);
    }

    let bpp = encoding.bytes_per_pixel();
    let width = usize::from(dest.w);
    let height = usize::from(dest.h);
    let layout = source.layout;

    let required = layout
        .required_len(width, height, bpp)
        .ok_or(Error::LayoutOverflow)?;
    if source.data.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            provided: source.data.len(),
        });
    }

    if layout.is_packed() {
        driver.draw_pixels(PixelBlock {
            region: dest,
            data: &source.data[..required],
            encoding,
            big_endian: source.big_endian,
        });
        log::trace!("packed blit {}x{} at ({}, {})", dest.w, dest.h, dest.x, dest.y);
        return Ok(Transfer::Packed);
    }

    let row_len = width * bpp;
    for yy in 0..dest.h {
        // Offsets grow with the row, and the last one fit in `required`.
        let Some(start) = layout.row_offset(width, usize::from(yy), bpp) else {
            break;
        };
        driver.draw_pixels(PixelBlock {
            region: Region::new(dest.x, dest.y.wrapping_add(yy), dest.w, 1),
            data: &source.data[start..start + row_len],
            encoding,
            big_endian: source.big_endian,
        });
    }
    log::trace!("strided blit {}x{} at ({}, {})", dest.w, dest.h, dest.x, dest.y);
    Ok(Transfer::RowByRow { rows: dest.h })
}

/// Fit a window onto a `canvas_w` x `canvas_h` canvas
///
/// Columns and rows falling off the canvas are folded into the source
/// layout, so the returned window reads exactly the pixels that stay
/// visible. Returns `None` when nothing is visible. The folded layout
/// saturates at `usize::MAX`; [`blit`] then rejects it.
///
/// ## Example
///
/// ```
/// use hub75_canvas::blit::{clip, Region, SourceLayout};
///
/// // 10x4 window whose left 3 columns hang off the canvas
/// let (dest, layout) = match clip(-3, 0, 10, 4, SourceLayout::PACKED, 64, 32) {
///     Some(clipped) => clipped,
///     None => return,
/// };
/// assert_eq!(dest, Region::new(0, 0, 7, 4));
/// assert_eq!(layout, SourceLayout { x_offset: 3, y_offset: 0, x_pad: 0 });
/// ```
pub fn clip(
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    layout: SourceLayout,
    canvas_w: u16,
    canvas_h: u16,
) -> Option<(Region, SourceLayout)> {
    let (x0, x1) = clip_span(i64::from(x), i64::from(w), i64::from(canvas_w))?;
    let (y0, y1) = clip_span(i64::from(y), i64::from(h), i64::from(canvas_h))?;

    let left = (x0 - i64::from(x)) as usize;
    let right = (i64::from(x) + i64::from(w) - x1) as usize;
    let top = (y0 - i64::from(y)) as usize;

    let region = Region::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16);
    let layout = SourceLayout {
        x_offset: layout.x_offset.saturating_add(left),
        y_offset: layout.y_offset.saturating_add(top),
        x_pad: layout.x_pad.saturating_add(right),
    };
    Some((region, layout))
}

fn clip_span(start: i64, len: i64, limit: i64) -> Option<(i64, i64)> {
    let lo = start.max(0);
    let hi = (start + len).min(limit);
    (lo < hi).then_some((lo, hi))
}
