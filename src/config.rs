//! Panel configuration types and builder

use crate::boards::Board;
pub use crate::error::{BuilderError, LayoutViolation};
use crate::format::PixelPipeline;

/// Update interval value meaning "never refresh from the host loop"
pub const UPDATE_INTERVAL_NEVER: u32 = u32::MAX;

/// Refresh rate used when nothing else determines it
pub const DEFAULT_MIN_REFRESH_RATE: u16 = 60;

/// Accepted minimum refresh rates in Hz
pub const MIN_REFRESH_RATE_RANGE: core::ops::RangeInclusive<u16> = 40..=200;

/// Accepted driver bit depths per color channel
pub const BIT_DEPTH_RANGE: core::ops::RangeInclusive<u8> = 6..=12;

/// Dimensions of a single panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }
}

/// How chained panels are arranged in the grid
///
/// Serpentine layouts mount alternate rows upside down; zigzag layouts keep
/// every row upright and run the cable back to the start of each row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelLayout {
    /// All panels in one row
    #[default]
    Horizontal,
    /// Start top-left, serpentine downwards
    TopLeftDown,
    /// Start top-right, serpentine downwards
    TopRightDown,
    /// Start bottom-left, serpentine upwards
    BottomLeftUp,
    /// Start bottom-right, serpentine upwards
    BottomRightUp,
    /// Start top-left, zigzag downwards
    TopLeftDownZigzag,
    /// Start top-right, zigzag downwards
    TopRightDownZigzag,
    /// Start bottom-left, zigzag upwards
    BottomLeftUpZigzag,
    /// Start bottom-right, zigzag upwards
    BottomRightUpZigzag,
}

impl PanelLayout {
    /// Whether rows are chained without flipping alternate panels
    pub const fn is_zigzag(self) -> bool {
        matches!(
            self,
            Self::TopLeftDownZigzag
                | Self::TopRightDownZigzag
                | Self::BottomLeftUpZigzag
                | Self::BottomRightUpZigzag
        )
    }
}

/// Grid of panels forming the virtual canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Panel rows
    pub rows: u8,
    /// Panel columns
    pub cols: u8,
    /// Chaining pattern
    pub chain: PanelLayout,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            chain: PanelLayout::Horizontal,
        }
    }
}

impl Layout {
    /// Check that the grid size agrees with the chaining pattern
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutViolation`] found.
    pub fn validate(&self) -> Result<(), LayoutViolation> {
        let single = self.rows == 1 && self.cols == 1;
        let horizontal = self.chain == PanelLayout::Horizontal;

        if self.rows == 0 || self.cols == 0 {
            return Err(LayoutViolation::Empty);
        }
        if single && !horizontal {
            return Err(LayoutViolation::SinglePanelNotHorizontal);
        }
        if horizontal && self.rows != 1 {
            return Err(LayoutViolation::HorizontalMultiRow);
        }
        if !horizontal && !self.chain.is_zigzag() && self.rows == 1 {
            return Err(LayoutViolation::SerpentineSingleRow);
        }
        if self.chain.is_zigzag() && (self.rows == 1 || self.cols == 1) {
            return Err(LayoutViolation::ZigzagNotGrid);
        }
        Ok(())
    }
}

/// Row scan wiring of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPattern {
    /// Standard 1/2 scan of two row halves
    #[default]
    StandardTwoScan,
    /// Four-scan wiring on 16 px high panels
    FourScan16PxHigh,
    /// Four-scan wiring on 32 px high panels
    FourScan32PxHigh,
    /// Four-scan wiring on 64 px high panels
    FourScan64PxHigh,
}

/// Shift register chip on the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShiftDriver {
    /// Plain shift registers, no init sequence
    #[default]
    Generic,
    /// FM6126A
    Fm6126a,
    /// ICN2038S
    Icn2038s,
    /// FM6124
    Fm6124,
    /// MBI5124 (needs inverted clock phase)
    Mbi5124,
    /// DP3246
    Dp3246,
}

/// Output clock frequency for the shift registers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockSpeed {
    /// 8 MHz
    Mhz8,
    /// 10 MHz
    Mhz10,
    /// 16 MHz
    Mhz16,
    /// 20 MHz
    #[default]
    Mhz20,
}

impl ClockSpeed {
    /// Frequency in Hz
    pub const fn hz(self) -> u32 {
        match self {
            Self::Mhz8 => 8_000_000,
            Self::Mhz10 => 10_000_000,
            Self::Mhz16 => 16_000_000,
            Self::Mhz20 => 20_000_000,
        }
    }
}

/// Logical HUB75 connector signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRole {
    /// Upper half red data
    R1,
    /// Upper half green data
    G1,
    /// Upper half blue data
    B1,
    /// Lower half red data
    R2,
    /// Lower half green data
    G2,
    /// Lower half blue data
    B2,
    /// Row address bit A
    A,
    /// Row address bit B
    B,
    /// Row address bit C
    C,
    /// Row address bit D
    D,
    /// Row address bit E (64 px high panels only)
    E,
    /// Latch
    Lat,
    /// Output enable
    Oe,
    /// Shift clock
    Clk,
}

impl PinRole {
    /// Every connector signal in assignment order
    pub const ALL: [Self; 14] = [
        Self::R1,
        Self::G1,
        Self::B1,
        Self::R2,
        Self::G2,
        Self::B2,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::Lat,
        Self::Oe,
        Self::Clk,
    ];

    /// Whether a configuration is valid without this signal
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::E)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// GPIO numbers for every connector signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Pins {
    pub r1: u8,
    pub g1: u8,
    pub b1: u8,
    pub r2: u8,
    pub g2: u8,
    pub b2: u8,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    /// Only wired on panels with 32 row pairs
    pub e: Option<u8>,
    pub lat: u8,
    pub oe: u8,
    pub clk: u8,
}

impl Pins {
    /// Pin assigned to a signal
    pub const fn get(&self, role: PinRole) -> Option<u8> {
        match role {
            PinRole::R1 => Some(self.r1),
            PinRole::G1 => Some(self.g1),
            PinRole::B1 => Some(self.b1),
            PinRole::R2 => Some(self.r2),
            PinRole::G2 => Some(self.g2),
            PinRole::B2 => Some(self.b2),
            PinRole::A => Some(self.a),
            PinRole::B => Some(self.b),
            PinRole::C => Some(self.c),
            PinRole::D => Some(self.d),
            PinRole::E => self.e,
            PinRole::Lat => Some(self.lat),
            PinRole::Oe => Some(self.oe),
            PinRole::Clk => Some(self.clk),
        }
    }

    fn from_assignments(assigned: &[Option<u8>; 14]) -> Result<Self, BuilderError> {
        let pin = |role: PinRole| assigned[role.index()].ok_or(BuilderError::MissingPin(role));
        Ok(Self {
            r1: pin(PinRole::R1)?,
            g1: pin(PinRole::G1)?,
            b1: pin(PinRole::B1)?,
            r2: pin(PinRole::R2)?,
            g2: pin(PinRole::G2)?,
            b2: pin(PinRole::B2)?,
            a: pin(PinRole::A)?,
            b: pin(PinRole::B)?,
            c: pin(PinRole::C)?,
            d: pin(PinRole::D)?,
            e: assigned[PinRole::E.index()],
            lat: pin(PinRole::Lat)?,
            oe: pin(PinRole::Oe)?,
            clk: pin(PinRole::Clk)?,
        })
    }
}

/// Derive the minimum refresh rate from the host update interval
///
/// Without an interval, or with an interval of 0 or
/// [`UPDATE_INTERVAL_NEVER`], the panel refreshes at
/// [`DEFAULT_MIN_REFRESH_RATE`]. Otherwise the rate tracks the update
/// frequency, rounded half to even and clamped to
/// [`MIN_REFRESH_RATE_RANGE`].
///
/// ## Example
///
/// ```
/// use hub75_canvas::config::min_refresh_rate_for_interval;
///
/// assert_eq!(min_refresh_rate_for_interval(None), 60);
/// // 62.5 Hz rounds to the even neighbour
/// assert_eq!(min_refresh_rate_for_interval(Some(16)), 62);
/// assert_eq!(min_refresh_rate_for_interval(Some(1_000)), 40);
/// ```
pub fn min_refresh_rate_for_interval(interval_ms: Option<u32>) -> u16 {
    match interval_ms {
        None | Some(0 | UPDATE_INTERVAL_NEVER) => DEFAULT_MIN_REFRESH_RATE,
        Some(ms) => {
            let (quotient, remainder) = (1_000 / ms, 1_000 % ms);
            let round_up = match (2 * remainder).cmp(&ms) {
                core::cmp::Ordering::Greater => true,
                core::cmp::Ordering::Equal => quotient % 2 == 1,
                core::cmp::Ordering::Less => false,
            };
            let rounded = quotient + u32::from(round_up);
            let min = u32::from(*MIN_REFRESH_RATE_RANGE.start());
            let max = u32::from(*MIN_REFRESH_RATE_RANGE.end());
            rounded.clamp(min, max) as u16
        }
    }
}

/// Display configuration
///
/// Holds the physical layout and timing parameters handed to the panel
/// driver. Use `Builder` to create a Config; it never changes afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    /// Size of one panel
    pub panel: Dimensions,
    /// Panel grid
    pub layout: Layout,
    /// Row scan wiring
    pub scan_wiring: ScanPattern,
    /// Shift register chip
    pub shift_driver: ShiftDriver,
    /// Connector pin assignment
    pub pins: Pins,
    /// Shift clock frequency
    pub output_clock_speed: ClockSpeed,
    /// Blanking clocks around the latch pulse
    pub latch_blanking: u8,
    /// Shift data on the falling clock edge
    pub clk_phase_inverted: bool,
    /// Lowest acceptable refresh rate in Hz
    pub min_refresh_rate: u16,
    /// Bit-plane depth per color channel
    pub bit_depth: u8,
    /// Draw into a back buffer and flip after every frame
    pub double_buffer: bool,
    /// Initial brightness; 0 starts the display disabled
    pub brightness: u8,
    /// Clear the canvas before every frame
    pub auto_clear_enabled: bool,
    /// Pixel pipeline the host renders with
    pub pipeline: PixelPipeline,
}

impl Config {
    /// Width of the virtual canvas in pixels
    pub fn virtual_width(&self) -> u16 {
        self.panel.width * u16::from(self.layout.cols)
    }

    /// Height of the virtual canvas in pixels
    pub fn virtual_height(&self) -> u16 {
        self.panel.height * u16::from(self.layout.rows)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hub75_canvas::{Builder, Dimensions, PanelLayout};
///
/// let dims = match Dimensions::new(64, 32) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .layout(2, 2, PanelLayout::TopLeftDown)
///     .board("esp32-trinity")
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.virtual_width(), 128);
/// assert_eq!(config.virtual_height(), 64);
/// ```
#[must_use]
pub struct Builder {
    /// Panel dimensions (required)
    dimensions: Option<Dimensions>,
    /// Panel grid
    layout: Layout,
    /// Row scan wiring
    scan_wiring: ScanPattern,
    /// Shift register chip
    shift_driver: ShiftDriver,
    /// Board preset supplying default pins
    board: Option<&'static Board>,
    /// A board name was given that matched no preset
    unknown_board: bool,
    /// Explicit pin overrides, indexed by [`PinRole`]
    pins: [Option<u8>; 14],
    /// Shift clock frequency
    output_clock_speed: ClockSpeed,
    /// Blanking clocks around the latch pulse
    latch_blanking: u8,
    /// Shift data on the falling clock edge
    clk_phase_inverted: bool,
    /// Explicit minimum refresh rate
    min_refresh_rate: Option<u16>,
    /// Host update interval in milliseconds
    update_interval_ms: Option<u32>,
    /// Bit-plane depth per color channel
    bit_depth: u8,
    /// Flip buffers after every frame
    double_buffer: bool,
    /// Initial brightness
    brightness: u8,
    /// Clear the canvas before every frame
    auto_clear_enabled: bool,
    /// Pixel pipeline the host renders with
    pipeline: PixelPipeline,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            layout: Layout::default(),
            scan_wiring: ScanPattern::StandardTwoScan,
            shift_driver: ShiftDriver::Generic,
            board: None,
            unknown_board: false,
            pins: [None; 14],
            output_clock_speed: ClockSpeed::Mhz20,
            latch_blanking: 1,
            clk_phase_inverted: false,
            min_refresh_rate: None,
            update_interval_ms: None,
            bit_depth: 8,
            double_buffer: false,
            brightness: 128,
            auto_clear_enabled: true,
            pipeline: PixelPipeline::Packed,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size of one panel (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the panel grid and chaining pattern
    pub fn layout(mut self, rows: u8, cols: u8, chain: PanelLayout) -> Self {
        self.layout = Layout { rows, cols, chain };
        self
    }

    /// Set the row scan wiring
    pub fn scan_wiring(mut self, value: ScanPattern) -> Self {
        self.scan_wiring = value;
        self
    }

    /// Set the shift register chip
    pub fn shift_driver(mut self, value: ShiftDriver) -> Self {
        self.shift_driver = value;
        self
    }

    /// Use a board preset's pin assignment as the default
    ///
    /// The name is matched case-insensitively against [`crate::boards::BOARDS`].
    /// An unknown name makes [`build`](Self::build) fail with
    /// [`BuilderError::UnknownBoard`].
    pub fn board(mut self, name: &str) -> Self {
        self.board = Board::by_name(name);
        self.unknown_board = self.board.is_none();
        self
    }

    /// Assign a pin, overriding any board preset
    pub fn pin(mut self, role: PinRole, gpio: u8) -> Self {
        self.pins[role.index()] = Some(gpio);
        self
    }

    /// Assign every pin at once
    pub fn pins(mut self, pins: Pins) -> Self {
        for role in PinRole::ALL {
            self.pins[role.index()] = pins.get(role);
        }
        self
    }

    /// Set the shift clock frequency
    pub fn output_clock_speed(mut self, value: ClockSpeed) -> Self {
        self.output_clock_speed = value;
        self
    }

    /// Set the blanking clocks around the latch pulse
    pub fn latch_blanking(mut self, value: u8) -> Self {
        self.latch_blanking = value;
        self
    }

    /// Shift data on the falling clock edge
    ///
    /// Required by [`ShiftDriver::Mbi5124`].
    pub fn clk_phase_inverted(mut self, value: bool) -> Self {
        self.clk_phase_inverted = value;
        self
    }

    /// Set the minimum refresh rate explicitly
    ///
    /// Only valid when the host update interval is unset or
    /// [`UPDATE_INTERVAL_NEVER`].
    pub fn min_refresh_rate(mut self, hz: u16) -> Self {
        self.min_refresh_rate = Some(hz);
        self
    }

    /// Set the host update interval the refresh rate is derived from
    pub fn update_interval_ms(mut self, ms: u32) -> Self {
        self.update_interval_ms = Some(ms);
        self
    }

    /// Set the bit-plane depth per color channel
    pub fn bit_depth(mut self, value: u8) -> Self {
        self.bit_depth = value;
        self
    }

    /// Enable double buffering
    pub fn double_buffer(mut self, value: bool) -> Self {
        self.double_buffer = value;
        self
    }

    /// Set the initial brightness
    pub fn brightness(mut self, value: u8) -> Self {
        self.brightness = value;
        self
    }

    /// Clear the canvas before every frame
    pub fn auto_clear_enabled(mut self, value: bool) -> Self {
        self.auto_clear_enabled = value;
        self
    }

    /// Select the pixel pipeline the host renders with
    pub fn pipeline(mut self, value: PixelPipeline) -> Self {
        self.pipeline = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// and the matching [`BuilderError`] for an inconsistent layout, a
    /// missing pin, an unknown board, an out-of-range setting or a driver
    /// that needs the inverted clock phase.
    pub fn build(self) -> Result<Config, BuilderError> {
        let panel = self.dimensions.ok_or(BuilderError::MissingDimensions)?;

        self.layout
            .validate()
            .map_err(|violation| BuilderError::InvalidLayout {
                layout: self.layout.chain,
                rows: self.layout.rows,
                cols: self.layout.cols,
                violation,
            })?;

        let width = u32::from(panel.width) * u32::from(self.layout.cols);
        let height = u32::from(panel.height) * u32::from(self.layout.rows);
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(BuilderError::CanvasTooLarge { width, height });
        }

        if self.shift_driver == ShiftDriver::Mbi5124 && !self.clk_phase_inverted {
            return Err(BuilderError::ClockPhaseRequired(self.shift_driver));
        }

        if !BIT_DEPTH_RANGE.contains(&self.bit_depth) {
            return Err(BuilderError::OutOfRange {
                field: "bit_depth",
                value: u32::from(self.bit_depth),
                min: u32::from(*BIT_DEPTH_RANGE.start()),
                max: u32::from(*BIT_DEPTH_RANGE.end()),
            });
        }

        let min_refresh_rate = match self.min_refresh_rate {
            Some(hz) => {
                if matches!(self.update_interval_ms, Some(ms) if ms != UPDATE_INTERVAL_NEVER) {
                    return Err(BuilderError::RefreshRateConflict);
                }
                if !MIN_REFRESH_RATE_RANGE.contains(&hz) {
                    return Err(BuilderError::OutOfRange {
                        field: "min_refresh_rate",
                        value: u32::from(hz),
                        min: u32::from(*MIN_REFRESH_RATE_RANGE.start()),
                        max: u32::from(*MIN_REFRESH_RATE_RANGE.end()),
                    });
                }
                hz
            }
            None => min_refresh_rate_for_interval(self.update_interval_ms),
        };

        if self.unknown_board {
            return Err(BuilderError::UnknownBoard);
        }
        let mut assigned = self.pins;
        if let Some(board) = self.board {
            for role in PinRole::ALL {
                let slot = &mut assigned[role.index()];
                if slot.is_none() {
                    *slot = board.pins.get(role);
                }
            }
        }
        let pins = Pins::from_assignments(&assigned)?;

        Ok(Config {
            panel,
            layout: self.layout,
            scan_wiring: self.scan_wiring,
            shift_driver: self.shift_driver,
            pins,
            output_clock_speed: self.output_clock_speed,
            latch_blanking: self.latch_blanking,
            clk_phase_inverted: self.clk_phase_inverted,
            min_refresh_rate,
            bit_depth: self.bit_depth,
            double_buffer: self.double_buffer,
            brightness: self.brightness,
            auto_clear_enabled: self.auto_clear_enabled,
            pipeline: self.pipeline,
        })
    }
}
