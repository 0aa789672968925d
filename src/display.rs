//! Canvas operations on a chained HUB75 panel grid

use crate::blit::{PixelSource, Transfer, blit, clip};
use crate::color::Color;
use crate::config::Config;
use crate::driver::{LivenessSignal, NoWatchdog, PanelDriver};
use crate::format::translate;
use crate::state::{PowerState, RuntimeState};

/// HUB75 display surface
///
/// Owns the [`PanelDriver`] and exposes the virtual canvas formed by the
/// configured panel grid. Every drawing operation is silently dropped until
/// [`setup`](Self::setup) succeeds, and while the brightness is zero.
/// Coordinates outside the canvas are clipped.
///
/// For `embedded-graphics` support, see the `graphics` module (requires the
/// `graphics` feature).
pub struct Hub75Display<D, W = NoWatchdog>
where
    D: PanelDriver,
    W: LivenessSignal,
{
    /// Panel driver, present once initialized
    driver: Option<D>,
    /// `setup` has run, whether or not the driver initialized
    setup_attempted: bool,
    /// Panel configuration
    config: Config,
    /// Brightness and power state
    state: RuntimeState,
    /// Host watchdog
    watchdog: W,
}

impl<D> Hub75Display<D, NoWatchdog>
where
    D: PanelDriver,
{
    /// Create a display for a host without a watchdog
    pub fn new(config: Config) -> Self {
        Self::with_watchdog(config, NoWatchdog)
    }
}

impl<D, W> Hub75Display<D, W>
where
    D: PanelDriver,
    W: LivenessSignal,
{
    /// Create a display that feeds `watchdog` on every pixel write
    pub fn with_watchdog(config: Config, watchdog: W) -> Self {
        Self {
            driver: None,
            setup_attempted: false,
            state: RuntimeState::new(config.brightness),
            config,
            watchdog,
        }
    }

    /// Build and initialize the panel driver
    ///
    /// `build` receives the configuration and returns an uninitialized
    /// driver. If initialization fails the driver is dropped and the display
    /// stays inert for its whole lifetime. Only the first call does anything;
    /// later calls are ignored whether it succeeded or failed.
    pub fn setup<F>(&mut self, build: F)
    where
        F: FnOnce(&Config) -> D,
    {
        if self.setup_attempted {
            log::warn!("HUB75 display already set up");
            return;
        }
        self.setup_attempted = true;
        log::info!("Setting up HUB75 display...");

        let mut driver = build(&self.config);
        match driver.initialize() {
            Ok(()) => self.driver = Some(driver),
            Err(err) => log::error!("Failed to initialize HUB75 driver: {err:?}"),
        }
    }

    /// Log the configuration
    pub fn dump_config(&self) {
        let config = &self.config;
        let pins = &config.pins;

        log::info!("HUB75 display");
        log::info!(
            "  Panel: {}x{} pixels",
            config.panel.width,
            config.panel.height
        );
        log::info!(
            "  Layout: {}x{} panels ({:?})",
            config.layout.cols,
            config.layout.rows,
            config.layout.chain
        );
        log::info!(
            "  Virtual Display: {}x{} pixels",
            self.width(),
            self.height()
        );
        log::info!("  Scan Wiring: {:?}", config.scan_wiring);
        log::info!("  Shift Driver: {:?}", config.shift_driver);
        log::info!(
            "  Pins: R1:{}, G1:{}, B1:{}, R2:{}, G2:{}, B2:{}",
            pins.r1,
            pins.g1,
            pins.b1,
            pins.r2,
            pins.g2,
            pins.b2
        );
        log::info!(
            "  Pins: A:{}, B:{}, C:{}, D:{}, E:{:?}",
            pins.a,
            pins.b,
            pins.c,
            pins.d,
            pins.e
        );
        log::info!(
            "  Pins: LAT:{}, OE:{}, CLK:{}",
            pins.lat,
            pins.oe,
            pins.clk
        );
        log::info!(
            "  Clock Speed: {} MHz",
            config.output_clock_speed.hz() / 1_000_000
        );
        log::info!("  Latch Blanking: {}", config.latch_blanking);
        log::info!("  Clock Phase Inverted: {}", config.clk_phase_inverted);
        log::info!("  Min Refresh Rate: {} Hz", config.min_refresh_rate);
        log::info!("  Bit Depth: {}", config.bit_depth);
        log::info!("  Double Buffer: {}", config.double_buffer);
        log::info!("  Pixel Pipeline: {:?}", config.pipeline);
        if self.driver.is_none() {
            log::info!("  Driver: not initialized");
        }
    }

    /// Width of the virtual canvas in pixels
    pub fn width(&self) -> u16 {
        self.config.virtual_width()
    }

    /// Height of the virtual canvas in pixels
    pub fn height(&self) -> u16 {
        self.config.virtual_height()
    }

    /// Change the brightness
    ///
    /// A level of zero disables drawing; any other level enables it. The
    /// level is forwarded to the driver either way.
    pub fn set_brightness(&mut self, level: u8) {
        self.state.set_brightness(level);
        if let Some(driver) = self.driver.as_mut() {
            driver.set_brightness(level);
        }
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.state.brightness()
    }

    /// Current power state
    pub fn power_state(&self) -> PowerState {
        self.state.power()
    }

    /// Whether drawing reaches the panel
    ///
    /// True when the brightness is nonzero and the driver initialized
    /// successfully. See [`power_state`](Self::power_state) for the
    /// brightness half alone.
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled() && self.driver.is_some()
    }

    /// Whether the driver initialized successfully
    pub fn is_ready(&self) -> bool {
        self.driver.is_some()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the panel driver, if initialized
    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    /// Access the panel driver mutably, if initialized
    ///
    /// Bypasses clipping and power gating.
    pub fn driver_mut(&mut self) -> Option<&mut D> {
        self.driver.as_mut()
    }

    /// Driver to draw with, unless disabled or uninitialized
    fn drawable(&mut self) -> Option<&mut D> {
        if !self.state.is_enabled() {
            return None;
        }
        self.driver.as_mut()
    }

    /// Set one pixel
    ///
    /// Coordinates outside the canvas are ignored.
    pub fn draw_pixel_at(&mut self, x: i32, y: i32, color: Color) {
        let (width, height) = (self.width(), self.height());
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if x >= width || y >= height {
            return;
        }
        let Some(driver) = self.drawable() else {
            return;
        };

        driver.set_pixel(x, y, color.r, color.g, color.b);
        self.watchdog.feed();
    }

    /// Fill the whole canvas
    ///
    /// Black uses the driver's hardware clear. Any other color is written
    /// pixel by pixel.
    pub fn fill(&mut self, color: Color) {
        let Some(driver) = self.drawable() else {
            return;
        };

        if !color.is_on() {
            driver.clear();
            return;
        }

        for y in 0..i32::from(self.height()) {
            for x in 0..i32::from(self.width()) {
                self.draw_pixel_at(x, y, color);
            }
        }
    }

    /// Draw a `w` x `h` block of raw pixels with its top-left corner at
    /// (`x_start`, `y_start`)
    ///
    /// The parts of the block outside the canvas are clipped. Buffers in a
    /// format the driver cannot take, or too short for the block, are
    /// logged and dropped without drawing anything.
    pub fn draw_pixels_at(
        &mut self,
        x_start: i32,
        y_start: i32,
        w: u32,
        h: u32,
        source: &PixelSource<'_>,
    ) {
        let (width, height) = (self.width(), self.height());
        let pipeline = self.config.pipeline;
        let Some(driver) = self.drawable() else {
            return;
        };

        let encoding = match translate(source.bitness, source.order, pipeline) {
            Ok(encoding) => encoding,
            Err(err) => {
                log::error!("{err}");
                return;
            }
        };

        let Some((dest, layout)) = clip(x_start, y_start, w, h, source.layout, width, height)
        else {
            return;
        };
        let clipped = source.with_layout(layout);

        match blit(driver, dest, &clipped, encoding) {
            Ok(Transfer::Empty) => {}
            Ok(_) => self.watchdog.feed(),
            Err(err) => log::error!("{err}"),
        }
    }

    /// Render one frame
    ///
    /// Clears the canvas when auto-clear is configured, lets `writer` draw,
    /// and flips the buffers when double buffering is configured.
    pub fn update<F>(&mut self, writer: F)
    where
        F: FnOnce(&mut Self),
    {
        if self.drawable().is_none() {
            return;
        }

        if self.config.auto_clear_enabled {
            self.fill(Color::BLACK);
        }
        writer(self);

        if self.config.double_buffer {
            if let Some(driver) = self.driver.as_mut() {
                driver.flip_buffer();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::blit::{Region, SourceLayout};
    use crate::config::{Builder, Dimensions, PanelLayout};
    use crate::driver::mock::{Call, CountingWatchdog, MockDriver};
    use crate::format::{ColorBitness, ColorOrder, PixelPipeline};

    fn builder() -> Builder {
        Builder::new()
            .dimensions(Dimensions::new(64, 32).unwrap())
            .board("esp32-trinity")
    }

    fn ready(config: Config) -> Hub75Display<MockDriver> {
        let mut display = Hub75Display::new(config);
        display.setup(|_| MockDriver::default());
        display
    }

    fn calls(display: &Hub75Display<MockDriver>) -> &[Call] {
        &display.driver().unwrap().calls
    }

    fn clear_log(display: &mut Hub75Display<MockDriver>) {
        display.driver_mut().unwrap().calls.clear();
    }

    fn set_pixels(display: &Hub75Display<MockDriver>) -> usize {
        display
            .driver()
            .unwrap()
            .count(|call| matches!(call, Call::SetPixel { .. }))
    }

    #[test]
    fn test_setup_initializes_driver_once() {
        let mut display = ready(builder().build().unwrap());
        assert!(display.is_ready());
        assert_eq!(calls(&display), &[Call::Initialize]);

        display.setup(|_| MockDriver::failing());
        assert!(display.is_ready());
        assert_eq!(calls(&display), &[Call::Initialize]);
    }

    #[test]
    fn test_setup_passes_config_to_builder() {
        let mut display: Hub75Display<MockDriver> = Hub75Display::new(builder().build().unwrap());
        let mut seen = None;
        display.setup(|config| {
            seen = Some(config.virtual_width());
            MockDriver::default()
        });
        assert_eq!(seen, Some(64));
    }

    #[test]
    fn test_failed_setup_leaves_display_inert() {
        let mut display: Hub75Display<MockDriver> = Hub75Display::new(builder().build().unwrap());
        display.setup(|_| MockDriver::failing());
        assert!(!display.is_ready());
        assert!(display.driver().is_none());

        display.draw_pixel_at(0, 0, Color::WHITE);
        display.fill(Color::RED);
        let mut ran = false;
        display.update(|_| ran = true);
        assert!(!ran);
        display.set_brightness(10);
        assert_eq!(display.power_state(), PowerState::Enabled);
        assert!(!display.is_enabled());
    }

    #[test]
    fn test_setup_is_not_retried_after_failure() {
        let mut display: Hub75Display<MockDriver> = Hub75Display::new(builder().build().unwrap());
        display.setup(|_| MockDriver::failing());

        let mut built_again = false;
        display.setup(|_| {
            built_again = true;
            MockDriver::default()
        });
        assert!(!built_again);
        assert!(!display.is_ready());
        assert!(!display.is_enabled());

        display.draw_pixel_at(0, 0, Color::WHITE);
        display.fill(Color::BLACK);
        assert!(display.driver().is_none());
    }

    #[test]
    fn test_virtual_canvas_bounds() {
        let config = builder()
            .layout(2, 2, PanelLayout::TopLeftDown)
            .build()
            .unwrap();
        let mut display = ready(config);
        assert_eq!((display.width(), display.height()), (128, 64));
        clear_log(&mut display);

        display.draw_pixel_at(127, 63, Color::new(1, 2, 3));
        display.draw_pixel_at(128, 0, Color::WHITE);
        display.draw_pixel_at(0, 64, Color::WHITE);
        display.draw_pixel_at(-1, 5, Color::WHITE);
        display.draw_pixel_at(5, -1, Color::WHITE);

        assert_eq!(
            calls(&display),
            &[Call::SetPixel {
                x: 127,
                y: 63,
                r: 1,
                g: 2,
                b: 3
            }]
        );
    }

    #[test]
    fn test_fill_black_uses_hardware_clear() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        display.fill(Color::BLACK);
        assert_eq!(calls(&display), &[Call::Clear]);
    }

    #[test]
    fn test_fill_color_writes_every_pixel() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        display.fill(Color::new(0, 0, 1));
        let driver = display.driver().unwrap();
        assert_eq!(set_pixels(&display), 64 * 32);
        assert_eq!(driver.count(|call| *call == Call::Clear), 0);
    }

    #[test]
    fn test_brightness_gates_drawing() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        for level in [0u8, 1, 0, 255, 128, 0] {
            display.set_brightness(level);
            assert_eq!(display.is_enabled(), level > 0);
            assert_eq!(display.brightness(), level);
            assert_eq!(calls(&display).last(), Some(&Call::SetBrightness(level)));
        }
        assert_eq!(
            display
                .driver()
                .unwrap()
                .count(|call| matches!(call, Call::SetBrightness(_))),
            6
        );

        clear_log(&mut display);
        display.draw_pixel_at(0, 0, Color::WHITE);
        display.fill(Color::WHITE);
        display.fill(Color::BLACK);
        let data = [0u8; 3];
        display.draw_pixels_at(
            0,
            0,
            1,
            1,
            &PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb),
        );
        let mut ran = false;
        display.update(|_| ran = true);
        assert!(!ran);
        assert!(calls(&display).is_empty());

        display.set_brightness(1);
        display.draw_pixel_at(0, 0, Color::WHITE);
        assert_eq!(set_pixels(&display), 1);
    }

    #[test]
    fn test_zero_initial_brightness_starts_disabled() {
        let mut display = ready(builder().brightness(0).build().unwrap());
        assert_eq!(display.power_state(), PowerState::Disabled);
        display.draw_pixel_at(0, 0, Color::WHITE);
        assert_eq!(calls(&display), &[Call::Initialize]);
    }

    #[test]
    fn test_brightness_before_setup_is_kept() {
        let mut display: Hub75Display<MockDriver> = Hub75Display::new(builder().build().unwrap());
        display.set_brightness(0);
        display.setup(|_| MockDriver::default());
        assert!(!display.is_enabled());
        display.fill(Color::BLACK);
        assert_eq!(calls(&display), &[Call::Initialize]);
    }

    #[test]
    fn test_packed_block_goes_out_in_one_call() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let data: Vec<u8> = (0..30).collect();
        display.draw_pixels_at(
            0,
            0,
            10,
            1,
            &PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb),
        );

        let draws = display.driver().unwrap().draws();
        assert_eq!(draws, vec![(Region::new(0, 0, 10, 1), data)]);
    }

    #[test]
    fn test_strided_block_goes_out_row_by_row() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let layout = SourceLayout {
            x_offset: 1,
            y_offset: 0,
            x_pad: 1,
        };
        let data: Vec<u8> = (0..4 * 3 * 2).collect();
        let source =
            PixelSource::packed(&data, ColorBitness::Rgb565, ColorOrder::Rgb).with_layout(layout);
        display.draw_pixels_at(8, 4, 2, 3, &source);

        let draws = display.driver().unwrap().draws();
        assert_eq!(draws.len(), 3);
        for (yy, (region, bytes)) in draws.iter().enumerate() {
            assert_eq!(*region, Region::new(8, 4 + yy as u16, 2, 1));
            let start = (yy * 4 + 1) * 2;
            assert_eq!(bytes[..], data[start..start + 4]);
        }
    }

    #[test]
    fn test_block_overrunning_canvas_is_clipped() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        // 4x2 block whose rightmost 2 columns fall off a 64 px wide canvas
        let data: Vec<u8> = (0..4 * 2 * 3).collect();
        display.draw_pixels_at(
            62,
            0,
            4,
            2,
            &PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb),
        );

        let draws = display.driver().unwrap().draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0], (Region::new(62, 0, 2, 1), data[0..6].to_vec()));
        assert_eq!(draws[1], (Region::new(62, 1, 2, 1), data[12..18].to_vec()));
    }

    #[test]
    fn test_block_fully_outside_draws_nothing() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let data = [0u8; 12];
        let source = PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb);
        display.draw_pixels_at(64, 0, 2, 2, &source);
        display.draw_pixels_at(-2, 0, 2, 2, &source);
        assert!(calls(&display).is_empty());
    }

    #[test]
    fn test_unsupported_format_draws_nothing() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let data = [0u8; 16];
        display.draw_pixels_at(
            0,
            0,
            2,
            2,
            &PixelSource::packed(&data, ColorBitness::Rgb332, ColorOrder::Rgb),
        );
        display.draw_pixels_at(
            0,
            0,
            2,
            2,
            &PixelSource::packed(&data, ColorBitness::Xrgb8888, ColorOrder::Rgb),
        );
        assert!(calls(&display).is_empty());
    }

    #[test]
    fn test_padded_pipeline_accepts_32_bit() {
        let config = builder().pipeline(PixelPipeline::Padded).build().unwrap();
        let mut display = ready(config);
        clear_log(&mut display);

        let data = [0u8; 16];
        display.draw_pixels_at(
            0,
            0,
            2,
            2,
            &PixelSource::packed(&data, ColorBitness::Xrgb8888, ColorOrder::Bgr),
        );
        let draws = display.driver().unwrap().draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].1.len(), 16);
    }

    #[test]
    fn test_short_buffer_draws_nothing() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let data = [0u8; 29];
        display.draw_pixels_at(
            0,
            0,
            10,
            1,
            &PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb),
        );
        assert!(calls(&display).is_empty());
    }

    #[test]
    fn test_oversized_layout_draws_nothing() {
        let mut display = ready(builder().build().unwrap());
        clear_log(&mut display);

        let data = [0u8; 64];
        let source = PixelSource::packed(&data, ColorBitness::Rgb888, ColorOrder::Rgb).with_layout(
            SourceLayout {
                x_offset: 0,
                y_offset: 0,
                x_pad: usize::MAX / 2,
            },
        );
        display.draw_pixels_at(0, 0, 2, 2, &source);
        // clipping on the right saturates the padding
        display.draw_pixels_at(63, 0, 2, 2, &source);
        assert!(calls(&display).is_empty());
    }

    #[test]
    fn test_update_clears_then_writes_then_flips() {
        let config = builder().double_buffer(true).build().unwrap();
        let mut display = ready(config);
        clear_log(&mut display);

        display.update(|display| display.draw_pixel_at(1, 1, Color::RED));
        assert_eq!(
            calls(&display),
            &[
                Call::Clear,
                Call::SetPixel {
                    x: 1,
                    y: 1,
                    r: 255,
                    g: 0,
                    b: 0
                },
                Call::FlipBuffer,
            ]
        );
    }

    #[test]
    fn test_update_without_clear_or_flip() {
        let config = builder().auto_clear_enabled(false).build().unwrap();
        let mut display = ready(config);
        clear_log(&mut display);

        let mut ran = false;
        display.update(|_| ran = true);
        assert!(ran);
        assert!(calls(&display).is_empty());
    }

    #[test]
    fn test_watchdog_fed_per_pixel() {
        let config = builder().build().unwrap();
        let mut watchdog = CountingWatchdog::default();
        {
            let mut display = Hub75Display::with_watchdog(config, &mut watchdog);
            display.setup(|_| MockDriver::default());
            display.fill(Color::WHITE);
            display.draw_pixel_at(-1, -1, Color::WHITE);
        }
        assert_eq!(watchdog.feeds, 64 * 32);
    }
}
