//! Panel geometry, chip configuration, and builder

use crate::color::Color;
use crate::command::{COMS_00, COMS_01, COMS_10, COMS_11, EXTERNAL_CLOCK, MASTER_MODE, SLAVE_MODE};
pub use crate::error::{BuilderError, MAX_CELLS_PER_CHIP, MAX_LEDS_PER_CELL};

/// Panel geometry
///
/// Describes the pixel size of the panel and how it is split into a grid of
/// equally sized chip regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Panel width in pixels
    width: u16,
    /// Panel height in pixels
    height: u16,
    /// Chips per row of the grid
    chips_x: u8,
    /// Chips per column of the grid
    chips_y: u8,
    /// LEDs driven by one RAM cell
    leds_per_cell: u8,
}

impl Geometry {
    /// 32x16 bi-color panel driven by four chips in a 2x2 grid
    pub const BICOLOR_3216: Self = Self {
        width: 32,
        height: 16,
        chips_x: 2,
        chips_y: 2,
        leds_per_cell: 4,
    };

    /// Create a new geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if:
    /// - any value is zero
    /// - leds_per_cell > MAX_LEDS_PER_CELL
    /// - the chip grid does not divide width or height evenly
    /// - the chip height is not a multiple of leds_per_cell
    /// - a chip would need more than MAX_CELLS_PER_CHIP cells
    pub fn new(
        width: u16,
        height: u16,
        chips_x: u8,
        chips_y: u8,
        leds_per_cell: u8,
    ) -> Result<Self, BuilderError> {
        let invalid = BuilderError::InvalidGeometry {
            width,
            height,
            chips_x,
            chips_y,
            leds_per_cell,
        };
        if width == 0 || height == 0 || chips_x == 0 || chips_y == 0 || leds_per_cell == 0 {
            return Err(invalid);
        }
        if leds_per_cell > MAX_LEDS_PER_CELL {
            return Err(invalid);
        }
        if width % chips_x as u16 != 0 || height % chips_y as u16 != 0 {
            return Err(invalid);
        }
        let geometry = Self {
            width,
            height,
            chips_x,
            chips_y,
            leds_per_cell,
        };
        if geometry.chip_height() % leds_per_cell as usize != 0 {
            return Err(invalid);
        }
        if geometry.cells_per_chip() > MAX_CELLS_PER_CHIP {
            return Err(invalid);
        }
        Ok(geometry)
    }

    /// Panel width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Panel height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Chips per row of the grid
    pub fn chips_x(&self) -> u8 {
        self.chips_x
    }

    /// Chips per column of the grid
    pub fn chips_y(&self) -> u8 {
        self.chips_y
    }

    /// LEDs driven by one RAM cell
    pub fn leds_per_cell(&self) -> u8 {
        self.leds_per_cell
    }

    /// Total number of chips in the chain
    pub fn chips(&self) -> usize {
        self.chips_x as usize * self.chips_y as usize
    }

    /// Width of the region owned by one chip
    pub fn chip_width(&self) -> usize {
        self.width as usize / self.chips_x as usize
    }

    /// Height of the region owned by one chip
    pub fn chip_height(&self) -> usize {
        self.height as usize / self.chips_y as usize
    }

    /// Addressable RAM cells on one chip, across all color bands
    pub fn cells_per_chip(&self) -> usize {
        self.width as usize * self.height as usize * Color::CHANNELS
            / (self.leds_per_cell as usize * self.chips())
    }

    /// Cells in one color band of a chip
    pub fn cells_per_channel(&self) -> usize {
        self.cells_per_chip() / Color::CHANNELS
    }

    /// Number of cells the frame buffer must hold
    pub fn buffer_len(&self) -> usize {
        self.cells_per_chip() * self.chips()
    }

    /// Mask selecting the LED bits of a cell
    pub fn cell_mask(&self) -> u8 {
        (1u8 << self.leds_per_cell) - 1
    }

    /// RAM address of `channel` for a cell whose first-band address is `base`
    pub fn channel_address(&self, base: usize, channel: usize) -> usize {
        base + channel * self.cells_per_channel()
    }
}

/// Commons option sent during initialization
///
/// Selects the number of COM lines and the driver type (`0010-ABxx`).
/// Which option a panel needs depends on how it is wired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommonsOption {
    /// AB = 00
    #[default]
    Coms00,
    /// AB = 01
    Coms01,
    /// AB = 10
    Coms10,
    /// AB = 11
    Coms11,
}

impl CommonsOption {
    /// Command byte for this option
    pub fn command(self) -> u8 {
        match self {
            Self::Coms00 => COMS_00,
            Self::Coms01 => COMS_01,
            Self::Coms10 => COMS_10,
            Self::Coms11 => COMS_11,
        }
    }
}

/// Clock source for the chips
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockMode {
    /// On-chip RC oscillator
    #[default]
    Master,
    /// Clock taken from a master chip's OSC pin
    Slave,
    /// External clock on the OSC pin
    External,
}

impl ClockMode {
    /// Command byte for this mode
    pub fn command(self) -> u8 {
        match self {
            Self::Master => MASTER_MODE,
            Self::Slave => SLAVE_MODE,
            Self::External => EXTERNAL_CLOCK,
        }
    }
}

/// Matrix configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Panel geometry
    pub geometry: Geometry,
    /// Commons option sent to every chip
    pub commons: CommonsOption,
    /// Clock source sent to every chip
    pub clock_mode: ClockMode,
    /// PWM duty level sent after the init sequence, if any
    pub brightness: Option<u8>,
}

/// Builder for constructing matrix configuration
///
/// # Example
///
/// ```rust
/// use ht1632::{Builder, ClockMode, Geometry};
///
/// let config = match Builder::new()
///     .geometry(Geometry::BICOLOR_3216)
///     .clock_mode(ClockMode::Master)
///     .brightness(8)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.geometry.chips(), 4);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Panel geometry (required)
    geometry: Option<Geometry>,
    /// Commons option
    commons: CommonsOption,
    /// Clock source
    clock_mode: ClockMode,
    /// Initial PWM duty level
    brightness: Option<u8>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel geometry (required)
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the commons option
    pub fn commons(mut self, commons: CommonsOption) -> Self {
        self.commons = commons;
        self
    }

    /// Set the clock source
    pub fn clock_mode(mut self, clock_mode: ClockMode) -> Self {
        self.clock_mode = clock_mode;
        self
    }

    /// Set the PWM duty level sent at initialization
    ///
    /// Levels above [`MAX_BRIGHTNESS`](crate::command::MAX_BRIGHTNESS) are clamped.
    pub fn brightness(mut self, level: u8) -> Self {
        self.brightness = Some(level.min(crate::command::MAX_BRIGHTNESS));
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingGeometry` if geometry was not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            geometry: self.geometry.ok_or(BuilderError::MissingGeometry)?,
            commons: self.commons,
            clock_mode: self.clock_mode,
            brightness: self.brightness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bicolor_3216_derived_values() {
        let geometry = Geometry::BICOLOR_3216;
        assert_eq!(geometry.chips(), 4);
        assert_eq!(geometry.chip_width(), 16);
        assert_eq!(geometry.chip_height(), 8);
        assert_eq!(geometry.cells_per_chip(), 64);
        assert_eq!(geometry.cells_per_channel(), 32);
        assert_eq!(geometry.buffer_len(), 256);
        assert_eq!(geometry.cell_mask(), 0x0F);
        assert_eq!(geometry.channel_address(3, 1), 35);
    }

    #[test]
    fn test_new_matches_const() {
        assert_eq!(Geometry::new(32, 16, 2, 2, 4), Ok(Geometry::BICOLOR_3216));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(Geometry::new(0, 16, 2, 2, 4).is_err());
        assert!(Geometry::new(32, 0, 2, 2, 4).is_err());
        assert!(Geometry::new(32, 16, 0, 2, 4).is_err());
        assert!(Geometry::new(32, 16, 2, 0, 4).is_err());
        assert!(Geometry::new(32, 16, 2, 2, 0).is_err());
    }

    #[test]
    fn test_uneven_grid_rejected() {
        assert!(matches!(
            Geometry::new(30, 16, 4, 2, 4),
            Err(BuilderError::InvalidGeometry { width: 30, .. })
        ));
        assert!(Geometry::new(32, 15, 2, 2, 4).is_err());
    }

    #[test]
    fn test_partial_cell_rows_rejected() {
        // 6-row chip regions do not pack into 4-LED cells
        assert!(Geometry::new(32, 12, 2, 2, 4).is_err());
        assert!(Geometry::new(32, 12, 2, 2, 2).is_ok());
    }

    #[test]
    fn test_too_many_leds_per_cell_rejected() {
        assert!(Geometry::new(32, 16, 2, 2, 8).is_err());
    }

    #[test]
    fn test_address_space_limit() {
        // single chip: 32 * 16 * 2 / 4 = 256 cells, past the 7-bit address space
        assert!(Geometry::new(32, 16, 1, 1, 4).is_err());
        // 24x16 single chip: 192 cells
        assert!(Geometry::new(24, 16, 1, 1, 4).is_err());
        // 16x8 single chip: 64 cells
        assert!(Geometry::new(16, 8, 1, 1, 4).is_ok());
    }

    #[test]
    fn test_builder_requires_geometry() {
        assert_eq!(Builder::new().build(), Err(BuilderError::MissingGeometry));
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .geometry(Geometry::BICOLOR_3216)
            .build()
            .unwrap();
        assert_eq!(config.commons, CommonsOption::Coms00);
        assert_eq!(config.clock_mode, ClockMode::Master);
        assert_eq!(config.brightness, None);
    }

    #[test]
    fn test_builder_clamps_brightness() {
        let config = Builder::new()
            .geometry(Geometry::BICOLOR_3216)
            .brightness(200)
            .build()
            .unwrap();
        assert_eq!(config.brightness, Some(15));
    }

    #[test]
    fn test_option_commands() {
        assert_eq!(CommonsOption::Coms00.command(), 0x20);
        assert_eq!(CommonsOption::Coms11.command(), 0x2C);
        assert_eq!(ClockMode::Master.command(), 0x18);
        assert_eq!(ClockMode::Slave.command(), 0x10);
        assert_eq!(ClockMode::External.command(), 0x1C);
    }
}
