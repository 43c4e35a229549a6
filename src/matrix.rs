//! Core matrix operations

use crate::buffer::{Cell, FrameBuffer};
use crate::color::Color;
use crate::command::{BLINK_OFF, BLINK_ON, LED_OFF, LED_ON, MAX_BRIGHTNESS, PWM, SYS_DIS, SYS_EN};
use crate::config::{Config, Geometry};
use crate::error::Error;
use crate::interface::ChipInterface;
use crate::mapping::locate;

type MatrixResult<I> = core::result::Result<(), Error<I>>;
type MatrixNewResult<I, T> = core::result::Result<T, Error<I>>;

/// Driver for a panel of daisy-chained HT1632 chips
///
/// Drawing only touches the frame buffer; [`commit`](Self::commit) sends the
/// cells that changed since the previous commit.
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`ChipInterface`]
/// * `B` - Cell storage implementing `AsRef<[Cell]>` and `AsMut<[Cell]>`
///
/// ## Example
///
/// ```rust,no_run
/// use ht1632::{Builder, Cell, Color, Geometry, Interface, Matrix};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let geometry = Geometry::BICOLOR_3216;
/// let interface = Interface::new(MockPin, MockPin, MockPin, MockPin, geometry.chips());
/// let config = match Builder::new().geometry(geometry).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
///
/// let mut matrix = match Matrix::new(interface, config, [Cell::default(); 256]) {
///     Ok(matrix) => matrix,
///     Err(_) => return,
/// };
/// matrix.plot(0, 0, Color::Orange);
/// matrix.plot(31, 15, Color::Green);
/// let _ = matrix.commit();
/// ```
pub struct Matrix<I, B>
where
    I: ChipInterface,
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    /// Hardware interface
    interface: I,
    /// Matrix configuration
    config: Config,
    /// Buffered chip RAM
    buffer: FrameBuffer<B>,
}

impl<I, B> Matrix<I, B>
where
    I: ChipInterface,
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    /// Create a new Matrix and bring the panel up blank
    ///
    /// Sends the configuration sequence to every chip, clears the frame
    /// buffer, and commits it so the chips and the buffer start in sync.
    ///
    /// # Arguments
    ///
    /// * `interface` - Bus to the chip chain
    /// * `config` - Matrix configuration
    /// * `storage` - Cell storage, at least `config.geometry.buffer_len()` cells
    ///
    /// # Errors
    ///
    /// Returns `Error::ChipCountMismatch` if the interface chain length differs
    /// from the geometry, `Error::BufferTooSmall` if the storage is too small,
    /// and `Error::Interface` if the bus fails during initialization.
    pub fn new(interface: I, config: Config, storage: B) -> MatrixNewResult<I, Self> {
        let geometry = config.geometry;
        if interface.chip_count() != geometry.chips() {
            return Err(Error::ChipCountMismatch {
                expected: geometry.chips(),
                provided: interface.chip_count(),
            });
        }
        let provided = storage.as_ref().len();
        let buffer = FrameBuffer::new(storage, &geometry).ok_or(Error::BufferTooSmall {
            required: geometry.buffer_len(),
            provided,
        })?;

        let mut matrix = Self {
            interface,
            config,
            buffer,
        };
        matrix.init()?;
        Ok(matrix)
    }

    /// Configure every chip, then blank the panel
    fn init(&mut self) -> MatrixResult<I> {
        let sequence = [
            SYS_DIS,
            self.config.commons.command(),
            self.config.clock_mode.command(),
            SYS_EN,
            LED_ON,
        ];
        log::debug!(
            "initializing {} chips ({:?}, {:?})",
            self.config.geometry.chips(),
            self.config.commons,
            self.config.clock_mode
        );

        for chip in 0..self.config.geometry.chips() {
            for command in sequence {
                self.send_command(chip, command)?;
            }
            if let Some(level) = self.config.brightness {
                self.send_command(chip, PWM | level.min(MAX_BRIGHTNESS))?;
            }
        }

        self.clear();
        self.commit()
    }

    /// Plot a pixel in the frame buffer
    ///
    /// Coordinates outside the panel are ignored. Call [`commit`](Self::commit)
    /// to show the change.
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        let geometry = self.config.geometry;
        let Some(location) = locate(x, y, &geometry) else {
            return;
        };
        for channel in 0..Color::CHANNELS {
            let address = geometry.channel_address(location.address, channel);
            self.buffer.set_bits(
                address,
                location.chip,
                location.mask,
                color.channel_active(channel),
            );
        }
    }

    /// Read a pixel back from the frame buffer
    ///
    /// Returns `None` for coordinates outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let geometry = self.config.geometry;
        let location = locate(x, y, &geometry)?;
        let mut channels = 0u8;
        for channel in 0..Color::CHANNELS {
            let address = geometry.channel_address(location.address, channel);
            let cell = self.buffer.cell(address, location.chip)?;
            if cell.data() & location.mask != 0 {
                channels |= 1 << channel;
            }
        }
        Some(Color::from_channels(channels))
    }

    /// Set the whole frame buffer to black
    ///
    /// Call [`commit`](Self::commit) to show the change.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Set every pixel of the frame buffer to `color`
    pub fn fill(&mut self, color: Color) {
        let width = i32::from(self.config.geometry.width());
        let height = i32::from(self.config.geometry.height());
        for y in 0..height {
            for x in 0..width {
                self.plot(x, y, color);
            }
        }
    }

    /// Send every modified cell to its chip
    ///
    /// Cells are visited chip by chip, then column cell by column cell, with
    /// the color bands of a cell next to each other. Each modified cell is a
    /// separate write; its flag is cleared once the write went out.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the bus fails. The failing cell and every
    /// cell after it stay modified.
    pub fn commit(&mut self) -> MatrixResult<I> {
        let geometry = self.config.geometry;
        let data_bits = geometry.leds_per_cell();
        let mut sent = 0usize;

        for chip in 0..geometry.chips() {
            for cell in 0..geometry.cells_per_channel() {
                for channel in 0..Color::CHANNELS {
                    let address = geometry.channel_address(cell, channel);
                    let Some(current) = self.buffer.cell(address, chip) else {
                        continue;
                    };
                    if !current.is_modified() {
                        continue;
                    }
                    log::trace!(
                        "chip {chip} address {address:#04x} <- {:#06b}",
                        current.data()
                    );
                    self.interface
                        .write_ram(chip, address as u8, current.data(), data_bits)
                        .map_err(Error::Interface)?;
                    self.buffer.mark_synced(address, chip);
                    sent += 1;
                }
            }
        }

        log::debug!("committed {sent} cells");
        Ok(())
    }

    /// Set the PWM duty level of every chip
    ///
    /// Levels run from 0 (1/16 duty) to 15 (16/16 duty); higher values are
    /// clamped.
    pub fn set_brightness(&mut self, level: u8) -> MatrixResult<I> {
        let level = level.min(MAX_BRIGHTNESS);
        log::debug!("brightness {level}");
        self.broadcast(PWM | level)
    }

    /// Turn blinking on or off on every chip
    pub fn set_blink(&mut self, enabled: bool) -> MatrixResult<I> {
        log::debug!("blink {enabled}");
        self.broadcast(if enabled { BLINK_ON } else { BLINK_OFF })
    }

    /// Turn the LED outputs of every chip on or off
    ///
    /// RAM contents are kept while the outputs are off.
    pub fn set_leds_enabled(&mut self, enabled: bool) -> MatrixResult<I> {
        log::debug!("leds {enabled}");
        self.broadcast(if enabled { LED_ON } else { LED_OFF })
    }

    /// Number of cells the next commit will send
    pub fn pending_cells(&self) -> usize {
        self.buffer.modified_count()
    }

    /// Get panel geometry
    pub fn geometry(&self) -> &Geometry {
        &self.config.geometry
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the frame buffer
    pub fn frame_buffer(&self) -> &FrameBuffer<B> {
        &self.buffer
    }

    /// Give back the interface and the cell storage
    pub fn release(self) -> (I, B) {
        (self.interface, self.buffer.release())
    }

    /// Send a command to one chip
    fn send_command(&mut self, chip: usize, command: u8) -> MatrixResult<I> {
        self.interface
            .send_command(chip, command)
            .map_err(Error::Interface)
    }

    /// Send a command to all chips at once
    fn broadcast(&mut self, command: u8) -> MatrixResult<I> {
        self.interface
            .broadcast_command(command)
            .map_err(Error::Interface)
    }
}

#[cfg(feature = "alloc")]
impl<I> Matrix<I, alloc::vec::Vec<Cell>>
where
    I: ChipInterface,
{
    /// Create a new Matrix with heap-allocated cell storage
    ///
    /// # Errors
    ///
    /// See [`Matrix::new`].
    pub fn new_allocated(interface: I, config: Config) -> MatrixNewResult<I, Self> {
        let storage = alloc::vec![Cell::default(); config.geometry.buffer_len()];
        Self::new(interface, config, storage)
    }
}
