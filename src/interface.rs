//! Hardware interface abstraction
//!
//! This module provides the [`ChipInterface`] trait and the bit-banged
//! [`Interface`] struct for talking to a chain of HT1632 chips.
//!
//! ## Hardware Requirements
//!
//! The chips share four output lines:
//! - **DATA**: serial data
//! - **CLK**: clock of the chip-select shift chain
//! - **WR**: write strobe, data is latched on the rising edge
//! - **CS**: input of the chip-select shift chain (active low)
//!
//! Instead of one select line per chip, a single active-low token is shifted
//! along the chain; the chip at the token's position listens to DATA/WR.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use ht1632::{ChipInterface, ChipSelect, Interface, command};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // DATA, CLK, WR, CS and the number of chips in the chain
//! let mut interface = Interface::new(MockPin, MockPin, MockPin, MockPin, 4);
//!
//! // Send a command to the second chip
//! let _ = interface.send_command(1, command::LED_ON);
//!
//! // Write a nibble to RAM address 0x05 of the first chip
//! let _ = interface.write_ram(0, 0x05, 0b1010, 4);
//!
//! // Release every chip
//! let _ = interface.select(ChipSelect::None);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

use crate::command::{ADDRESS_BITS, COMMAND_BITS, COMMAND_TAIL_BITS, ID_BITS, ID_COMMAND, ID_WRITE};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Target of a chip-select sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipSelect {
    /// No chip listens
    None,
    /// Every chip listens (broadcast)
    All,
    /// Only the chip at this 0-based position in the chain listens
    Chip(usize),
}

/// Trait for the bus shared by a chain of HT1632 chips
///
/// This trait abstracts over the way bits reach the chips, allowing the
/// [`Matrix`](crate::matrix::Matrix) to work with the provided bit-banged
/// [`Interface`] or with any other transport.
///
/// ## Implementing
///
/// Only [`select`](Self::select), [`write_bits`](Self::write_bits) and
/// [`chip_count`](Self::chip_count) are required. The frame-level methods
/// have default implementations built on them that produce the exact bit
/// sequence the chips expect.
pub trait ChipInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Number of chips in the select chain
    fn chip_count(&self) -> usize;

    /// Position the select token so that `target` listens
    ///
    /// # Errors
    ///
    /// Returns an error if a pin fails or the chip index is outside the chain.
    fn select(&mut self, target: ChipSelect) -> InterfaceResult<(), Self::Error>;

    /// Clock out the low `count` bits of `value`, most significant first
    ///
    /// # Errors
    ///
    /// Returns an error if a pin fails.
    fn write_bits(&mut self, value: u16, count: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a command frame to one chip and deselect it afterwards
    ///
    /// # Errors
    ///
    /// Returns an error if selecting or writing fails.
    fn send_command(&mut self, chip: usize, command: u8) -> InterfaceResult<(), Self::Error> {
        self.select(ChipSelect::Chip(chip))?;
        self.write_command_frame(command)?;
        self.select(ChipSelect::None)
    }

    /// Send a command frame to every chip at once
    ///
    /// # Errors
    ///
    /// Returns an error if selecting or writing fails.
    fn broadcast_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.select(ChipSelect::All)?;
        self.write_command_frame(command)?;
        self.select(ChipSelect::None)
    }

    /// Write one RAM cell of one chip
    ///
    /// Sends the write ID, the 7-bit address and `data_bits` bits of `data`.
    /// The chip stays selected; the next call to [`select`](Self::select)
    /// ends the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if selecting or writing fails.
    fn write_ram(
        &mut self,
        chip: usize,
        address: u8,
        data: u8,
        data_bits: u8,
    ) -> InterfaceResult<(), Self::Error> {
        self.select(ChipSelect::Chip(chip))?;
        self.write_bits(ID_WRITE as u16, ID_BITS)?;
        self.write_bits(address as u16, ADDRESS_BITS)?;
        self.write_bits(data as u16, data_bits)
    }

    /// Write the bits of a command frame to whatever is selected
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_command_frame(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.write_bits(ID_COMMAND as u16, ID_BITS)?;
        self.write_bits(command as u16, COMMAND_BITS)?;
        self.write_bits(0, COMMAND_TAIL_BITS)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over the GPIO error type.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
    /// Selected chip is not part of the chain
    ChipOutOfRange {
        /// Requested chip index
        chip: usize,
        /// Chips in the chain
        chips: usize,
    },
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::ChipOutOfRange { chip, chips } => {
                write!(f, "Chip {chip} out of range for a chain of {chips}")
            }
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged interface for a chain of HT1632 chips
///
/// Implements [`ChipInterface`] on four embedded-hal v1.0 output pins. The
/// pins must already be configured as push-pull outputs.
///
/// ## Type Parameters
///
/// * `DATA` - Serial data pin implementing [`OutputPin`]
/// * `CLK` - Select chain clock pin implementing [`OutputPin`]
/// * `WR` - Write strobe pin implementing [`OutputPin`]
/// * `CS` - Select chain input pin implementing [`OutputPin`]
pub struct Interface<DATA, CLK, WR, CS> {
    /// Serial data line
    data: DATA,
    /// Select chain clock
    clk: CLK,
    /// Write strobe (rising edge latches DATA)
    wr: WR,
    /// Select chain input (active low)
    cs: CS,
    /// Number of chips in the chain
    chips: usize,
}

impl<DATA, CLK, WR, CS, PinErr> Interface<DATA, CLK, WR, CS>
where
    DATA: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `data` - Serial data pin
    /// * `clk` - Select chain clock pin
    /// * `wr` - Write strobe pin
    /// * `cs` - Select chain input pin
    /// * `chips` - Number of chips in the chain
    ///
    /// No pin is touched until the first transaction.
    pub fn new(data: DATA, clk: CLK, wr: WR, cs: CS, chips: usize) -> Self {
        Self {
            data,
            clk,
            wr,
            cs,
            chips,
        }
    }

    /// Give back the pins
    pub fn release(self) -> (DATA, CLK, WR, CS) {
        (self.data, self.clk, self.wr, self.cs)
    }

    /// One rising and falling edge on the select chain clock
    fn pulse_clock(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.clk.set_high().map_err(InterfaceError::Pin)?;
        self.clk.set_low().map_err(InterfaceError::Pin)
    }

    /// Shift the current CS level through the whole chain
    fn flush_chain(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        for _ in 0..self.chips {
            self.pulse_clock()?;
        }
        Ok(())
    }
}

impl<DATA, CLK, WR, CS, PinErr> ChipInterface for Interface<DATA, CLK, WR, CS>
where
    DATA: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn chip_count(&self) -> usize {
        self.chips
    }

    fn select(&mut self, target: ChipSelect) -> InterfaceResult<(), Self::Error> {
        match target {
            ChipSelect::All => {
                self.cs.set_low().map_err(InterfaceError::Pin)?;
                self.flush_chain()
            }
            ChipSelect::None => {
                self.cs.set_high().map_err(InterfaceError::Pin)?;
                self.flush_chain()
            }
            ChipSelect::Chip(chip) => {
                if chip >= self.chips {
                    return Err(InterfaceError::ChipOutOfRange {
                        chip,
                        chips: self.chips,
                    });
                }
                self.cs.set_high().map_err(InterfaceError::Pin)?;
                self.flush_chain()?;

                // Insert the token, then walk it to the chip's stage
                self.cs.set_low().map_err(InterfaceError::Pin)?;
                self.pulse_clock()?;
                self.cs.set_high().map_err(InterfaceError::Pin)?;
                for _ in 0..chip {
                    self.pulse_clock()?;
                }
                Ok(())
            }
        }
    }

    fn write_bits(&mut self, value: u16, count: u8) -> InterfaceResult<(), Self::Error> {
        for bit in (0..count).rev() {
            self.wr.set_low().map_err(InterfaceError::Pin)?;
            if value & (1 << bit) != 0 {
                self.data.set_high().map_err(InterfaceError::Pin)?;
            } else {
                self.data.set_low().map_err(InterfaceError::Pin)?;
            }
            self.wr.set_high().map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }
}
