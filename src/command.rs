//! HT1632 command definitions
//!
//! This module defines the mode IDs and command bytes understood by the
//! HT1632 family of LED driver chips. Every frame on the bus starts with a
//! 3-bit mode ID that tells the chip how to interpret the bits that follow.
//!
//! ## Frame Structure
//!
//! Command mode (`ID_COMMAND`):
//! 1. Select the chip
//! 2. Send the 3-bit ID `100`
//! 3. Send the 8-bit command, MSB first
//! 4. Send the trailing don't-care bits
//! 5. Deselect
//!
//! Write mode (`ID_WRITE`):
//! 1. Select the chip
//! 2. Send the 3-bit ID `101`
//! 3. Send the 7-bit RAM address, MSB first
//! 4. Send the cell nibble
//!
//! ## Example
//!
//! ```rust,no_run
//! use ht1632::{command, ChipInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = Interface::new(MockPin, MockPin, MockPin, MockPin, 4);
//!
//! // Turn the oscillator and LED duty cycle generator on for the first chip
//! let _ = interface.send_command(0, command::SYS_EN);
//! let _ = interface.send_command(0, command::LED_ON);
//! ```

// Mode IDs

/// Command mode ID (`100`)
pub const ID_COMMAND: u8 = 0b100;

/// Read RAM mode ID (`110`)
///
/// Listed for completeness; reading needs the DATA line as an input, which
/// this driver does not use.
pub const ID_READ: u8 = 0b110;

/// Write RAM mode ID (`101`)
pub const ID_WRITE: u8 = 0b101;

/// Width of a mode ID in bits
pub const ID_BITS: u8 = 3;

/// Width of a command byte in bits
pub const COMMAND_BITS: u8 = 8;

/// Zero bits sent after every command byte
///
/// The chip needs one don't-care bit; the stream carries two, which the chip
/// ignores once it is deselected.
pub const COMMAND_TAIL_BITS: u8 = 2;

/// Width of a RAM address in bits
pub const ADDRESS_BITS: u8 = 7;

// System commands

/// System disable (0x00)
///
/// Stops the system oscillator and the LED duty cycle generator.
pub const SYS_DIS: u8 = 0x00;

/// System enable (0x01)
///
/// Starts the system oscillator.
pub const SYS_EN: u8 = 0x01;

/// LED duty cycle generator off (0x02)
pub const LED_OFF: u8 = 0x02;

/// LED duty cycle generator on (0x03)
pub const LED_ON: u8 = 0x03;

/// Blinking off (0x08)
pub const BLINK_OFF: u8 = 0x08;

/// Blinking on (0x09)
pub const BLINK_ON: u8 = 0x09;

// Clock source commands

/// Slave mode (0x10)
///
/// Clock source comes from the OSC pin of a master chip.
pub const SLAVE_MODE: u8 = 0x10;

/// Master mode, on-chip RC oscillator (0x18)
pub const MASTER_MODE: u8 = 0x18;

/// Master mode, external clock (0x1C)
pub const EXTERNAL_CLOCK: u8 = 0x1C;

// Commons option commands
//
// `0010-ABxx`: A and B pick the COM count and the driver type.

/// Commons option AB = 00 (0x20)
pub const COMS_00: u8 = 0x20;

/// Commons option AB = 01 (0x24)
pub const COMS_01: u8 = 0x24;

/// Commons option AB = 10 (0x28)
pub const COMS_10: u8 = 0x28;

/// Commons option AB = 11 (0x2C)
pub const COMS_11: u8 = 0x2C;

// Brightness

/// PWM duty cycle (0xA0)
///
/// OR the 4-bit duty level into the low nibble: `PWM | level`.
pub const PWM: u8 = 0xA0;

/// Highest PWM duty level (16/16 duty)
pub const MAX_BRIGHTNESS: u8 = 0x0F;
