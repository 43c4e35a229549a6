//! HT1632 LED Matrix Driver
//!
//! A driver for panels built from daisy-chained HT1632 LED matrix controllers,
//! such as the 32x16 bi-color boards that use four chips in a 2x2 grid.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Configurable panel geometry and chip grid
//! - Buffered drawing with change tracking: a commit only sends modified cells
//! - Chip selection through the shared shift chain (one CS line for the chain)
//! - Brightness, blink and LED on/off control
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use ht1632::{Builder, Cell, Color, Geometry, Interface, Matrix};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let (data, clk, wr, cs) = (MockPin, MockPin, MockPin, MockPin);
//! let geometry = Geometry::BICOLOR_3216;
//! let interface = Interface::new(data, clk, wr, cs, geometry.chips());
//! let config = match Builder::new().geometry(geometry).brightness(8).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! // Configures every chip and blanks the panel
//! let mut matrix = match Matrix::new(interface, config, [Cell::default(); 256]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//!
//! matrix.plot(0, 0, Color::Red);
//! matrix.plot(1, 0, Color::Orange);
//! let _ = matrix.commit();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Frame buffer with per-cell change tracking
pub mod buffer;
/// Colors for bi-color LED matrices
pub mod color;
/// HT1632 command definitions
pub mod command;
/// Panel geometry, chip configuration, and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate mapping utilities
pub mod mapping;
/// Core matrix operations
pub mod matrix;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use buffer::{Cell, FrameBuffer};
pub use color::Color;
pub use config::{
    Builder, ClockMode, CommonsOption, Config, Geometry, MAX_CELLS_PER_CHIP, MAX_LEDS_PER_CELL,
};
pub use error::{BuilderError, Error};
pub use interface::{ChipInterface, ChipSelect, Interface, InterfaceError};
pub use mapping::CellLocation;
pub use matrix::Matrix;
