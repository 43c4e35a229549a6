//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and matrix operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during matrix operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus errors
//!
//! Pixel coordinates outside the panel are not errors: [`plot`](crate::Matrix::plot)
//! ignores them silently.
//!
//! ## Example
//!
//! ```
//! use ht1632::{Builder, BuilderError, Geometry};
//!
//! // Missing geometry
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingGeometry)));
//!
//! // Chip grid does not divide the panel
//! let result = Geometry::new(30, 16, 4, 2, 4);
//! assert!(result.is_err());
//! ```

use crate::interface::ChipInterface;

/// Most LEDs a single RAM cell can drive
///
/// HT1632 RAM is nibble-addressed; bit 7 of a buffered cell is reserved for
/// the modified flag.
pub const MAX_LEDS_PER_CELL: u8 = 4;

/// Most RAM cells a single chip can address (7-bit address)
pub const MAX_CELLS_PER_CHIP: usize = 128;

/// Errors that can occur when driving the matrix
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: ChipInterface> {
    /// Interface error (GPIO or chip selection)
    ///
    /// Wraps the underlying error from the [`ChipInterface`] implementation.
    Interface(I::Error),
    /// Cell storage is too small for the panel
    ///
    /// The storage must hold at least `geometry.buffer_len()` cells.
    BufferTooSmall {
        /// Required number of cells
        required: usize,
        /// Provided number of cells
        provided: usize,
    },
    /// The interface drives a chain of a different length than the panel
    ChipCountMismatch {
        /// Chips described by the geometry
        expected: usize,
        /// Chips in the interface's select chain
        provided: usize,
    },
}

impl<I: ChipInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} cells, provided {provided}"
                )
            }
            Self::ChipCountMismatch { expected, provided } => {
                write!(
                    f,
                    "Chip count mismatch: panel has {expected} chips, interface drives {provided}"
                )
            }
        }
    }
}

impl<I: ChipInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
            Self::ChipCountMismatch { expected, provided } => f
                .debug_struct("ChipCountMismatch")
                .field("expected", expected)
                .field("provided", provided)
                .finish(),
        }
    }
}

impl<I: ChipInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Geometry was not specified
    ///
    /// [`Builder::geometry()`](crate::config::Builder::geometry) must be called before building.
    MissingGeometry,
    /// Invalid geometry provided
    ///
    /// See [`Geometry::new()`](crate::config::Geometry::new) for constraints.
    InvalidGeometry {
        /// Panel width in pixels
        width: u16,
        /// Panel height in pixels
        height: u16,
        /// Chips per row
        chips_x: u8,
        /// Chips per column
        chips_y: u8,
        /// LEDs per RAM cell
        leds_per_cell: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "Geometry must be specified"),
            Self::InvalidGeometry {
                width,
                height,
                chips_x,
                chips_y,
                leds_per_cell,
            } => write!(
                f,
                "Invalid geometry {width}x{height} on {chips_x}x{chips_y} chips with {leds_per_cell} LEDs per cell (max {MAX_LEDS_PER_CELL} LEDs per cell, {MAX_CELLS_PER_CHIP} cells per chip)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
