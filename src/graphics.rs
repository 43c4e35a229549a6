//! Graphics support via embedded-graphics
//!
//! This module implements the [`DrawTarget`] and [`OriginDimensions`] traits
//! from the embedded-graphics ecosystem for [`Matrix`], so shapes, text and
//! images rendered by embedded-graphics land in the frame buffer pixel by
//! pixel. Nothing is sent until [`Matrix::commit`] is called.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle, Rectangle},
//! };
//! use ht1632::{Builder, Cell, Color, Geometry, Interface, Matrix};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockPin, MockPin, MockPin, MockPin, 4);
//! # let config = match Builder::new().geometry(Geometry::BICOLOR_3216).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut matrix = match Matrix::new(interface, config, [Cell::default(); 256]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//!
//! let _ = Rectangle::new(Point::new(0, 0), Size::new(32, 16))
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Red, 1))
//!     .draw(&mut matrix);
//! let _ = Line::new(Point::new(0, 0), Point::new(31, 15))
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Green, 1))
//!     .draw(&mut matrix);
//!
//! // Send the changes to the panel
//! let _ = matrix.commit();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::buffer::Cell;
use crate::color::Color;
use crate::interface::ChipInterface;
use crate::matrix::Matrix;

impl<I, B> DrawTarget for Matrix<I, B>
where
    I: ChipInterface,
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            // y == height would pass plot's row guard; keep it off the panel here
            if x < 0 || y < 0 || x as u32 >= sz.width || y as u32 >= sz.height {
                continue;
            }
            self.plot(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<I, B> OriginDimensions for Matrix<I, B>
where
    I: ChipInterface,
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    fn size(&self) -> Size {
        let geometry = self.geometry();
        Size::new(u32::from(geometry.width()), u32::from(geometry.height()))
    }
}
