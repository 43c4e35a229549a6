//! Colors for bi-color LED matrices
//!
//! This module defines the [`Color`] enum for the four states a bi-color
//! LED pixel can take. Each pixel is made of two LEDs (green and red); each
//! LED lives in its own band of the chip's RAM.
//!
//! ## Color Representation
//!
//! The numeric value of a color doubles as a channel mask: bit *i* is set
//! when channel *i* is lit.
//!
//! | Color  | Value | Green (channel 0) | Red (channel 1) |
//! |--------|-------|-------------------|-----------------|
//! | Black  | 0b00  | off               | off             |
//! | Green  | 0b01  | on                | off             |
//! | Red    | 0b10  | off               | on              |
//! | Orange | 0b11  | on                | on              |
//!
//! ## Example
//!
//! ```
//! use ht1632::Color;
//!
//! assert!(Color::Orange.channel_active(0));
//! assert!(Color::Orange.channel_active(1));
//! assert!(!Color::Red.channel_active(0));
//! assert_eq!(Color::from_channels(0b10), Color::Red);
//! ```

/// Colors supported by bi-color HT1632 panels
///
/// The variant order is significant: it defines which RAM band is lit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum Color {
    /// Both LEDs off
    #[default]
    Black = 0b00,
    /// First LED on
    Green = 0b01,
    /// Second LED on
    Red = 0b10,
    /// Both LEDs on
    Orange = 0b11,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU2;
}

impl Color {
    /// Number of LED channels per pixel
    pub const CHANNELS: usize = 2;

    /// Whether the LED of `channel` is lit for this color
    ///
    /// Channels past [`Color::CHANNELS`] are never active.
    pub fn channel_active(self, channel: usize) -> bool {
        channel < Self::CHANNELS && (self as u8) & (1 << channel) != 0
    }

    /// Build a color from a channel mask
    ///
    /// Bits above the channel count are ignored.
    ///
    /// ## Example
    ///
    /// ```
    /// use ht1632::Color;
    ///
    /// assert_eq!(Color::from_channels(0b00), Color::Black);
    /// assert_eq!(Color::from_channels(0b01), Color::Green);
    /// assert_eq!(Color::from_channels(0b111), Color::Orange);
    /// ```
    pub fn from_channels(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Black,
            0b01 => Self::Green,
            0b10 => Self::Red,
            _ => Self::Orange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_mask_matches_discriminant() {
        for color in [Color::Black, Color::Green, Color::Red, Color::Orange] {
            let bits = (0..Color::CHANNELS)
                .filter(|&channel| color.channel_active(channel))
                .fold(0u8, |acc, channel| acc | (1 << channel));
            assert_eq!(bits, color as u8);
            assert_eq!(Color::from_channels(bits), color);
        }
    }

    #[test]
    fn test_channel_out_of_range_is_inactive() {
        assert!(!Color::Orange.channel_active(2));
        assert!(!Color::Orange.channel_active(7));
    }
}
