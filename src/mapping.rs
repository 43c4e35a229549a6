//! Coordinate mapping utilities
//!
//! This module maps logical pixel coordinates to the chip that owns them and
//! to a RAM cell and bit inside that chip.
//!
//! The panel is split into a grid of equally sized chip regions, numbered
//! row by row. Inside a chip, each column is a run of cells; each cell packs
//! `leds_per_cell` consecutive rows, top row in the most significant bit.
//! Every color channel has its own band of cells: channel *c* of a pixel
//! lives at `base + c * cells_per_channel`.
//!
//! ## Example
//!
//! ```
//! use ht1632::{Geometry, mapping::locate};
//!
//! let geometry = Geometry::BICOLOR_3216;
//!
//! // The top-left pixel is the top bit of the first cell of chip 0
//! let location = locate(0, 0, &geometry).unwrap();
//! assert_eq!((location.chip, location.address, location.mask), (0, 0, 0b1000));
//!
//! // The bottom-right pixel belongs to chip 3
//! let location = locate(31, 15, &geometry).unwrap();
//! assert_eq!(location.chip, 3);
//! ```

use crate::config::Geometry;

/// Where a pixel lives in chip RAM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellLocation {
    /// Chip index, row by row across the grid
    pub chip: usize,
    /// Address of the first color band's cell
    pub address: usize,
    /// Bit of the pixel inside the cell
    pub mask: u8,
}

/// Map a pixel to its chip, cell, and bit
///
/// Returns `None` for coordinates that do not belong to any chip.
///
/// The row guard accepts `y == height`. Such a row maps to a chip index past
/// the end of the grid, so the chip check rejects it instead.
///
/// # Arguments
///
/// * `x` - X coordinate (column), 0 to width-1
/// * `y` - Y coordinate (row), 0 to height-1
/// * `geometry` - Panel geometry
pub fn locate(x: i32, y: i32, geometry: &Geometry) -> Option<CellLocation> {
    if x < 0 || x >= i32::from(geometry.width()) || y < 0 || y > i32::from(geometry.height()) {
        return None;
    }
    let (x, y) = (x as usize, y as usize);

    let chip_width = geometry.chip_width();
    let chip_height = geometry.chip_height();
    let leds_per_cell = geometry.leds_per_cell() as usize;

    let chip = x / chip_width + geometry.chips_x() as usize * (y / chip_height);
    if chip >= geometry.chips() {
        return None;
    }

    let local_x = x % chip_width;
    let local_y = y % chip_height;

    let mask = 1 << ((leds_per_cell - 1) - y % leds_per_cell);
    let address = local_x * geometry.height() as usize
        / (geometry.chips_y() as usize * leds_per_cell)
        + local_y / leds_per_cell;

    Some(CellLocation {
        chip,
        address,
        mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_origin() {
        let location = locate(0, 0, &Geometry::BICOLOR_3216).unwrap();
        assert_eq!(
            location,
            CellLocation {
                chip: 0,
                address: 0,
                mask: 0b1000
            }
        );
    }

    #[test]
    fn test_rows_pack_msb_first() {
        let geometry = Geometry::BICOLOR_3216;
        let masks: Vec<u8> = (0..4)
            .map(|y| locate(0, y, &geometry).unwrap().mask)
            .collect();
        assert_eq!(masks, vec![0b1000, 0b0100, 0b0010, 0b0001]);

        // Row 4 starts the next cell
        let location = locate(0, 4, &geometry).unwrap();
        assert_eq!((location.address, location.mask), (1, 0b1000));
    }

    #[test]
    fn test_columns_step_by_cells_per_column() {
        let geometry = Geometry::BICOLOR_3216;
        // 8 rows per chip, 4 LEDs per cell: 2 cells per column
        assert_eq!(locate(1, 0, &geometry).unwrap().address, 2);
        assert_eq!(locate(15, 7, &geometry).unwrap().address, 31);
    }

    #[test]
    fn test_chip_grid() {
        let geometry = Geometry::BICOLOR_3216;
        assert_eq!(locate(15, 7, &geometry).unwrap().chip, 0);
        assert_eq!(locate(16, 0, &geometry).unwrap().chip, 1);
        assert_eq!(locate(0, 8, &geometry).unwrap().chip, 2);
        assert_eq!(locate(16, 8, &geometry).unwrap().chip, 3);

        // Local coordinates restart in every chip
        assert_eq!(
            locate(16, 8, &geometry).unwrap().address,
            locate(0, 0, &geometry).unwrap().address
        );
    }

    #[test]
    fn test_out_of_range() {
        let geometry = Geometry::BICOLOR_3216;
        assert_eq!(locate(-1, 0, &geometry), None);
        assert_eq!(locate(0, -1, &geometry), None);
        assert_eq!(locate(32, 0, &geometry), None);
        assert_eq!(locate(0, 17, &geometry), None);
        assert_eq!(locate(i32::MAX, i32::MIN, &geometry), None);
    }

    #[test]
    fn test_row_equal_to_height_maps_nowhere() {
        let geometry = Geometry::BICOLOR_3216;
        for x in 0..32 {
            assert_eq!(locate(x, 16, &geometry), None);
        }
    }

    #[test]
    fn test_partition_covers_every_chip_once_per_cell_bit() {
        let geometry = Geometry::BICOLOR_3216;
        let mut seen = vec![0u8; geometry.chips() * geometry.cells_per_channel()];
        for y in 0..16 {
            for x in 0..32 {
                let location = locate(x, y, &geometry).unwrap();
                assert!(location.address < geometry.cells_per_channel());
                let slot = &mut seen[location.chip * geometry.cells_per_channel() + location.address];
                assert_eq!(*slot & location.mask, 0, "pixel ({x}, {y}) overlaps");
                *slot |= location.mask;
            }
        }
        assert!(seen.iter().all(|cell| *cell == geometry.cell_mask()));
    }

    #[test]
    fn test_other_geometry() {
        // 48x8 on three chips in a row, 2 LEDs per cell
        let geometry = Geometry::new(48, 8, 3, 1, 2).unwrap();
        let location = locate(47, 7, &geometry).unwrap();
        assert_eq!(location.chip, 2);
        assert_eq!(location.mask, 0b01);
        assert_eq!(location.address, 15 * 4 + 3);
        assert!(location.address < geometry.cells_per_channel());
    }
}
