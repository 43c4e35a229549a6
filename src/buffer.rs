//! Frame buffer with per-cell change tracking
//!
//! The buffer mirrors the RAM of every chip in the chain, one [`Cell`] per
//! (address, chip) pair, laid out address-major (`[cells][chips]`). Each cell
//! remembers whether its LED bits changed since they were last sent, so a
//! commit only transmits what differs from the hardware.
//!
//! ## Example
//!
//! ```
//! use ht1632::{Cell, FrameBuffer, Geometry};
//!
//! let geometry = Geometry::BICOLOR_3216;
//! let storage = [Cell::default(); 256];
//! let mut buffer = match FrameBuffer::new(storage, &geometry) {
//!     Some(buffer) => buffer,
//!     None => return,
//! };
//!
//! buffer.update(5, 2, 0b1010);
//! assert_eq!(buffer.cell(5, 2).map(|cell| cell.data()), Some(0b1010));
//! assert!(buffer.cell(5, 2).is_some_and(|cell| cell.is_modified()));
//! ```

use crate::config::Geometry;

/// One buffered RAM cell: LED bits plus a modified flag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Cell(u8);

impl Cell {
    /// Flag bit set while the cell differs from what the chip holds
    pub const MODIFIED: u8 = 1 << 7;

    /// Placeholder for cells whose hardware state is unknown
    ///
    /// Its LED bits are non-zero, so the first clear marks every cell modified.
    pub const STALE: Self = Self(0x01);

    /// LED bits, without the modified flag
    pub fn data(self) -> u8 {
        self.0 & !Self::MODIFIED
    }

    /// Whether the cell must be sent on the next commit
    pub fn is_modified(self) -> bool {
        self.0 & Self::MODIFIED != 0
    }

    /// Cell holding `data` and the modified flag
    fn modified(data: u8) -> Self {
        Self(data | Self::MODIFIED)
    }

    /// Same LED bits, flag cleared
    fn synced(self) -> Self {
        Self(self.data())
    }
}

/// Buffered copy of every chip's RAM
///
/// Generic over the cell storage so it can live in a static array, on the
/// stack, or on the heap.
pub struct FrameBuffer<B>
where
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    /// Cell storage, address-major
    cells: B,
    /// Chips in the chain
    chips: usize,
    /// Cells per chip
    cells_per_chip: usize,
    /// LED bits of a cell
    cell_mask: u8,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[Cell]> + AsMut<[Cell]>,
{
    /// Wrap `storage` as the frame buffer for `geometry`
    ///
    /// Every cell is reset to [`Cell::STALE`]. Returns `None` if the storage
    /// holds fewer than `geometry.buffer_len()` cells; extra cells are unused.
    pub fn new(mut storage: B, geometry: &Geometry) -> Option<Self> {
        if storage.as_ref().len() < geometry.buffer_len() {
            return None;
        }
        storage.as_mut().fill(Cell::STALE);
        Some(Self {
            cells: storage,
            chips: geometry.chips(),
            cells_per_chip: geometry.cells_per_chip(),
            cell_mask: geometry.cell_mask(),
        })
    }

    fn index(&self, address: usize, chip: usize) -> Option<usize> {
        (address < self.cells_per_chip && chip < self.chips).then_some(address * self.chips + chip)
    }

    /// Cell at `address` of `chip`, if it exists
    pub fn cell(&self, address: usize, chip: usize) -> Option<Cell> {
        let index = self.index(address, chip)?;
        self.cells.as_ref().get(index).copied()
    }

    /// Store new LED bits for one cell
    ///
    /// `data` is masked to the cell width. The cell is flagged modified only
    /// when its LED bits change; a flag that is already set stays set even if
    /// the bits return to their transmitted value. Cells outside the buffer
    /// are ignored.
    pub fn update(&mut self, address: usize, chip: usize, data: u8) {
        let data = data & self.cell_mask;
        let Some(index) = self.index(address, chip) else {
            return;
        };
        if let Some(cell) = self.cells.as_mut().get_mut(index) {
            if cell.data() != data {
                *cell = Cell::modified(data);
            }
        }
    }

    /// Set or clear `mask` in one cell
    pub fn set_bits(&mut self, address: usize, chip: usize, mask: u8, on: bool) {
        let Some(cell) = self.cell(address, chip) else {
            return;
        };
        let data = if on {
            cell.data() | mask
        } else {
            cell.data() & !mask
        };
        self.update(address, chip, data);
    }

    /// Clear the modified flag of one cell, keeping its LED bits
    pub fn mark_synced(&mut self, address: usize, chip: usize) {
        let Some(index) = self.index(address, chip) else {
            return;
        };
        if let Some(cell) = self.cells.as_mut().get_mut(index) {
            *cell = cell.synced();
        }
    }

    /// Zero the LED bits of every cell
    pub fn clear(&mut self) {
        for address in 0..self.cells_per_chip {
            for chip in 0..self.chips {
                self.update(address, chip, 0);
            }
        }
    }

    /// Number of cells waiting for a commit
    pub fn modified_count(&self) -> usize {
        self.cells.as_ref()[..self.cells_per_chip * self.chips]
            .iter()
            .filter(|cell| cell.is_modified())
            .count()
    }

    /// Chips in the chain
    pub fn chips(&self) -> usize {
        self.chips
    }

    /// Cells per chip
    pub fn cells_per_chip(&self) -> usize {
        self.cells_per_chip
    }

    /// Give back the cell storage
    pub fn release(self) -> B {
        self.cells
    }
}
