//! Test doubles: recording output pins and a simulated select chain

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::command::{ADDRESS_BITS, COMMAND_BITS, ID_BITS, ID_COMMAND, ID_WRITE};

/// Bus line a recorded level belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Data,
    Clk,
    Wr,
    Cs,
}

type Log = Rc<RefCell<Vec<(Line, bool)>>>;

/// Shared log of every level written to the recording pins
#[derive(Clone, Default)]
pub struct Recorder {
    log: Log,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> RecordingPin {
        RecordingPin {
            line,
            log: Rc::clone(&self.log),
        }
    }

    pub fn events(&self) -> Vec<(Line, bool)> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

pub struct RecordingPin {
    line: Line,
    log: Log,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.line, true));
        Ok(())
    }
}

/// A decoded frame received by one chip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Command { command: u8, tail: u16 },
    Write { address: u8, data: Vec<u8> },
    Unknown(Vec<u8>),
}

impl Frame {
    fn parse(bits: &[u8]) -> Self {
        let id_bits = ID_BITS as usize;
        if bits.len() < id_bits {
            return Self::Unknown(bits.to_vec());
        }
        let id = to_value(&bits[..id_bits]) as u8;
        let rest = &bits[id_bits..];
        let command_bits = COMMAND_BITS as usize;
        let address_bits = ADDRESS_BITS as usize;
        if id == ID_COMMAND && rest.len() >= command_bits {
            Self::Command {
                command: to_value(&rest[..command_bits]) as u8,
                tail: to_value(&rest[command_bits..]),
            }
        } else if id == ID_WRITE && rest.len() >= address_bits {
            Self::Write {
                address: to_value(&rest[..address_bits]) as u8,
                data: rest[address_bits..].to_vec(),
            }
        } else {
            Self::Unknown(bits.to_vec())
        }
    }
}

/// MSB-first bit list to integer
pub fn to_value(bits: &[u8]) -> u16 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | u16::from(*bit))
}

/// Models the chips' side of the bus
///
/// Each stage of the select chain latches CS on the rising edge of CLK; a chip
/// listens while its stage is low, and latches DATA on the rising edge of WR.
pub struct ChainSimulator {
    stages: Vec<bool>,
    pending: Vec<Vec<u8>>,
    frames: Vec<(usize, Frame)>,
    cs: bool,
    clk: bool,
    wr: bool,
    data: bool,
}

impl ChainSimulator {
    pub fn new(chips: usize) -> Self {
        Self {
            stages: vec![true; chips],
            pending: vec![Vec::new(); chips],
            frames: Vec::new(),
            cs: true,
            clk: false,
            wr: true,
            data: false,
        }
    }

    /// Every non-empty frame received, in the order the frames ended
    pub fn decode(chips: usize, events: &[(Line, bool)]) -> Vec<(usize, Frame)> {
        let mut sim = Self::new(chips);
        sim.replay(events);
        sim.finish()
    }

    pub fn is_selected(&self, stage: usize) -> bool {
        !self.stages[stage]
    }

    pub fn replay(&mut self, events: &[(Line, bool)]) {
        for &(line, level) in events {
            match line {
                Line::Cs => self.cs = level,
                Line::Data => self.data = level,
                Line::Clk => {
                    if level && !self.clk {
                        self.shift();
                    }
                    self.clk = level;
                }
                Line::Wr => {
                    if level && !self.wr {
                        self.latch();
                    }
                    self.wr = level;
                }
            }
        }
    }

    pub fn finish(mut self) -> Vec<(usize, Frame)> {
        for stage in 0..self.stages.len() {
            self.end_frame(stage);
        }
        self.frames
    }

    fn shift(&mut self) {
        let previous = self.stages.clone();
        for stage in (1..self.stages.len()).rev() {
            self.stages[stage] = previous[stage - 1];
        }
        if let Some(first) = self.stages.first_mut() {
            *first = self.cs;
        }
        for stage in 0..self.stages.len() {
            if !previous[stage] && self.stages[stage] {
                self.end_frame(stage);
            }
        }
    }

    fn latch(&mut self) {
        for stage in 0..self.stages.len() {
            if !self.stages[stage] {
                self.pending[stage].push(u8::from(self.data));
            }
        }
    }

    fn end_frame(&mut self, stage: usize) {
        let bits = core::mem::take(&mut self.pending[stage]);
        if !bits.is_empty() {
            self.frames.push((stage, Frame::parse(&bits)));
        }
    }
}

/// RAM contents of every chip after applying all write frames
///
/// Indexed `[chip][address]`; cells never written are `None`.
pub fn chip_ram(chips: usize, cells: usize, frames: &[(usize, Frame)]) -> Vec<Vec<Option<u8>>> {
    let mut ram = vec![vec![None; cells]; chips];
    for (chip, frame) in frames {
        if let Frame::Write { address, data } = frame {
            ram[*chip][*address as usize] = Some(to_value(data) as u8);
        }
    }
    ram
}
