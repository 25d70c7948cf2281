//! Volatile register access
//!
//! Maps symbolic registers onto the banked SFR space and reads/writes them
//! with volatile accesses.

use chrp4_hal::{Register, RegisterFile};

use crate::address::address;

/// Memory-mapped register file
///
/// Each access goes to `base + address(reg)`. On the chip `base` is 0;
/// tests point it at a RAM buffer of [`crate::address::SFR_SPACE`] bytes.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Create a register file rooted at `base`
    ///
    /// # Safety
    ///
    /// `base + SFR_SPACE` must be valid for volatile reads and writes for
    /// the lifetime of the returned value, and nothing else may access
    /// that memory concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Take the chip's own SFR space
    ///
    /// # Safety
    ///
    /// Only one `Mmio` over the real SFRs may exist at a time.
    pub const unsafe fn steal() -> Self {
        Self { base: 0 }
    }

    fn ptr(&self, reg: Register) -> *mut u8 {
        (self.base + address(reg) as usize) as *mut u8
    }
}

impl RegisterFile for Mmio {
    fn read(&mut self, reg: Register) -> u8 {
        // SAFETY: the constructor contract covers every SFR address
        unsafe { core::ptr::read_volatile(self.ptr(reg)) }
    }

    fn write(&mut self, reg: Register, value: u8) {
        // SAFETY: the constructor contract covers every SFR address
        unsafe { core::ptr::write_volatile(self.ptr(reg), value) }
    }
}
