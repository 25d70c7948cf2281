//! Register access abstraction
//!
//! Provides the read/write capability over the 8-bit register file that
//! board code is written against.

use crate::register::Register;

/// 8-bit register file
///
/// Implementations perform the actual hardware access (volatile MMIO on
/// the chip, an in-memory model in tests). Reads take `&mut self` because
/// polling a status register may advance simulated hardware.
pub trait RegisterFile {
    /// Read the current value of a register
    fn read(&mut self, reg: Register) -> u8;

    /// Write a value to a register
    fn write(&mut self, reg: Register, value: u8);

    /// Read-modify-write a register
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the bits in `mask`, leaving the others untouched
    fn set_bits(&mut self, reg: Register, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear the bits in `mask`, leaving the others untouched
    fn clear_bits(&mut self, reg: Register, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }

    /// Check if any bit in `mask` is set
    fn is_set(&mut self, reg: Register, mask: u8) -> bool {
        self.read(reg) & mask != 0
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &mut T {
    fn read(&mut self, reg: Register) -> u8 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u8) {
        (**self).write(reg, value)
    }
}
