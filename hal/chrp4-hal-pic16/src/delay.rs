//! Busy-loop delay
//!
//! The PIC16 executes one instruction per four oscillator cycles. The loop
//! below is counted against that instruction clock, rounding up so a
//! requested delay is never cut short.

use embedded_hal::delay::DelayNs;

/// Oscillator frequency after `OSCCON = 0xFC` (16 MHz HFINTOSC x 3 PLL)
pub const FOSC_HZ: u32 = 48_000_000;

/// Oscillator cycles per instruction cycle
const CLOCKS_PER_INSTRUCTION: u32 = 4;

/// Instruction cycles spent in one iteration of the spin loop
const INSTRUCTIONS_PER_ITERATION: u64 = 4;

/// Spin-loop delay provider
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    instruction_hz: u32,
}

impl SpinDelay {
    /// Create a delay for an oscillator running at `fosc_hz`
    pub const fn new(fosc_hz: u32) -> Self {
        Self {
            instruction_hz: fosc_hz / CLOCKS_PER_INSTRUCTION,
        }
    }

    /// Loop iterations needed to cover `ns` nanoseconds
    pub fn iterations_for(&self, ns: u32) -> u64 {
        let instructions = (ns as u64 * self.instruction_hz as u64).div_ceil(1_000_000_000);
        instructions.div_ceil(INSTRUCTIONS_PER_ITERATION)
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(FOSC_HZ)
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..self.iterations_for(ns) {
            core::hint::spin_loop();
        }
    }
}
