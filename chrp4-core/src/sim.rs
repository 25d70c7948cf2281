//! In-memory register file for host-side testing
//!
//! Models just enough of the PIC16F1459 to exercise the bring-up and ADC
//! code:
//!
//! - Power-on reset values for the port and option registers
//! - PLLRDY coming up a configurable number of OSCSTAT reads after the
//!   PLL is enabled (or never)
//! - GO/DONE clearing a configurable number of ADCON0 polls after a
//!   conversion starts, loading ADRESH from a per-channel sample table
//! - Conversions never finishing when started with ADON clear, and being
//!   aborted when ADON is cleared mid-conversion
//! - A log of every write, for ordering checks

use chrp4_hal::bits::adcon0::{ADON, GO};
use chrp4_hal::bits::oscstat::PLLRDY;
use chrp4_hal::{Register, RegisterFile};
use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::adc::Channel;

/// Number of writes kept in the log
pub const WRITE_LOG_LEN: usize = 128;

const OSCCON_SPLLEN: u8 = 1 << 7;
const SAMPLE_SLOTS: usize = Channel::MAX_CHS as usize + 1;

/// Simulated register file
#[derive(Debug, Clone)]
pub struct SimRegisters {
    regs: [u8; Register::COUNT],
    /// OSCSTAT reads after PLL enable before PLLRDY sets, None = never
    pll_lock_after: Option<u32>,
    oscstat_reads: u32,
    /// ADCON0 polls before GO clears, None = never
    conversion_polls: Option<u32>,
    pending: Option<u32>,
    adcon0_polls: u32,
    samples: [u8; SAMPLE_SLOTS],
    starts: u32,
    writes: Vec<(Register, u8), WRITE_LOG_LEN>,
    dropped_writes: u32,
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// Register file at power-on reset
    ///
    /// The PLL locks on the first status read and conversions finish
    /// after two polls.
    pub fn new() -> Self {
        let mut regs = [0u8; Register::COUNT];
        regs[Register::OptionReg.index()] = 0xFF;
        regs[Register::Osccon.index()] = 0b0011_1100;
        regs[Register::Trisa.index()] = 0xFF;
        regs[Register::Trisb.index()] = 0xFF;
        regs[Register::Trisc.index()] = 0xFF;
        regs[Register::Ansela.index()] = 0b0001_0000;
        regs[Register::Anselb.index()] = 0b0011_0000;
        regs[Register::Anselc.index()] = 0b1100_1111;
        regs[Register::Wpua.index()] = 0b0011_1111;
        regs[Register::Wpub.index()] = 0b1111_0000;

        Self {
            regs,
            pll_lock_after: Some(1),
            oscstat_reads: 0,
            conversion_polls: Some(2),
            pending: None,
            adcon0_polls: 0,
            samples: [0; SAMPLE_SLOTS],
            starts: 0,
            writes: Vec::new(),
            dropped_writes: 0,
        }
    }

    /// PLLRDY sets on the `reads`-th OSCSTAT read after the PLL is enabled
    pub fn with_pll_lock_after(mut self, reads: u32) -> Self {
        self.pll_lock_after = Some(reads);
        self
    }

    /// PLLRDY never sets
    pub fn with_pll_never_locking(mut self) -> Self {
        self.pll_lock_after = None;
        self
    }

    /// GO clears on the poll after `polls` polls that still see it set
    pub fn with_conversion_polls(mut self, polls: u32) -> Self {
        self.conversion_polls = Some(polls);
        self
    }

    /// GO never clears on its own
    pub fn with_stuck_conversion(mut self) -> Self {
        self.conversion_polls = None;
        self
    }

    /// Value a conversion of `channel` produces in ADRESH
    pub fn set_sample(&mut self, channel: Channel, value: u8) {
        self.samples[channel.chs() as usize] = value;
    }

    /// Read a register without side effects
    pub fn peek(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }

    /// Write a register without side effects or logging
    pub fn poke(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = value;
    }

    /// Number of conversions started (GO rising edges)
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// ADCON0 reads made while a conversion was in flight
    pub fn adcon0_polls(&self) -> u32 {
        self.adcon0_polls
    }

    /// OSCSTAT reads made after the PLL was enabled
    pub fn oscstat_reads(&self) -> u32 {
        self.oscstat_reads
    }

    /// Logged writes, oldest first
    pub fn writes(&self) -> &[(Register, u8)] {
        &self.writes
    }

    /// Writes that did not fit in the log
    pub fn dropped_writes(&self) -> u32 {
        self.dropped_writes
    }

    /// Forget logged writes and counters
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.dropped_writes = 0;
        self.starts = 0;
        self.adcon0_polls = 0;
        self.oscstat_reads = 0;
    }

    /// Position of the first logged write to `reg`
    pub fn first_write(&self, reg: Register) -> Option<usize> {
        self.writes.iter().position(|(r, _)| *r == reg)
    }

    /// Position of the last logged write to `reg`
    pub fn last_write(&self, reg: Register) -> Option<usize> {
        self.writes.iter().rposition(|(r, _)| *r == reg)
    }

    fn pll_enabled(&self) -> bool {
        self.peek(Register::Osccon) & OSCCON_SPLLEN != 0
    }

    fn poll_oscstat(&mut self) {
        if !self.pll_enabled() {
            return;
        }
        self.oscstat_reads = self.oscstat_reads.saturating_add(1);
        if let Some(after) = self.pll_lock_after {
            if self.oscstat_reads >= after {
                self.regs[Register::Oscstat.index()] |= PLLRDY;
            }
        }
    }

    fn poll_adcon0(&mut self) {
        let Some(remaining) = self.pending else {
            return;
        };
        self.adcon0_polls = self.adcon0_polls.saturating_add(1);
        if remaining == 0 {
            self.finish_conversion();
        } else {
            self.pending = Some(remaining - 1);
        }
    }

    fn finish_conversion(&mut self) {
        let chs = Channel::from_adcon0(self.peek(Register::Adcon0)).chs();
        self.regs[Register::Adresh.index()] = self.samples[chs as usize];
        self.regs[Register::Adresl.index()] = 0;
        self.regs[Register::Adcon0.index()] &= !GO;
        self.pending = None;
    }

    fn write_adcon0(&mut self, value: u8) {
        let old = self.peek(Register::Adcon0);
        self.regs[Register::Adcon0.index()] = value;

        let started = old & GO == 0 && value & GO != 0;
        if started {
            self.starts = self.starts.saturating_add(1);
            self.pending = if value & ADON != 0 {
                self.conversion_polls
            } else {
                None
            };
        }

        // Dropping ADON aborts a conversion in flight
        if value & ADON == 0 && value & GO != 0 && !started {
            self.regs[Register::Adcon0.index()] &= !GO;
            self.pending = None;
        }
    }
}

impl RegisterFile for SimRegisters {
    fn read(&mut self, reg: Register) -> u8 {
        match reg {
            Register::Oscstat => self.poll_oscstat(),
            Register::Adcon0 => self.poll_adcon0(),
            _ => {}
        }
        self.peek(reg)
    }

    fn write(&mut self, reg: Register, value: u8) {
        if self.writes.push((reg, value)).is_err() {
            self.dropped_writes = self.dropped_writes.saturating_add(1);
        }
        match reg {
            // Read-only status
            Register::Oscstat => {}
            Register::Adcon0 => self.write_adcon0(value),
            _ => self.poke(reg, value),
        }
    }
}

/// Delay that returns immediately and records how long it was asked for
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay {
    total_ns: u64,
}

impl NoDelay {
    /// Total requested delay in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns = self.total_ns.saturating_add(ns as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pll_locks_only_when_enabled() {
        let mut regs = SimRegisters::new();
        assert!(!regs.is_set(Register::Oscstat, PLLRDY));

        regs.write(Register::Osccon, 0xFC);
        assert!(regs.is_set(Register::Oscstat, PLLRDY));
    }

    #[test]
    fn test_pll_lock_latency() {
        let mut regs = SimRegisters::new().with_pll_lock_after(3);
        regs.write(Register::Osccon, 0xFC);

        assert!(!regs.is_set(Register::Oscstat, PLLRDY));
        assert!(!regs.is_set(Register::Oscstat, PLLRDY));
        assert!(regs.is_set(Register::Oscstat, PLLRDY));
    }

    #[test]
    fn test_oscstat_is_read_only() {
        let mut regs = SimRegisters::new().with_pll_never_locking();
        regs.write(Register::Oscstat, PLLRDY);
        assert_eq!(regs.peek(Register::Oscstat), 0);
    }

    #[test]
    fn test_conversion_loads_sample() {
        let mut regs = SimRegisters::new().with_conversion_polls(0);
        regs.set_sample(Channel::Q2, 0x80);
        regs.write(Register::Adcon0, Channel::Q2.bits() | ADON | GO);

        assert!(!regs.is_set(Register::Adcon0, GO));
        assert_eq!(regs.peek(Register::Adresh), 0x80);
        assert_eq!(regs.starts(), 1);
    }

    #[test]
    fn test_clearing_adon_aborts() {
        let mut regs = SimRegisters::new().with_stuck_conversion();
        regs.write(Register::Adcon0, ADON | GO);
        regs.write(Register::Adcon0, GO);

        assert_eq!(regs.peek(Register::Adcon0), 0);
    }

    #[test]
    fn test_write_log() {
        let mut regs = SimRegisters::new();
        regs.write(Register::Lata, 0);
        regs.write(Register::Trisa, 0x0F);

        assert_eq!(
            regs.writes(),
            &[(Register::Lata, 0), (Register::Trisa, 0x0F)]
        );
        assert_eq!(regs.first_write(Register::Trisa), Some(1));
        assert_eq!(regs.last_write(Register::Trisb), None);

        regs.clear_log();
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn test_log_overflow_counted() {
        let mut regs = SimRegisters::new();
        for _ in 0..WRITE_LOG_LEN + 3 {
            regs.write(Register::Latc, 0);
        }
        assert_eq!(regs.writes().len(), WRITE_LOG_LEN);
        assert_eq!(regs.dropped_writes(), 3);
    }
}
