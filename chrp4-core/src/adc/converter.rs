//! ADC conversions
//!
//! Two ways to sample:
//!
//! - [`Adc::read_channel`] powers up, selects, settles, converts and powers
//!   back down. Safe to call at any time.
//! - [`Adc::select`] once, then [`Adc::read`] repeatedly. Skips the settle
//!   delay and power cycle, but the caller must have selected a channel
//!   first or the result is whatever ADRESH last held.

use chrp4_hal::bits::adcon0::{ADON, GO, KEEP_ON_SELECT};
use chrp4_hal::{Register, RegisterFile};
use embedded_hal::delay::DelayNs;

use super::Channel;
use crate::error::BoardError;
use crate::poll::{poll_until, PollBudget};

/// Time for the sampling capacitor to charge after switching the mux
pub const SETTLE_TIME_US: u32 = 5;

/// ADC handle borrowing the register file
pub struct Adc<'a, R> {
    regs: &'a mut R,
    budget: PollBudget,
}

impl<'a, R: RegisterFile> Adc<'a, R> {
    /// Create a handle that waits up to `budget` polls per conversion
    pub fn new(regs: &'a mut R, budget: PollBudget) -> Self {
        Self { regs, budget }
    }

    /// Turn the converter on
    pub fn power_on(&mut self) {
        self.regs.set_bits(Register::Adcon0, ADON);
    }

    /// Turn the converter off
    pub fn power_off(&mut self) {
        self.regs.clear_bits(Register::Adcon0, ADON);
    }

    /// Check if the converter is powered
    pub fn is_powered(&mut self) -> bool {
        self.regs.is_set(Register::Adcon0, ADON)
    }

    /// Channel currently routed to the converter
    pub fn selected(&mut self) -> Channel {
        Channel::from_adcon0(self.regs.read(Register::Adcon0))
    }

    /// Power on and route `channel` to the converter
    ///
    /// Does not start a conversion.
    pub fn select(&mut self, channel: Channel) {
        self.power_on();
        self.regs.modify(Register::Adcon0, |v| v & KEEP_ON_SELECT);
        self.regs.modify(Register::Adcon0, |v| v | channel.bits());
        trace!("adc: selected chs {=u8}", channel.chs());
    }

    /// Convert the selected channel and return the upper 8 bits
    ///
    /// Expects [`Adc::select`] to have been called.
    pub fn read(&mut self) -> Result<u8, BoardError> {
        self.convert()?;
        Ok(self.result())
    }

    /// Power on, select, settle, convert, power off
    ///
    /// The converter is powered off on return, even if the conversion
    /// timed out.
    pub fn read_channel<D: DelayNs>(
        &mut self,
        channel: Channel,
        delay: &mut D,
    ) -> Result<u8, BoardError> {
        self.select(channel);
        delay.delay_us(SETTLE_TIME_US);
        let converted = self.convert();
        self.power_off();
        converted?;
        Ok(self.result())
    }

    /// Last conversion result, upper 8 bits
    pub fn result(&mut self) -> u8 {
        self.regs.read(Register::Adresh)
    }

    /// Full 10-bit result of a left-justified conversion
    pub fn result_10bit(&mut self) -> u16 {
        let high = self.regs.read(Register::Adresh) as u16;
        let low = self.regs.read(Register::Adresl) as u16;
        (high << 2) | (low >> 6)
    }

    fn convert(&mut self) -> Result<(), BoardError> {
        self.regs.set_bits(Register::Adcon0, GO);
        let regs = &mut *self.regs;
        match poll_until(self.budget, || !regs.is_set(Register::Adcon0, GO)) {
            Ok(polls) => {
                trace!("adc: conversion done after {=u32} polls", polls);
                Ok(())
            }
            Err(_) => {
                warn!("adc: conversion timed out");
                Err(BoardError::ConversionTimeout)
            }
        }
    }
}
