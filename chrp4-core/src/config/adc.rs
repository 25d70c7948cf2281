//! ADC configuration
//!
//! Covers ADCON0-ADCON2 and the PORTC pins handed over to the analog
//! front end.

use chrp4_hal::bits::pin;

use crate::adc::Channel;

/// Result alignment in ADRESH:ADRESL, ADFM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justification {
    /// Upper 8 bits in ADRESH
    Left,
    /// Lower 8 bits in ADRESL
    Right,
}

/// Conversion clock, ADCS<2:0>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConversionClock {
    FoscDiv2 = 0b000,
    FoscDiv8 = 0b001,
    FoscDiv32 = 0b010,
    /// Dedicated RC oscillator
    Frc = 0b011,
    FoscDiv4 = 0b100,
    FoscDiv16 = 0b101,
    FoscDiv64 = 0b110,
}

/// Positive voltage reference, ADPREF<1:0>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum VoltageReference {
    Vdd = 0b00,
    /// External VREF+ pin
    VrefPin = 0b10,
    /// Internal fixed voltage reference
    Fvr = 0b11,
}

/// Auto-conversion trigger, TRIGSEL<3:0>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoTrigger {
    /// Conversions start only when GO is set
    Disabled,
    /// Raw TRIGSEL source number (low nibble)
    Source(u8),
}

const ADCON1_ADFM: u8 = 1 << 7;
const ADCON1_ADCS_SHIFT: u8 = 4;
const ADCON2_TRIGSEL_SHIFT: u8 = 4;

/// ADC configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    /// Channel selected after configuration
    pub default_channel: Channel,
    pub justification: Justification,
    pub clock: ConversionClock,
    pub reference: VoltageReference,
    pub trigger: AutoTrigger,
    /// PORTC pins switched to analog input
    pub analog_pins: u8,
}

impl AdcConfig {
    /// 8-bit left-justified conversions of the phototransistors
    pub const CHRP4: Self = Self {
        default_channel: Channel::Q1,
        justification: Justification::Left,
        clock: ConversionClock::FoscDiv64,
        reference: VoltageReference::Vdd,
        trigger: AutoTrigger::Disabled,
        analog_pins: pin(2) | pin(3),
    };

    /// ADCON0 value: default channel, converter off
    pub const fn adcon0(&self) -> u8 {
        self.default_channel.bits()
    }

    /// ADCON1 value
    pub const fn adcon1(&self) -> u8 {
        let adfm = match self.justification {
            Justification::Left => 0,
            Justification::Right => ADCON1_ADFM,
        };
        adfm | ((self.clock as u8) << ADCON1_ADCS_SHIFT) | self.reference as u8
    }

    /// ADCON2 value
    pub const fn adcon2(&self) -> u8 {
        match self.trigger {
            AutoTrigger::Disabled => 0,
            AutoTrigger::Source(src) => (src & 0x0F) << ADCON2_TRIGSEL_SHIFT,
        }
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::CHRP4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrp4_encoding() {
        let config = AdcConfig::CHRP4;
        assert_eq!(config.adcon0(), 0b0001_1100);
        assert_eq!(config.adcon1(), 0b0110_0000);
        assert_eq!(config.adcon2(), 0b0000_0000);
        assert_eq!(config.analog_pins, 0b0000_1100);
    }

    #[test]
    fn test_right_justified_fvr() {
        let config = AdcConfig {
            justification: Justification::Right,
            clock: ConversionClock::Frc,
            reference: VoltageReference::Fvr,
            ..AdcConfig::CHRP4
        };
        assert_eq!(config.adcon1(), 0b1011_0011);
    }

    #[test]
    fn test_trigger_source_masked() {
        let config = AdcConfig {
            trigger: AutoTrigger::Source(0x13),
            ..AdcConfig::CHRP4
        };
        assert_eq!(config.adcon2(), 0x30);
    }
}
