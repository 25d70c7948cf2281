//! ADC channel selectors
//!
//! A [`Channel`] holds the CHS field already shifted into its ADCON0
//! position, so selecting a channel is a single OR into the register.

use chrp4_hal::bits::adcon0::{CHS_MASK, CHS_SHIFT};

use crate::error::BoardError;

/// ADC input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Phototransistor Q1/Q3 (AN7)
    pub const Q1: Channel = Channel(0b0001_1100);
    /// Phototransistor Q2/Q4 (AN6)
    pub const Q2: Channel = Channel(0b0001_1000);
    /// On-die temperature indicator
    pub const TEMPERATURE: Channel = Channel(0b0111_0100);
    /// DAC output
    pub const DAC: Channel = Channel(0b0111_1000);
    /// Fixed voltage reference buffer
    pub const FVR: Channel = Channel(0b0111_1100);

    /// Highest CHS value
    pub const MAX_CHS: u8 = CHS_MASK >> CHS_SHIFT;

    /// Channel from a CHS number (0-31)
    pub const fn from_chs(chs: u8) -> Option<Self> {
        if chs <= Self::MAX_CHS {
            Some(Channel(chs << CHS_SHIFT))
        } else {
            None
        }
    }

    /// Channel from a pre-shifted ADCON0 selector
    pub const fn from_bits(bits: u8) -> Result<Self, BoardError> {
        if bits & !CHS_MASK == 0 {
            Ok(Channel(bits))
        } else {
            Err(BoardError::InvalidChannel(bits))
        }
    }

    /// Selector bits in ADCON0 position
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// CHS number
    pub const fn chs(self) -> u8 {
        self.0 >> CHS_SHIFT
    }

    /// Channel currently selected in an ADCON0 value
    pub const fn from_adcon0(adcon0: u8) -> Self {
        Channel(adcon0 & CHS_MASK)
    }
}

impl TryFrom<u8> for Channel {
    type Error = BoardError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}
