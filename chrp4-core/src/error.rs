//! Board error types

use crate::config::Port;

/// Errors from board bring-up and ADC operations
///
/// The hardware itself reports nothing; these come from poll budgets
/// running out and from configuration the chip cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// PLLRDY never came up within the poll budget
    PllLockTimeout,
    /// GO/DONE never cleared within the poll budget
    ConversionTimeout,
    /// Selector has bits outside the CHS field
    InvalidChannel(u8),
    /// Pull-ups requested on a port without a WPU register
    NoPullUpRegister(Port),
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::PllLockTimeout => write!(f, "PLL did not lock"),
            BoardError::ConversionTimeout => write!(f, "ADC conversion did not finish"),
            BoardError::InvalidChannel(bits) => write!(f, "invalid ADC channel {:#04x}", bits),
            BoardError::NoPullUpRegister(port) => {
                write!(f, "port {:?} has no weak pull-up register", port)
            }
        }
    }
}
