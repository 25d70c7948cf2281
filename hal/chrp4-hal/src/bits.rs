//! Register bit masks
//!
//! Bit positions from the PIC16F1459 datasheet for the fields the board
//! code manipulates directly.

/// Mask for pin `n` (0-7) of a port register
pub const fn pin(n: u8) -> u8 {
    1 << (n & 0x07)
}

/// OSCSTAT bits
pub mod oscstat {
    /// 4x/3x PLL is ready
    pub const PLLRDY: u8 = 1 << 6;
}

/// ADCON0 bits
pub mod adcon0 {
    /// ADC enable
    pub const ADON: u8 = 1 << 0;
    /// Conversion in progress; hardware clears it when done
    pub const GO: u8 = 1 << 1;
    /// Channel select field, CHS<4:0>
    pub const CHS_MASK: u8 = 0b0111_1100;
    /// Shift of the CHS field
    pub const CHS_SHIFT: u8 = 2;
    /// Bits preserved when the channel field is cleared
    pub const KEEP_ON_SELECT: u8 = !CHS_MASK;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_masks() {
        assert_eq!(pin(0), 0b0000_0001);
        assert_eq!(pin(2), 0b0000_0100);
        assert_eq!(pin(7), 0b1000_0000);
    }

    #[test]
    fn test_select_mask_matches_datasheet() {
        // Clearing CHS keeps the unimplemented bit, GO/DONE and ADON
        assert_eq!(adcon0::KEEP_ON_SELECT, 0b1000_0011);
    }
}
