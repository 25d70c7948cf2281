//! Symbolic register names
//!
//! Only the special function registers the CHRP4 board code touches are
//! named here. Addresses live in the chip crate.

/// Special function register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Oscillator control (IRCF, PLL enable/multiplier, clock select)
    Osccon = 0,
    /// Oscillator status (PLLRDY and friends)
    Oscstat = 1,
    /// Active clock tuning control
    Actcon = 2,
    /// Option register (weak pull-up enable, TMR0 setup)
    OptionReg = 3,
    /// PORTA output latch
    Lata = 4,
    /// PORTB output latch
    Latb = 5,
    /// PORTC output latch
    Latc = 6,
    /// PORTA analog select
    Ansela = 7,
    /// PORTB analog select
    Anselb = 8,
    /// PORTC analog select
    Anselc = 9,
    /// PORTA weak pull-up enable
    Wpua = 10,
    /// PORTB weak pull-up enable
    Wpub = 11,
    /// PORTA direction (1 = input)
    Trisa = 12,
    /// PORTB direction (1 = input)
    Trisb = 13,
    /// PORTC direction (1 = input)
    Trisc = 14,
    /// ADC control 0 (channel select, GO/DONE, ADON)
    Adcon0 = 15,
    /// ADC control 1 (justification, conversion clock, reference)
    Adcon1 = 16,
    /// ADC control 2 (auto-conversion trigger)
    Adcon2 = 17,
    /// ADC result high byte
    Adresh = 18,
    /// ADC result low byte
    Adresl = 19,
}

impl Register {
    /// Number of named registers
    pub const COUNT: usize = 20;

    /// Every named register, in index order
    pub const ALL: [Register; Self::COUNT] = [
        Register::Osccon,
        Register::Oscstat,
        Register::Actcon,
        Register::OptionReg,
        Register::Lata,
        Register::Latb,
        Register::Latc,
        Register::Ansela,
        Register::Anselb,
        Register::Anselc,
        Register::Wpua,
        Register::Wpub,
        Register::Trisa,
        Register::Trisb,
        Register::Trisc,
        Register::Adcon0,
        Register::Adcon1,
        Register::Adcon2,
        Register::Adresh,
        Register::Adresl,
    ];

    /// Dense index, usable for array-backed register files
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Register for a dense index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Datasheet name
    pub const fn name(self) -> &'static str {
        match self {
            Register::Osccon => "OSCCON",
            Register::Oscstat => "OSCSTAT",
            Register::Actcon => "ACTCON",
            Register::OptionReg => "OPTION_REG",
            Register::Lata => "LATA",
            Register::Latb => "LATB",
            Register::Latc => "LATC",
            Register::Ansela => "ANSELA",
            Register::Anselb => "ANSELB",
            Register::Anselc => "ANSELC",
            Register::Wpua => "WPUA",
            Register::Wpub => "WPUB",
            Register::Trisa => "TRISA",
            Register::Trisb => "TRISB",
            Register::Trisc => "TRISC",
            Register::Adcon0 => "ADCON0",
            Register::Adcon1 => "ADCON1",
            Register::Adcon2 => "ADCON2",
            Register::Adresh => "ADRESH",
            Register::Adresl => "ADRESL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
            assert_eq!(Register::from_index(i), Some(*reg));
        }
        assert_eq!(Register::from_index(Register::COUNT), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Register::OptionReg.name(), "OPTION_REG");
        assert_eq!(Register::Adresh.name(), "ADRESH");
    }
}
