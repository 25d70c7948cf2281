//! SFR address map
//!
//! Banked data-memory addresses (bank * 0x80 + offset) from the
//! PIC16(L)F1459 register summary.

use chrp4_hal::Register;

/// Size of the banked address space covering every named SFR (banks 0-7)
pub const SFR_SPACE: usize = 0x400;

/// Banked address of a register
pub const fn address(reg: Register) -> u16 {
    match reg {
        // Bank 1
        Register::Trisa => 0x08C,
        Register::Trisb => 0x08D,
        Register::Trisc => 0x08E,
        Register::OptionReg => 0x095,
        Register::Osccon => 0x099,
        Register::Oscstat => 0x09A,
        Register::Adresl => 0x09B,
        Register::Adresh => 0x09C,
        Register::Adcon0 => 0x09D,
        Register::Adcon1 => 0x09E,
        Register::Adcon2 => 0x09F,
        // Bank 2
        Register::Lata => 0x10C,
        Register::Latb => 0x10D,
        Register::Latc => 0x10E,
        // Bank 3
        Register::Ansela => 0x18C,
        Register::Anselb => 0x18D,
        Register::Anselc => 0x18E,
        // Bank 4
        Register::Wpua => 0x20C,
        Register::Wpub => 0x20D,
        // Bank 7
        Register::Actcon => 0x39B,
    }
}

/// Bank a register lives in
pub const fn bank(reg: Register) -> u8 {
    (address(reg) >> 7) as u8
}
