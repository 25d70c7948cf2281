//! Digital I/O configuration
//!
//! CHRP4 on-board devices by port:
//!
//! - PORTA: RA3 = SW1 (input, pull-up), RA4 = beeper, RA5 = LED D1
//! - PORTB: RB4-RB7 = pushbuttons SW2-SW5 (inputs, pull-ups);
//!   on the SONAR variant RB5 drives TRIG and RB4 reads ECHO
//! - PORTC: RC2/RC3 = phototransistors Q1/Q3 and Q2/Q4 (inputs),
//!   the rest drive LEDs and motor outputs

use chrp4_hal::Register;

/// Digital port group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    /// Output latch register
    pub const fn latch(self) -> Register {
        match self {
            Port::A => Register::Lata,
            Port::B => Register::Latb,
            Port::C => Register::Latc,
        }
    }

    /// Analog select register
    pub const fn analog(self) -> Register {
        match self {
            Port::A => Register::Ansela,
            Port::B => Register::Anselb,
            Port::C => Register::Anselc,
        }
    }

    /// Weak pull-up register (PORTC has none)
    pub const fn pull_ups(self) -> Option<Register> {
        match self {
            Port::A => Some(Register::Wpua),
            Port::B => Some(Register::Wpub),
            Port::C => None,
        }
    }

    /// Direction register
    pub const fn direction(self) -> Register {
        match self {
            Port::A => Register::Trisa,
            Port::B => Register::Trisb,
            Port::C => Register::Trisc,
        }
    }
}

/// TMR0 clock source, TMR0CS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tmr0Source {
    /// Instruction clock FOSC/4
    Internal,
    /// T0CKI pin
    T0cki,
}

/// TMR0 prescaler ratio, PS<2:0>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Prescaler {
    Div2 = 0b000,
    Div4 = 0b001,
    Div8 = 0b010,
    Div16 = 0b011,
    Div32 = 0b100,
    Div64 = 0b101,
    Div128 = 0b110,
    Div256 = 0b111,
}

const OPTION_NWPUEN: u8 = 1 << 7;
const OPTION_INTEDG: u8 = 1 << 6;
const OPTION_TMR0CS: u8 = 1 << 5;
const OPTION_TMR0SE: u8 = 1 << 4;
const OPTION_PSA: u8 = 1 << 3;

/// OPTION_REG settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OptionConfig {
    /// Allow per-pin weak pull-ups (WPUEN is active low)
    pub weak_pull_ups: bool,
    /// INT pin interrupts on the rising edge
    pub int_rising_edge: bool,
    /// TMR0 clock source
    pub tmr0_source: Tmr0Source,
    /// Increment TMR0 on the falling edge of T0CKI
    pub tmr0_falling_edge: bool,
    /// Prescaler for TMR0, or None to bypass it
    pub prescaler: Option<Prescaler>,
}

impl OptionConfig {
    /// Pull-ups on, TMR0 from FOSC/4 through a 1:256 prescaler
    pub const CHRP4: Self = Self {
        weak_pull_ups: true,
        int_rising_edge: true,
        tmr0_source: Tmr0Source::Internal,
        tmr0_falling_edge: true,
        prescaler: Some(Prescaler::Div256),
    };

    /// OPTION_REG value
    pub const fn bits(&self) -> u8 {
        let mut bits = 0;
        if !self.weak_pull_ups {
            bits |= OPTION_NWPUEN;
        }
        if self.int_rising_edge {
            bits |= OPTION_INTEDG;
        }
        if let Tmr0Source::T0cki = self.tmr0_source {
            bits |= OPTION_TMR0CS;
        }
        if self.tmr0_falling_edge {
            bits |= OPTION_TMR0SE;
        }
        match self.prescaler {
            Some(ps) => bits | ps as u8,
            None => bits | OPTION_PSA,
        }
    }
}

/// Settings for one port group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortConfig {
    /// Initial output latch value
    pub latch: u8,
    /// Analog select mask (1 = analog)
    pub analog: u8,
    /// Weak pull-up mask, or None to leave WPU alone
    pub pull_ups: Option<u8>,
    /// Direction mask (1 = input, 0 = output)
    pub direction: u8,
}

impl PortConfig {
    /// All-digital port with cleared latches
    pub const fn digital(direction: u8) -> Self {
        Self {
            latch: 0,
            analog: 0,
            pull_ups: None,
            direction,
        }
    }

    /// Enable weak pull-ups on the pins in `mask`
    pub const fn with_pull_ups(self, mask: u8) -> Self {
        Self {
            pull_ups: Some(mask),
            ..self
        }
    }

    /// Pins configured as outputs
    pub const fn outputs(&self) -> u8 {
        !self.direction
    }
}

/// Board I/O configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub option: OptionConfig,
    pub porta: PortConfig,
    pub portb: PortConfig,
    pub portc: PortConfig,
}

impl BoardConfig {
    /// Standard CHRP4 devices: pushbuttons, LEDs, beeper, phototransistors
    pub const fn chrp4() -> Self {
        Self {
            option: OptionConfig::CHRP4,
            // SW1 pull-up, LED D1 and beeper outputs
            porta: PortConfig::digital(0b0000_1111).with_pull_ups(0b0000_1000),
            // SW2-SW5 inputs with pull-ups
            portb: PortConfig::digital(0b1111_0000).with_pull_ups(0b1111_0000),
            // Q1/Q3 and Q2/Q4 phototransistor inputs
            portc: PortConfig::digital(0b0000_1100),
        }
    }

    /// SONAR module on H2: RB5 TRIG output, RB4 ECHO input
    pub const fn chrp4_sonar() -> Self {
        let mut config = Self::chrp4();
        config.portb.direction = 0b1101_0000;
        config
    }

    /// Port settings in bring-up order
    pub const fn ports(&self) -> [(Port, PortConfig); 3] {
        [
            (Port::A, self.porta),
            (Port::B, self.portb),
            (Port::C, self.portc),
        ]
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::chrp4()
    }
}
