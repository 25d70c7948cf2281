//! Oscillator configuration
//!
//! Covers OSCCON (internal oscillator frequency and PLL) and ACTCON
//! (active clock tuning).

/// HFINTOSC frequency selection, IRCF<3:0>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InternalFrequency {
    /// 16 MHz HF
    Mhz16 = 0b1111,
    /// 8 MHz HF
    Mhz8 = 0b1110,
    /// 4 MHz HF
    Mhz4 = 0b1101,
    /// 2 MHz HF
    Mhz2 = 0b1100,
    /// 1 MHz HF
    Mhz1 = 0b1011,
}

impl InternalFrequency {
    /// Frequency in Hz
    pub const fn hz(self) -> u32 {
        match self {
            InternalFrequency::Mhz16 => 16_000_000,
            InternalFrequency::Mhz8 => 8_000_000,
            InternalFrequency::Mhz4 => 4_000_000,
            InternalFrequency::Mhz2 => 2_000_000,
            InternalFrequency::Mhz1 => 1_000_000,
        }
    }
}

/// Software PLL multiplier, SPLLMULT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllMultiplier {
    /// 3x (SPLLMULT = 1)
    X3,
    /// 4x (SPLLMULT = 0)
    X4,
}

impl PllMultiplier {
    /// Multiplication factor
    pub const fn factor(self) -> u32 {
        match self {
            PllMultiplier::X3 => 3,
            PllMultiplier::X4 => 4,
        }
    }
}

/// Reference for active clock tuning, ACTSRC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningSource {
    /// Secondary oscillator (ACTSRC = 0)
    Sosc,
    /// USB start-of-frame clock (ACTSRC = 1)
    Usb,
}

const OSCCON_SPLLEN: u8 = 1 << 7;
const OSCCON_SPLLMULT: u8 = 1 << 6;
const OSCCON_IRCF_SHIFT: u8 = 2;

const ACTCON_ACTEN: u8 = 1 << 7;
const ACTCON_ACTSRC: u8 = 1 << 4;

/// Oscillator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscillatorConfig {
    /// HFINTOSC frequency
    pub frequency: InternalFrequency,
    /// PLL multiplier, or None to run straight from HFINTOSC
    pub pll: Option<PllMultiplier>,
    /// Active clock tuning reference, or None to leave tuning off
    pub active_tuning: Option<TuningSource>,
    /// Wait for PLLRDY after enabling the PLL
    ///
    /// Simulators have no lock signal, so the wait must be skipped there.
    pub wait_for_lock: bool,
}

impl OscillatorConfig {
    /// 16 MHz HFINTOSC x3 PLL = 48 MHz, tuned from the USB clock
    ///
    /// Required by the USB bootloader.
    pub const USB_48MHZ: Self = Self {
        frequency: InternalFrequency::Mhz16,
        pll: Some(PllMultiplier::X3),
        active_tuning: Some(TuningSource::Usb),
        wait_for_lock: true,
    };

    /// Same settings without waiting for the PLL to lock
    pub const fn for_simulation(self) -> Self {
        Self {
            wait_for_lock: false,
            ..self
        }
    }

    /// System clock frequency in Hz
    pub const fn fosc_hz(&self) -> u32 {
        match self.pll {
            Some(pll) => self.frequency.hz() * pll.factor(),
            None => self.frequency.hz(),
        }
    }

    /// OSCCON value (SCS = 00, clock from config word)
    pub const fn osccon(&self) -> u8 {
        let pll = match self.pll {
            Some(PllMultiplier::X3) => OSCCON_SPLLEN | OSCCON_SPLLMULT,
            Some(PllMultiplier::X4) => OSCCON_SPLLEN,
            None => 0,
        };
        pll | ((self.frequency as u8) << OSCCON_IRCF_SHIFT)
    }

    /// ACTCON value
    pub const fn actcon(&self) -> u8 {
        match self.active_tuning {
            Some(TuningSource::Usb) => ACTCON_ACTEN | ACTCON_ACTSRC,
            Some(TuningSource::Sosc) => ACTCON_ACTEN,
            None => 0,
        }
    }
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self::USB_48MHZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_48mhz_encoding() {
        let config = OscillatorConfig::USB_48MHZ;
        assert_eq!(config.osccon(), 0xFC);
        assert_eq!(config.actcon(), 0x90);
        assert_eq!(config.fosc_hz(), 48_000_000);
    }

    #[test]
    fn test_pll_off() {
        let config = OscillatorConfig {
            frequency: InternalFrequency::Mhz8,
            pll: None,
            active_tuning: None,
            wait_for_lock: false,
        };
        assert_eq!(config.osccon(), 0b0011_1000);
        assert_eq!(config.actcon(), 0);
        assert_eq!(config.fosc_hz(), 8_000_000);
    }

    #[test]
    fn test_x4_pll() {
        let config = OscillatorConfig {
            frequency: InternalFrequency::Mhz8,
            pll: Some(PllMultiplier::X4),
            active_tuning: Some(TuningSource::Sosc),
            wait_for_lock: true,
        };
        assert_eq!(config.osccon(), 0b1011_1000);
        assert_eq!(config.actcon(), 0b1000_0000);
        assert_eq!(config.fosc_hz(), 32_000_000);
    }

    #[test]
    fn test_for_simulation_only_drops_wait() {
        let sim = OscillatorConfig::USB_48MHZ.for_simulation();
        assert!(!sim.wait_for_lock);
        assert_eq!(sim.osccon(), 0xFC);
        assert_eq!(sim.actcon(), 0x90);
    }
}
