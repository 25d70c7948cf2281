//! Board bring-up
//!
//! Runs once at boot, in this order:
//!
//! 1. [`Board::configure_oscillator`] - 48 MHz from HFINTOSC and PLL
//! 2. [`Board::configure_io`] - pull-ups, latches, analog select, directions
//! 3. [`Board::configure_adc`] - analog pins and converter setup
//!
//! after which [`Board::adc`] hands out the converter for sampling.

use chrp4_hal::bits::oscstat::PLLRDY;
use chrp4_hal::{Register, RegisterFile};

use crate::adc::Adc;
use crate::config::{AdcConfig, BoardConfig, OscillatorConfig};
use crate::error::BoardError;
use crate::poll::{poll_until, PollBudget};

/// Poll budgets for the hardware waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeouts {
    /// Waiting for PLLRDY
    pub pll_lock: PollBudget,
    /// Waiting for GO/DONE to clear
    pub conversion: PollBudget,
}

impl Timeouts {
    /// Spin forever, like the bare hardware loops
    pub const UNBOUNDED: Self = Self {
        pll_lock: PollBudget::Unbounded,
        conversion: PollBudget::Unbounded,
    };
}

/// CHRP4 board
///
/// Owns the register file; every operation goes through `&mut self`, so
/// there is a single writer by construction.
pub struct Board<R> {
    regs: R,
    timeouts: Timeouts,
}

impl<R: RegisterFile> Board<R> {
    /// Wrap a register file with unbounded waits
    pub fn new(regs: R) -> Self {
        Self {
            regs,
            timeouts: Timeouts::UNBOUNDED,
        }
    }

    /// Replace the poll budgets
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Current poll budgets
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Program the oscillator and wait for the PLL
    pub fn configure_oscillator(&mut self, config: &OscillatorConfig) -> Result<(), BoardError> {
        self.regs.write(Register::Osccon, config.osccon());
        self.regs.write(Register::Actcon, config.actcon());

        if !config.wait_for_lock || config.pll.is_none() {
            debug!("osc: not waiting for PLL lock");
            return Ok(());
        }

        let regs = &mut self.regs;
        match poll_until(self.timeouts.pll_lock, || regs.is_set(Register::Oscstat, PLLRDY)) {
            Ok(polls) => {
                info!("osc: PLL locked after {=u32} polls, fosc = {=u32} Hz", polls, config.fosc_hz());
                Ok(())
            }
            Err(_) => {
                warn!("osc: PLL did not lock");
                Err(BoardError::PllLockTimeout)
            }
        }
    }

    /// Configure the on-board digital I/O
    ///
    /// Latches are cleared before directions are set so no pin briefly
    /// drives a stale level when it turns into an output.
    pub fn configure_io(&mut self, config: &BoardConfig) -> Result<(), BoardError> {
        for (port, settings) in config.ports() {
            if settings.pull_ups.is_some() && port.pull_ups().is_none() {
                return Err(BoardError::NoPullUpRegister(port));
            }
        }

        self.regs.write(Register::OptionReg, config.option.bits());

        for (port, settings) in config.ports() {
            self.regs.write(port.latch(), settings.latch);
            self.regs.write(port.analog(), settings.analog);
            if let (Some(reg), Some(mask)) = (port.pull_ups(), settings.pull_ups) {
                self.regs.write(reg, mask);
            }
            self.regs.write(port.direction(), settings.direction);
            trace!("io: port {} tris = {=u8:#b}", port, settings.direction);
        }

        info!("io: ports configured");
        Ok(())
    }

    /// Hand the analog pins to the ADC and configure it, leaving it off
    pub fn configure_adc(&mut self, config: &AdcConfig) {
        self.regs.write(Register::Latc, 0);

        // Output drivers off, analog input on
        self.regs.set_bits(Register::Trisc, config.analog_pins);
        self.regs.write(Register::Anselc, config.analog_pins);

        self.regs.write(Register::Adcon0, config.adcon0());
        self.regs.write(Register::Adcon1, config.adcon1());
        self.regs.write(Register::Adcon2, config.adcon2());

        info!("adc: configured, default chs {=u8}", config.default_channel.chs());
    }

    /// Full boot sequence
    pub fn init(
        &mut self,
        oscillator: &OscillatorConfig,
        board: &BoardConfig,
        adc: &AdcConfig,
    ) -> Result<(), BoardError> {
        self.configure_oscillator(oscillator)?;
        self.configure_io(board)?;
        self.configure_adc(adc);
        Ok(())
    }

    /// Converter handle using the board's conversion budget
    pub fn adc(&mut self) -> Adc<'_, R> {
        Adc::new(&mut self.regs, self.timeouts.conversion)
    }

    /// Direct register access
    pub fn registers(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Give back the register file
    pub fn release(self) -> R {
        self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::Channel;
    use crate::config::Port;
    use crate::sim::{NoDelay, SimRegisters};
    use chrp4_hal::bits::adcon0::ADON;
    use chrp4_hal::bits::pin;

    fn bounded() -> Timeouts {
        Timeouts {
            pll_lock: PollBudget::Attempts(32),
            conversion: PollBudget::Attempts(32),
        }
    }

    fn snapshot(regs: &SimRegisters) -> [u8; Register::COUNT] {
        let mut values = [0; Register::COUNT];
        for reg in Register::ALL {
            values[reg.index()] = regs.peek(reg);
        }
        values
    }

    #[test]
    fn test_oscillator_waits_for_lock() {
        let mut board = Board::new(SimRegisters::new().with_pll_lock_after(5)).with_timeouts(bounded());

        board.configure_oscillator(&OscillatorConfig::USB_48MHZ).unwrap();

        let regs = board.release();
        assert_eq!(regs.peek(Register::Osccon), 0xFC);
        assert_eq!(regs.peek(Register::Actcon), 0x90);
        assert_eq!(regs.oscstat_reads(), 5);
    }

    #[test]
    fn test_oscillator_lock_timeout() {
        let mut board = Board::new(SimRegisters::new().with_pll_never_locking()).with_timeouts(bounded());

        assert_eq!(
            board.configure_oscillator(&OscillatorConfig::USB_48MHZ),
            Err(BoardError::PllLockTimeout)
        );
        assert_eq!(board.release().oscstat_reads(), 32);
    }

    #[test]
    fn test_oscillator_simulation_skips_wait() {
        let mut board = Board::new(SimRegisters::new().with_pll_never_locking());

        // Unbounded budget, so this would hang if it waited
        board
            .configure_oscillator(&OscillatorConfig::USB_48MHZ.for_simulation())
            .unwrap();

        let regs = board.release();
        assert_eq!(regs.peek(Register::Osccon), 0xFC);
        assert_eq!(regs.oscstat_reads(), 0);
    }

    #[test]
    fn test_io_directions() {
        let mut board = Board::new(SimRegisters::new());
        board.configure_io(&BoardConfig::chrp4()).unwrap();

        let regs = board.release();
        assert_eq!(regs.peek(Register::OptionReg), 0b0101_0111);
        assert_eq!(regs.peek(Register::Trisa), 0b0000_1111);
        assert_eq!(regs.peek(Register::Trisb), 0b1111_0000);
        assert_eq!(regs.peek(Register::Trisc), 0b0000_1100);
        assert_eq!(regs.peek(Register::Wpua), 0b0000_1000);
        assert_eq!(regs.peek(Register::Wpub), 0b1111_0000);
        for port in [Port::A, Port::B, Port::C] {
            assert_eq!(regs.peek(port.latch()), 0);
            assert_eq!(regs.peek(port.analog()), 0);
        }
    }

    #[test]
    fn test_io_latch_cleared_before_direction() {
        let mut board = Board::new(SimRegisters::new());
        board.configure_io(&BoardConfig::chrp4()).unwrap();

        let regs = board.release();
        for port in [Port::A, Port::B, Port::C] {
            let latch = regs.first_write(port.latch()).unwrap();
            let direction = regs.first_write(port.direction()).unwrap();
            assert!(latch < direction, "port {:?}", port);
        }
        // OPTION_REG goes first
        assert_eq!(regs.first_write(Register::OptionReg), Some(0));
    }

    #[test]
    fn test_io_idempotent() {
        let mut once = Board::new(SimRegisters::new());
        once.configure_io(&BoardConfig::chrp4()).unwrap();

        let mut twice = Board::new(SimRegisters::new());
        twice.configure_io(&BoardConfig::chrp4()).unwrap();
        twice.configure_io(&BoardConfig::chrp4()).unwrap();

        assert_eq!(snapshot(&once.release()), snapshot(&twice.release()));
    }

    #[test]
    fn test_io_sonar_variant() {
        let mut board = Board::new(SimRegisters::new());
        board.configure_io(&BoardConfig::chrp4_sonar()).unwrap();
        assert_eq!(board.release().peek(Register::Trisb), 0b1101_0000);
    }

    #[test]
    fn test_io_rejects_portc_pull_ups_before_writing() {
        let mut config = BoardConfig::chrp4();
        config.portc = config.portc.with_pull_ups(0b0000_0001);
        let mut board = Board::new(SimRegisters::new());

        assert_eq!(
            board.configure_io(&config),
            Err(BoardError::NoPullUpRegister(Port::C))
        );
        assert!(board.release().writes().is_empty());
    }

    #[test]
    fn test_adc_configured_and_off() {
        let mut board = Board::new(SimRegisters::new());
        board.configure_io(&BoardConfig::chrp4()).unwrap();
        board.configure_adc(&AdcConfig::CHRP4);

        let regs = board.release();
        assert_eq!(regs.peek(Register::Adcon0) & ADON, 0);
        assert_eq!(regs.peek(Register::Adcon0), 0b0001_1100);
        assert_eq!(regs.peek(Register::Adcon1), 0b0110_0000);
        assert_eq!(regs.peek(Register::Adcon2), 0);
        assert_eq!(regs.peek(Register::Latc), 0);
        for analog in [pin(2), pin(3)] {
            assert_ne!(regs.peek(Register::Trisc) & analog, 0);
            assert_ne!(regs.peek(Register::Anselc) & analog, 0);
        }
    }

    #[test]
    fn test_adc_keeps_other_portc_directions() {
        let mut regs = SimRegisters::new();
        regs.poke(Register::Trisc, 0b1000_0000);
        let mut board = Board::new(regs);

        board.configure_adc(&AdcConfig::CHRP4);

        assert_eq!(board.release().peek(Register::Trisc), 0b1000_1100);
    }

    #[test]
    fn test_boot_then_sample() {
        let mut regs = SimRegisters::new().with_pll_lock_after(3);
        regs.set_sample(Channel::Q1, 0x7F);
        regs.set_sample(Channel::Q2, 0x20);
        let mut board = Board::new(regs).with_timeouts(bounded());

        board
            .init(&OscillatorConfig::USB_48MHZ, &BoardConfig::chrp4(), &AdcConfig::CHRP4)
            .unwrap();

        let mut delay = NoDelay::default();
        assert_eq!(board.adc().read_channel(Channel::Q2, &mut delay), Ok(0x20));

        let mut adc = board.adc();
        adc.select(Channel::Q1);
        assert_eq!(adc.read(), Ok(0x7F));
        assert_eq!(adc.read(), Ok(0x7F));
        assert!(adc.is_powered());

        assert_eq!(board.registers().starts(), 3);
    }

    #[test]
    fn test_init_stops_on_lock_timeout() {
        let mut board = Board::new(SimRegisters::new().with_pll_never_locking()).with_timeouts(bounded());

        assert_eq!(
            board.init(&OscillatorConfig::USB_48MHZ, &BoardConfig::chrp4(), &AdcConfig::CHRP4),
            Err(BoardError::PllLockTimeout)
        );
        // Ports untouched
        assert_eq!(board.release().last_write(Register::Trisa), None);
    }
}
