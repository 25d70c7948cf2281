//! Configuration types
//!
//! Typed settings for the oscillator, the digital ports and the ADC. Each
//! type encodes to the register bytes the bring-up code writes, so the
//! board defaults below are checked against the datasheet values in tests.

pub mod adc;
pub mod oscillator;
pub mod ports;

pub use adc::{AdcConfig, AutoTrigger, ConversionClock, Justification, VoltageReference};
pub use oscillator::{InternalFrequency, OscillatorConfig, PllMultiplier, TuningSource};
pub use ports::{BoardConfig, OptionConfig, Port, PortConfig, Prescaler, Tmr0Source};
