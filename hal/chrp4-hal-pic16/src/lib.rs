//! PIC16F1459-specific HAL for CHRP4 board support
//!
//! This crate provides the deployment side of the `chrp4-hal` traits:
//!
//! - Banked SFR addresses for every named register
//! - Volatile memory-mapped register access
//! - A busy-loop delay calibrated from the oscillator frequency
//!
//! # Usage
//!
//! ```ignore
//! let regs = unsafe { Mmio::steal() };
//! let mut delay = SpinDelay::new(FOSC_HZ);
//! ```

#![no_std]

pub mod address;
pub mod delay;
pub mod mmio;

pub use delay::{SpinDelay, FOSC_HZ};
pub use mmio::Mmio;

// Re-export shared types from chrp4-hal
pub use chrp4_hal::{Register, RegisterFile};
