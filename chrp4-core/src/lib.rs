//! Board-level logic for the CHRP4 development board
//!
//! This crate contains everything that only needs a register file to work:
//!
//! - Typed configuration that encodes to the exact register bytes
//! - Oscillator, on-board I/O and ADC bring-up
//! - ADC channel selection and conversions
//! - Bounded polling for hardware status flags
//! - An in-memory register model for host tests (`sim` feature)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod adc;
pub mod board;
pub mod config;
pub mod error;
pub mod poll;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use adc::{Adc, Channel};
pub use board::{Board, Timeouts};
pub use error::BoardError;
pub use poll::PollBudget;
