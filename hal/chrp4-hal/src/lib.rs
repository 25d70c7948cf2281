//! CHRP4 Hardware Abstraction Layer
//!
//! This crate defines the narrow capability the board code needs from the
//! hardware: reading and writing 8-bit special function registers by
//! symbolic name. The chip crate maps names to addresses and performs
//! volatile accesses; tests use an in-memory register file instead.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board logic (chrp4-core)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chrp4-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chrp4-hal-   │       │ SimRegisters  │
//! │    pic16      │       │  (tests)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`access::RegisterFile`] - 8-bit register read/write

#![no_std]
#![deny(unsafe_code)]

pub mod access;
pub mod bits;
pub mod register;

// Re-export key items at crate root for convenience
pub use access::RegisterFile;
pub use register::Register;
