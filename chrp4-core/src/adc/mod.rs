//! ADC channel selection and conversions

pub mod channel;
pub mod converter;

pub use channel::Channel;
pub use converter::{Adc, SETTLE_TIME_US};
