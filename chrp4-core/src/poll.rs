//! Bounded polling of hardware status flags
//!
//! The chip never signals failure; a flag simply stays put. A
//! [`PollBudget`] bounds how long a caller is willing to spin on it.

/// How many times a status flag may be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollBudget {
    /// Spin until the flag changes, however long that takes
    #[default]
    Unbounded,
    /// Give up after this many checks (0 gives up immediately)
    Attempts(u32),
}

/// Poll budget ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout;

/// Spin until `done` returns true
///
/// Returns the number of checks made, including the successful one.
pub fn poll_until<F>(budget: PollBudget, mut done: F) -> Result<u32, Timeout>
where
    F: FnMut() -> bool,
{
    let mut checks: u32 = 0;
    loop {
        if let PollBudget::Attempts(max) = budget {
            if checks >= max {
                return Err(Timeout);
            }
        }
        checks = checks.saturating_add(1);
        if done() {
            return Ok(checks);
        }
    }
}
