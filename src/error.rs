//! Error types shared by the store, the collaborators and the sync controller.

use core::fmt;

/// Result type for configuration operations
pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors
///
/// None of these are fatal. Callers skip the affected pad or render the
/// affected control as inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pad has no known configuration or dropped off mid-operation
    NotConnected,
    /// A slider resolved to an empty set of sensors
    InvalidGroup,
    /// A panel index outside `0..PANEL_COUNT`
    InvalidPanel,
    /// A legacy `0xFF` threshold was read where a numeric value was expected
    MalformedLegacyThreshold,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => f.write_str("pad not connected"),
            Self::InvalidGroup => f.write_str("slider controls no sensors"),
            Self::InvalidPanel => f.write_str("no such panel"),
            Self::MalformedLegacyThreshold => f.write_str("threshold is disabled"),
        }
    }
}
