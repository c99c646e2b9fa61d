//! Error types for lamp control

use crate::lighting::FixtureSlot;
use std::fmt;

/// Errors raised while interpreting lamp inputs or configuration.
///
/// None of these are fatal at runtime. Command handlers log them and keep the
/// previous state.
#[derive(Debug, Clone, PartialEq)]
pub enum LampError {
    /// An update arrived for a slot whose fixture is not bound yet
    UnboundSlot(FixtureSlot),
    /// A mode label that names neither operating mode
    UnknownMode(String),
    /// A color string that is not `#RRGGBB`
    InvalidColor(String),
    /// A temperature stop table that breaks its ordering rules
    InvalidScale(String),
}

impl fmt::Display for LampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LampError::UnboundSlot(slot) => write!(f, "Fixture slot {slot} is not bound"),
            LampError::UnknownMode(label) => write!(f, "Unknown operating mode: {label}"),
            LampError::InvalidColor(text) => write!(f, "Invalid color: {text}"),
            LampError::InvalidScale(reason) => write!(f, "Invalid temperature scale: {reason}"),
        }
    }
}

impl std::error::Error for LampError {}
