//! Crate-level error types.

use std::fmt;

use crate::sinks::SinkTarget;

/// Errors produced by the sortviz crate.
#[derive(Debug)]
pub enum VisualizerError {
    /// A tween or snap targeted a sink the rendering layer never registered.
    MissingSink(SinkTarget),
    /// A run is already in flight; shuffle and sort are refused until it
    /// settles.
    AlreadyRunning,
    /// The permutation source returned something other than `1..=size`.
    InvalidPermutation(String),
    /// Options failed validation.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// A tone could not be played. Never fatal; only ever logged.
    Tone(String),
}

impl fmt::Display for VisualizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSink(target) => {
                write!(f, "no sink registered for {target}")
            }
            Self::AlreadyRunning => write!(f, "a sort is already running"),
            Self::InvalidPermutation(msg) => {
                write!(f, "invalid permutation: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Tone(msg) => write!(f, "tone error: {msg}"),
        }
    }
}

impl std::error::Error for VisualizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VisualizerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::Cursor;

    #[test]
    fn missing_sink_names_the_target() {
        let err = VisualizerError::MissingSink(SinkTarget::Cursor(Cursor::J));
        assert_eq!(err.to_string(), "no sink registered for cursor j");
    }

    #[test]
    fn io_error_is_the_source() {
        let err: VisualizerError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&VisualizerError::AlreadyRunning)
            .is_none());
    }
}
