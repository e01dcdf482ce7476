use vehctl::ConfigError;

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
    NoRtlSimulator { reset_sync_depth: u8 },
    ExpectationsFailed { failures: usize },
    FidelityMismatch { mismatches: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "Invalid stimulus script: {}", e),
            Error::Config(e) => write!(f, "Invalid configuration: {}", e),
            Error::NoRtlSimulator { reset_sync_depth } => write!(
                f,
                "No RTL simulator was generated for reset synchronizer depth {}. Available depths: {:?}.",
                reset_sync_depth,
                crate::RTL_RESET_SYNC_DEPTHS
            ),
            Error::ExpectationsFailed { failures } => {
                write!(f, "{} expectation(s) failed.", failures)
            }
            Error::FidelityMismatch { mismatches } => write!(
                f,
                "Behavioral and RTL outputs differed on {} cycle(s).",
                mismatches
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Error {
        Error::Config(error)
    }
}
