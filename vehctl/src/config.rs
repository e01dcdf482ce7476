use std::error::Error;
use std::fmt;

/// Reset synchronizer depth used by [`Config::default`].
pub const DEFAULT_RESET_SYNC_DEPTH: u8 = 4;
/// Smallest supported reset synchronizer depth.
pub const MIN_RESET_SYNC_DEPTH: u8 = 4;
/// Largest supported reset synchronizer depth.
pub const MAX_RESET_SYNC_DEPTH: u8 = 15;

/// Build-time parameters shared by both controller fidelities.
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let config = Config {
///     reset_sync_depth: 8,
/// };
/// assert!(config.validate().is_ok());
///
/// let config = Config {
///     reset_sync_depth: 0,
/// };
/// assert_eq!(
///     config.validate(),
///     Err(ConfigError::ResetSyncDepthOutOfRange { depth: 0 })
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Number of clock edges the internal reset stays asserted after the raw reset is released.
    pub reset_sync_depth: u8,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RESET_SYNC_DEPTH..=MAX_RESET_SYNC_DEPTH).contains(&self.reset_sync_depth) {
            return Err(ConfigError::ResetSyncDepthOutOfRange {
                depth: self.reset_sync_depth,
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reset_sync_depth: DEFAULT_RESET_SYNC_DEPTH,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    ResetSyncDepthOutOfRange { depth: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ResetSyncDepthOutOfRange { depth } => write!(
                f,
                "Reset synchronizer depth {} is out of range. The depth must be in the range [{}, {}].",
                depth, MIN_RESET_SYNC_DEPTH, MAX_RESET_SYNC_DEPTH
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().reset_sync_depth, 4);
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn depth_bounds() {
        for depth in MIN_RESET_SYNC_DEPTH..=MAX_RESET_SYNC_DEPTH {
            assert!(Config {
                reset_sync_depth: depth
            }
            .validate()
            .is_ok());
        }

        let err = Config {
            reset_sync_depth: 16,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Reset synchronizer depth 16 is out of range. The depth must be in the range [4, 15]."
        );
    }

    #[test]
    fn shallow_depths_rejected() {
        for depth in 0..MIN_RESET_SYNC_DEPTH {
            assert_eq!(
                Config {
                    reset_sync_depth: depth
                }
                .validate(),
                Err(ConfigError::ResetSyncDepthOutOfRange { depth })
            );
        }

        let err = Config {
            reset_sync_depth: 1,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Reset synchronizer depth 1 is out of range. The depth must be in the range [4, 15]."
        );
    }
}
