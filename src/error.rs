use std::fmt;

/// Errors raised while building a game configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Tuning document is not valid JSON for `Tuning`
    Parse(serde_json::Error),

    /// A value parsed but is outside its allowed range
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// Alpha buffer length doesn't match the mask dimensions
    MaskSize { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => {
                write!(f, "Invalid tuning document: {}", err)
            }
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid value for {}: {}", field, reason)
            }
            ConfigError::MaskSize { expected, actual } => {
                write!(f, "Mask buffer has {} pixels, expected {}", actual, expected)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error)
    }
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
