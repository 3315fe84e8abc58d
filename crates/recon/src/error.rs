use std::fmt;

#[derive(Debug)]
pub enum ValidatorError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty table, bad multiplier, etc.).
    ConfigValidation(String),
    /// Validation request could not be decoded.
    InputParse(String),
    /// Result or config could not be serialized.
    Serialize(String),
}

impl fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InputParse(msg) => write!(f, "invalid validation request: {msg}"),
            Self::Serialize(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ValidatorError {}
