//! Kernel-level errors
//!
//! Domain crates define their own error enums; `CoreError` covers what the
//! kernel itself can reject: malformed amounts, unusable dates, and settings
//! that fail to parse at startup.

use thiserror::Error;

use crate::money::MoneyError;
use crate::temporal::TemporalError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    Money(#[from] MoneyError),

    #[error("Invalid date or deadline: {0}")]
    Temporal(#[from] TemporalError),

    /// A setting was present but unusable; the message names the setting
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, CoreError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{Deadline, Timezone};

    #[test]
    fn test_temporal_errors_convert() {
        let tz: Timezone = "America/Sao_Paulo".parse().unwrap();
        let err: CoreError = Deadline::parse_local("not a date", tz).unwrap_err().into();
        assert!(matches!(err, CoreError::Temporal(TemporalError::InvalidDateTime { .. })));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_message_names_the_setting() {
        let err = CoreError::configuration("timezone: Mars/Olympus");
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Configuration error: timezone: Mars/Olympus");
    }
}
