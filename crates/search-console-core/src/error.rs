/// Failure modes of the search console core.
///
/// Configuration and wiring errors (`InvalidConfiguration`,
/// `StoreNotInitialized`, `StoreAlreadyMounted`) are fatal and must halt
/// startup. `FetchFailure` is recovered inside the debug panel: it is
/// logged and never reaches the shared store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// The configured search source name matches no known source.
    #[error("Invalid search source: {value:?}. Expected one of: ailab, azure, static (alias: simulated).")]
    InvalidConfiguration {
        /// The offending value, exactly as supplied.
        value: String,
    },

    /// The data store was read or written outside its mounted lifetime.
    #[error("Search state store is not initialized. Mount a DataProvider before using it.")]
    StoreNotInitialized,

    /// A second mount was attempted while a store is still mounted.
    #[error("Search state store is already mounted. Unmount it before mounting again.")]
    StoreAlreadyMounted,

    /// The name-listing collaborator failed.
    #[error("Failed to fetch filenames: {message}")]
    FetchFailure {
        /// Rendered cause from the collaborator.
        message: String,
    },
}

impl ConsoleError {
    /// Wraps any displayable collaborator error as a [`ConsoleError::FetchFailure`].
    pub fn fetch_failure(err: impl std::fmt::Display) -> Self {
        Self::FetchFailure {
            message: format!("{:#}", err),
        }
    }

    /// Whether this error must abort application startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FetchFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message_carries_value() {
        let err = ConsoleError::InvalidConfiguration {
            value: "bogus".to_string(),
        };
        assert!(err.to_string().contains("\"bogus\""));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_fetch_failure_is_recoverable() {
        let err = ConsoleError::fetch_failure("connection refused");
        assert_eq!(
            err,
            ConsoleError::FetchFailure {
                message: "connection refused".to_string()
            }
        );
        assert!(!err.is_fatal());
    }
}
