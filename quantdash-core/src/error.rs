use thiserror::Error;

/// Unified error type for the quantdash workspace.
///
/// This wraps capability mismatches, argument validation errors, connector-tagged
/// failures, not-found conditions, and an aggregate for multi-provider attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashError {
    /// The requested capability is not implemented by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "option-chain").
        capability: &'static str,
    },

    /// Issues with the returned or expected data (malformed payloads, missing fields).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for AAPL".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<DashError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "history", "info").
        capability: &'static str,
    },

    /// All attempted providers timed out for the requested capability.
    #[error("all providers timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label that timed out across all providers.
        capability: &'static str,
    },
}

impl DashError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: &'static str) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability,
        }
    }

    /// True when the error (or every error it aggregates) means "no such data".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::AllProvidersFailed(errs) => {
                !errs.is_empty() && errs.iter().all(Self::is_not_found)
            }
            _ => false,
        }
    }

    /// True for per-provider and aggregate timeouts.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ProviderTimeout { .. } | Self::AllProvidersTimedOut { .. }
        )
    }

    /// Short, stable kind label used in logs and on the error page.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unsupported { .. } => "unsupported",
            Self::Data(_) => "data",
            Self::InvalidArg(_) => "invalid-argument",
            Self::Connector { .. } => "connector",
            Self::Other(_) => "other",
            Self::NotFound { .. } => "not-found",
            Self::AllProvidersFailed(_) => "all-providers-failed",
            Self::ProviderTimeout { .. } => "provider-timeout",
            Self::AllProvidersTimedOut { .. } => "all-providers-timed-out",
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<chrono::ParseError> for DashError {
    fn from(err: chrono::ParseError) -> Self {
        Self::InvalidArg(err.to_string())
    }
}
