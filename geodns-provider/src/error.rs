use serde::{Deserialize, Serialize};

use crate::credentials::CredentialValidationError;

/// Unified error type for all geo record operations.
///
/// Each variant includes a `provider` field identifying which backend produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Fatal Errors
///
/// [`ContractViolation`](Self::ContractViolation) means a backend handed the grouping
/// engine data it cannot interpret. The listing call that hit it stops; nothing is
/// skipped or retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The zone passed to a query operation does not exist.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone name that was not found.
        zone: String,
    },

    /// A required parameter is missing, empty, or malformed.
    InvalidArgument {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A native record could not be normalized (e.g. it belongs to no geo group).
    ContractViolation {
        /// Provider that produced the error.
        provider: String,
        /// Details about the offending record.
        detail: String,
    },

    /// The positional rdata layout of this record type is unknown.
    UnsupportedRecordType {
        /// Provider that produced the error.
        provider: String,
        /// The unsupported record type string.
        record_type: String,
    },

    /// A backend collaborator (record source, territory loader) failed.
    Backend {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ZoneNotFound { .. }
                | Self::InvalidArgument { .. }
                | Self::UnsupportedRecordType { .. }
        )
    }

    /// Shorthand for an [`InvalidArgument`](Self::InvalidArgument) error.
    pub(crate) fn invalid_argument(
        provider: &str,
        param: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            provider: provider.to_string(),
            param: param.into(),
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`ContractViolation`](Self::ContractViolation) error.
    pub(crate) fn contract_violation(provider: &str, detail: impl Into<String>) -> Self {
        Self::ContractViolation {
            provider: provider.to_string(),
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`ZoneNotFound`](Self::ZoneNotFound) error.
    pub(crate) fn zone_not_found(provider: &str, zone: &str) -> Self {
        Self::ZoneNotFound {
            provider: provider.to_string(),
            zone: zone.to_string(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZoneNotFound { provider, zone } => {
                write!(f, "[{provider}] zone {zone} not found")
            }
            Self::InvalidArgument {
                provider,
                param,
                detail,
            } => {
                if param == "credentials" {
                    write!(f, "[{provider}] {detail}")
                } else {
                    write!(f, "[{provider}] Invalid argument '{param}': {detail}")
                }
            }
            Self::ContractViolation { provider, detail } => {
                write!(f, "[{provider}] Contract violation: {detail}")
            }
            Self::UnsupportedRecordType {
                provider,
                record_type,
            } => {
                write!(f, "[{provider}] Unsupported record type: {record_type}")
            }
            Self::Backend { provider, detail } => {
                write!(f, "[{provider}] Backend error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    /// Wrap a credential validation failure raised while creating `provider`.
    pub(crate) fn from_credentials(provider: &str, err: &CredentialValidationError) -> Self {
        Self::invalid_argument(provider, "credentials", err.to_string())
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
