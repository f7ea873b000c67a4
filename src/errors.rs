//! Error types for the provisioner.
//!
//! AWS faults are classified from typed `SdkError` variant matching — no
//! string parsing of debug output. Outer transport variants (dispatch
//! failures, timeouts) are mapped before service error codes.

use aws_sdk_dynamodb::error::{BuildError, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Faults surfaced by provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("table '{table}' not found in {region}")]
    TableNotFound { table: String, region: String },

    #[error("table '{table}' already exists in {region}")]
    TableInUse { table: String, region: String },

    #[error("access denied: {message}")]
    AccessDenied { message: String },

    #[error("invalid or missing AWS credentials: {message}")]
    Credentials { message: String },

    #[error("request rate too high: {message}")]
    Throttled { message: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("connection to DynamoDB failed: {message}")]
    Connection { message: String },

    /// The poll budget ran out before the table reached the active state.
    #[error("table '{table}' in {region} still not active after {attempts} describe attempts")]
    NotActive {
        table: String,
        region: String,
        attempts: u32,
    },

    #[error("malformed provisioning event: {message}")]
    Serialization { message: String },

    #[error("response delivery failed: {message}")]
    Response { message: String },

    #[error("unexpected DynamoDB error: {message}")]
    Unexpected { message: String },
}

impl ProvisionError {
    /// Whether this fault means the table does not exist.
    ///
    /// Drives the create-vs-exists branch for the origin table and the
    /// "already absent" case on the delete path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProvisionError::TableNotFound { .. })
    }
}

impl From<BuildError> for ProvisionError {
    fn from(err: BuildError) -> Self {
        ProvisionError::Validation {
            message: err.to_string(),
        }
    }
}

/// Map non-service `SdkError` variants (dispatch failures, timeouts, etc.).
///
/// Returns `Some` for non-service errors, `None` for `ServiceError`.
fn map_outer_sdk_error<E, R>(err: &SdkError<E, R>) -> Option<ProvisionError>
where
    E: std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(dispatch) => {
            let message = if dispatch.is_timeout() {
                "request timed out. Check your network or endpoint.".to_string()
            } else if dispatch.is_io() {
                "I/O error. Check if the endpoint is reachable.".to_string()
            } else {
                "dispatch failed. Check if the endpoint is reachable.".to_string()
            };
            Some(ProvisionError::Connection { message })
        }
        SdkError::TimeoutError(_) => Some(ProvisionError::Connection {
            message: "request timed out. Check your network or endpoint.".to_string(),
        }),
        SdkError::ConstructionFailure(err) => {
            let msg = format!("{:?}", err);
            if msg.contains("credentials")
                || msg.contains("Credentials")
                || msg.contains("NoCredentialsError")
            {
                Some(ProvisionError::Credentials {
                    message: "no AWS credentials found. Configure credentials via environment \
                        variables, AWS profile, or IAM role."
                        .to_string(),
                })
            } else {
                Some(ProvisionError::Unexpected {
                    message: format!("failed to build request: {}", msg),
                })
            }
        }
        SdkError::ResponseError(err) => Some(ProvisionError::Unexpected {
            message: format!("invalid response from DynamoDB: {:?}", err),
        }),
        SdkError::ServiceError(_) => None,
        _ => Some(ProvisionError::Unexpected {
            message: format!("unknown error from DynamoDB: {:?}", err),
        }),
    }
}

/// Map service error codes shared across DynamoDB operations.
///
/// Returns `Some` if matched, `None` if the code needs table-specific handling.
fn map_common_service_code(code: Option<&str>, message: Option<&str>) -> Option<ProvisionError> {
    let code = code?;

    match code {
        "UnrecognizedClientException" => Some(ProvisionError::Credentials {
            message: "invalid AWS credentials. Check your access key and secret.".to_string(),
        }),
        "InvalidAccessKeyId" => Some(ProvisionError::Credentials {
            message: "invalid AWS access key ID. Check your credentials.".to_string(),
        }),
        "SignatureDoesNotMatch" => Some(ProvisionError::Credentials {
            message: "AWS signature mismatch. Check your secret access key.".to_string(),
        }),
        "ExpiredTokenException" | "ExpiredToken" => Some(ProvisionError::Credentials {
            message: "AWS credentials have expired. Refresh your session token.".to_string(),
        }),
        "AccessDeniedException" | "AccessDenied" => Some(ProvisionError::AccessDenied {
            message: message.unwrap_or("check your IAM permissions.").to_string(),
        }),
        "ProvisionedThroughputExceededException"
        | "LimitExceededException"
        | "RequestLimitExceeded"
        | "Throttling"
        | "ThrottlingException" => Some(ProvisionError::Throttled {
            message: "request rate too high. Try again with exponential backoff.".to_string(),
        }),
        _ => None,
    }
}

/// Map a DynamoDB service error code + message for a known table and region.
fn map_table_code(
    code: Option<&str>,
    message: Option<&str>,
    display: &str,
    table: &str,
    region: &str,
) -> ProvisionError {
    // Check common cross-operation errors first
    if let Some(err) = map_common_service_code(code, message) {
        return err;
    }

    match code {
        Some("ResourceNotFoundException") => ProvisionError::TableNotFound {
            table: table.to_string(),
            region: region.to_string(),
        },
        Some("ResourceInUseException") => ProvisionError::TableInUse {
            table: table.to_string(),
            region: region.to_string(),
        },
        Some("ValidationException") => ProvisionError::Validation {
            message: message.unwrap_or(display).to_string(),
        },
        _ => ProvisionError::Unexpected {
            message: message.unwrap_or(display).to_string(),
        },
    }
}

/// Map a DynamoDB `SdkError` using typed variants.
///
/// For `ServiceError`, uses `ProvideErrorMetadata` to get the error code and
/// message instead of parsing debug strings.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, table: &str, region: &str) -> ProvisionError
where
    E: ProvideErrorMetadata + std::fmt::Debug + std::fmt::Display,
    R: std::fmt::Debug,
{
    // Check outer SdkError variants first (dispatch, timeout, etc.)
    if let Some(mapped) = map_outer_sdk_error(&err) {
        return mapped;
    }

    // It's a ServiceError — use typed metadata
    if let Some(service_err) = err.as_service_error() {
        let meta = ProvideErrorMetadata::meta(service_err);
        let code = meta.code();
        let message = meta.message();
        let display = service_err.to_string();
        return map_table_code(code, message, &display, table, region);
    }

    // Should not reach here (map_outer_sdk_error handles all non-service variants)
    ProvisionError::Unexpected {
        message: format!("unexpected DynamoDB error: {:?}", err),
    }
}
