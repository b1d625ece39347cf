//! Errors returned by the table store.

use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the remote table store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Credentials missing or malformed; raised when the client is built.
    #[error("invalid storage configuration: {0}")]
    Config(String),

    /// The request never produced a response.
    #[error("storage request failed: {0}")]
    Transport(#[from] wreq::Error),

    /// The rows could not be serialized into the request body.
    #[error("failed to encode rows: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing the table handle or remediation guidance to the output failed.
    #[error("failed to write storage output: {0}")]
    Output(#[from] std::io::Error),

    /// The REST endpoint answered with an error status.
    #[error("{message} (status {status}{})", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(", code {}", c)).unwrap_or_default()
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl StorageError {
    /// Builds an [`StorageError::Api`] from a response status and raw body.
    ///
    /// Bodies that are not PostgREST JSON are kept verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

        let message = match parsed.message {
            Some(message) => message,
            None if body.trim().is_empty() => format!("HTTP {}", status),
            None => body.trim().to_string(),
        };

        StorageError::Api {
            status,
            code: parsed.code,
            message,
            details: parsed.details,
            hint: parsed.hint,
        }
    }

    /// PostgreSQL error code, when the server supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            StorageError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
