use std::error::Error as StdError;

use crate::endpoint::EndpointError;

/// Twilio error code for "Authentication Error - invalid username".
const AUTHENTICATION_ERROR_CODE: i64 = 20003;

#[derive(Debug, thiserror::Error)]
/// Errors returned while delivering a message, by either route.
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - Twilio API failures decoded from the error body,
/// - endpoint and parse failures.
pub enum SendError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio rejected the request with a structured error body.
    #[error("Twilio API error (HTTP {status}{}): {message}", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
        more_info: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The Messages endpoint URL could not be built.
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),
}

impl SendError {
    /// Whether Twilio rejected the credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status == 401,
            Self::Api { status, code, .. } => {
                *status == 401 || *code == Some(AUTHENTICATION_ERROR_CODE)
            }
            _ => false,
        }
    }

    /// Extra detail worth showing next to the error message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => body.as_deref(),
            Self::Api { more_info, .. } => more_info.as_deref(),
            _ => None,
        }
    }
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|code| format!(", code {code}")).unwrap_or_default()
}
