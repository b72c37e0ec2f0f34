//! Direct HTTP route: a raw Basic-auth form POST to the Messages endpoint.
//!
//! Used when the typed client is not compiled in. The response JSON is returned as
//! Twilio sent it, without mapping it onto domain types.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::MessageRequest;
use crate::endpoint::{DEFAULT_API_BASE, messages_url};
use crate::error::SendError;
use crate::http::{HttpTransport, ReqwestTransport};

/// Ceiling on the whole fallback request, connect included.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct HttpFallback {
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl HttpFallback {
    /// Fallback against the public Twilio API with the fixed [`FALLBACK_TIMEOUT`].
    pub fn new() -> Result<Self, SendError> {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Same as [`HttpFallback::new`] against another API base (e.g. a local mock).
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self, SendError> {
        let transport = ReqwestTransport::new(Some(FALLBACK_TIMEOUT), None)
            .map_err(|err| SendError::Transport(Box::new(err)))?;
        Ok(Self {
            api_base: api_base.into(),
            http: Arc::new(transport),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_transport(http: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            http,
        }
    }

    /// Send the message and return Twilio's JSON response body.
    ///
    /// Any non-2xx status is an error carrying the response body; nothing is retried.
    pub async fn send(&self, request: &MessageRequest) -> Result<serde_json::Value, SendError> {
        let credentials = request.credentials();
        let url = messages_url(&self.api_base, &credentials.account_sid)?;
        let params = crate::transport::encode_message_form(request.message());
        debug!(%url, "posting message directly");

        let response = self
            .http
            .post_form(&url, credentials, params)
            .await
            .map_err(SendError::Transport)?;

        if !response.is_success() {
            return Err(SendError::HttpStatus {
                status: response.status,
                body: response.into_detail(),
            });
        }

        serde_json::from_str(&response.body).map_err(|err| SendError::Parse(Box::new(err)))
    }
}
