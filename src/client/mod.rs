//! Client layer: typed Twilio Messages client.
//!
//! Compiled only with the `sdk` feature. When it is absent, [`crate::sender::Sender`]
//! routes every message through [`crate::fallback::HttpFallback`] instead.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Credentials, MessageResource, OutboundMessage};
use crate::endpoint::{DEFAULT_API_BASE, messages_url};
use crate::error::SendError;
use crate::http::{HttpResponse, HttpTransport, ReqwestTransport};

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base URL, timeout, or user-agent.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the REST API base (`https://api.twilio.com/2010-04-01`).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, SendError> {
        let transport = ReqwestTransport::new(self.timeout, self.user_agent.as_deref())
            .map_err(|err| SendError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            credentials: self.credentials,
            api_base: self.api_base,
            http: Arc::new(transport),
        })
    }
}

#[derive(Clone)]
/// High-level Twilio Messages client.
///
/// Creates messages with `POST {api_base}/Accounts/{sid}/Messages.json` and decodes the
/// returned Message resource. Twilio error bodies are surfaced as [`SendError::Api`].
pub struct TwilioClient {
    credentials: Credentials,
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default API base.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, SendError> {
        TwilioClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    /// Assemble a client around an existing HTTP transport.
    pub(crate) fn from_parts(
        credentials: Credentials,
        api_base: impl Into<String>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            credentials,
            api_base: api_base.into(),
            http,
        }
    }

    /// Create (send) a message.
    ///
    /// Errors:
    /// - [`SendError::Api`] when Twilio answers non-2xx with its JSON error body,
    /// - [`SendError::HttpStatus`] for any other non-2xx response,
    /// - [`SendError::Parse`] when a 2xx body is not a Message resource.
    pub async fn create_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<MessageResource, SendError> {
        let url = messages_url(&self.api_base, &self.credentials.account_sid)?;
        let params = crate::transport::encode_message_form(message);
        debug!(%url, to = %message.to(), "creating message");

        let response = self
            .http
            .post_form(&url, &self.credentials, params)
            .await
            .map_err(SendError::Transport)?;

        if !response.is_success() {
            return Err(map_error_response(response));
        }

        crate::transport::decode_message_json_response(&response.body)
            .map_err(|err| SendError::Parse(Box::new(err)))
    }
}

fn map_error_response(response: HttpResponse) -> SendError {
    match crate::transport::decode_api_error(&response.body) {
        Some(api) => SendError::Api {
            status: api.status.unwrap_or(response.status),
            code: api.code,
            message: api.message,
            more_info: api.more_info,
        },
        None => SendError::HttpStatus {
            status: response.status,
            body: response.into_detail(),
        },
    }
}
