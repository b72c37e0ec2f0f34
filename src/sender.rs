//! Route selection and dispatch.
//!
//! The route is picked once, before anything is sent: the typed client when it is
//! compiled in, the raw HTTP fallback otherwise. A failure on the chosen route is
//! final; nothing is retried and the other route is never tried afterwards.

use std::fmt;
#[cfg(feature = "sdk")]
use std::sync::Arc;

#[cfg(feature = "sdk")]
use tracing::debug;
use tracing::{info, warn};

use crate::domain::{DeliveryResult, MessageRequest};
use crate::error::SendError;
use crate::fallback::HttpFallback;
use crate::http::BoxFuture;
#[cfg(feature = "sdk")]
use crate::http::{HttpTransport, ReqwestTransport};

/// Whether the typed Twilio client was compiled into this build.
pub fn sdk_available() -> bool {
    cfg!(feature = "sdk")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Typed Twilio client.
    Client,
    /// Raw HTTP POST to the REST endpoint.
    Http,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => f.write_str("Twilio client"),
            Self::Http => f.write_str("HTTP API"),
        }
    }
}

/// What a successful send produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Normalized sid / status from the typed client.
    Client(DeliveryResult),
    /// Twilio's response body, as returned by the fallback.
    Http(serde_json::Value),
}

impl Delivery {
    pub fn route(&self) -> Route {
        match self {
            Self::Client(_) => Route::Client,
            Self::Http(_) => Route::Http,
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(result) => write!(f, "{result}"),
            Self::Http(body) => write!(f, "{body:#}"),
        }
    }
}

/// A send that failed on the route it was dispatched to.
#[derive(Debug, thiserror::Error)]
#[error("failed to send via {route}: {source}")]
pub struct SendFailure {
    pub route: Route,
    #[source]
    pub source: SendError,
}

/// One way of delivering a [`MessageRequest`].
pub trait MessageTransport: Send + Sync {
    fn route(&self) -> Route;

    fn send<'a>(
        &'a self,
        request: &'a MessageRequest,
    ) -> BoxFuture<'a, Result<Delivery, SendError>>;
}

#[cfg(feature = "sdk")]
/// Sends through [`crate::client::TwilioClient`], built per request from its credentials.
pub struct ClientTransport {
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

#[cfg(feature = "sdk")]
impl ClientTransport {
    pub fn new() -> Result<Self, SendError> {
        let transport =
            ReqwestTransport::new(None, None).map_err(|err| SendError::Transport(Box::new(err)))?;
        Ok(Self {
            api_base: crate::endpoint::DEFAULT_API_BASE.to_owned(),
            http: Arc::new(transport),
        })
    }
}

#[cfg(feature = "sdk")]
impl MessageTransport for ClientTransport {
    fn route(&self) -> Route {
        Route::Client
    }

    fn send<'a>(
        &'a self,
        request: &'a MessageRequest,
    ) -> BoxFuture<'a, Result<Delivery, SendError>> {
        Box::pin(async move {
            let client = crate::client::TwilioClient::from_parts(
                request.credentials().clone(),
                self.api_base.as_str(),
                Arc::clone(&self.http),
            );
            let resource = client.create_message(request.message()).await?;
            if resource.status.is_failure() {
                warn!(
                    sid = %resource.sid,
                    status = %resource.status,
                    error_code = ?resource.error_code,
                    error_message = ?resource.error_message,
                    "Twilio accepted the request but reports the message as failed"
                );
            } else {
                debug!(sid = %resource.sid, segments = ?resource.num_segments, "message created");
            }
            Ok(Delivery::Client(resource.into()))
        })
    }
}

impl MessageTransport for HttpFallback {
    fn route(&self) -> Route {
        Route::Http
    }

    fn send<'a>(
        &'a self,
        request: &'a MessageRequest,
    ) -> BoxFuture<'a, Result<Delivery, SendError>> {
        Box::pin(async move { HttpFallback::send(self, request).await.map(Delivery::Http) })
    }
}

/// Dispatches a message on the single route chosen at construction.
pub struct Sender {
    transport: Box<dyn MessageTransport>,
}

impl Sender {
    /// Use `primary` when there is one; only otherwise build the fallback.
    pub fn select<F>(
        primary: Option<Box<dyn MessageTransport>>,
        fallback: F,
    ) -> Result<Self, SendError>
    where
        F: FnOnce() -> Result<Box<dyn MessageTransport>, SendError>,
    {
        let transport = match primary {
            Some(primary) => primary,
            None => {
                warn!("Twilio client not available; falling back to direct HTTP");
                fallback()?
            }
        };
        info!(route = %transport.route(), "route selected");
        Ok(Self { transport })
    }

    /// Check once whether the typed client is available and pick the route.
    ///
    /// A failure to construct the typed client is returned as is; it does not select
    /// the fallback.
    pub fn detect() -> Result<Self, SendError> {
        Self::select(primary_transport()?, || {
            Ok(Box::new(HttpFallback::new()?) as Box<dyn MessageTransport>)
        })
    }

    pub fn route(&self) -> Route {
        self.transport.route()
    }

    pub async fn send(&self, request: &MessageRequest) -> Result<Delivery, SendFailure> {
        self.transport
            .send(request)
            .await
            .map_err(|source| SendFailure {
                route: self.transport.route(),
                source,
            })
    }
}

#[cfg(feature = "sdk")]
fn primary_transport() -> Result<Option<Box<dyn MessageTransport>>, SendError> {
    Ok(Some(Box::new(ClientTransport::new()?)))
}

#[cfg(not(feature = "sdk"))]
fn primary_transport() -> Result<Option<Box<dyn MessageTransport>>, SendError> {
    Ok(None)
}
