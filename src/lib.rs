//! Send a single SMS through the Twilio Messages API.
//!
//! The crate follows a layered design: a domain layer of strong types, a transport
//! layer for Twilio's wire format, a typed client (the `sdk` feature), a raw HTTP
//! fallback, and a sender that picks exactly one of the two routes per run.
//!
//! ```rust,no_run
//! use twilio_sms::config::{CliOverrides, resolve_from_env};
//! use twilio_sms::Sender;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = resolve_from_env(CliOverrides {
//!         to: "+14155552671".to_owned(),
//!         body: "hello".to_owned(),
//!         ..Default::default()
//!     })?;
//!     let delivery = Sender::detect()?.send(&request).await?;
//!     println!("{delivery}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

#[cfg(feature = "sdk")]
pub mod client;
pub mod config;
pub mod domain;
pub mod endpoint;
mod error;
pub mod fallback;
mod http;
pub mod sender;
mod transport;

#[cfg(feature = "sdk")]
pub use client::{TwilioClient, TwilioClientBuilder};
pub use config::{CliOverrides, ConfigError};
pub use domain::{
    AccountSid, AuthToken, Credentials, DeliveryResult, MessageBody, MessageRequest,
    MessageResource, MessageSid, MessageStatus, OutboundMessage, PhoneNumber, ValidationError,
};
pub use error::SendError;
pub use fallback::HttpFallback;
pub use http::BoxFuture;
pub use sender::{Delivery, MessageTransport, Route, SendFailure, Sender, sdk_available};
