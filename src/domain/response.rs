use std::fmt;

use crate::domain::value::{MessageSid, MessageStatus};

/// Normalized outcome of a message created through the typed client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    pub sid: MessageSid,
    pub status: MessageStatus,
}

impl fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sid={} status={}", self.sid, self.status)
    }
}

/// Message resource as returned by `POST .../Messages.json`.
///
/// Only the fields this crate reports on are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResource {
    pub sid: MessageSid,
    pub status: MessageStatus,
    pub from: Option<String>,
    pub to: Option<String>,
    pub num_segments: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
    pub date_created: Option<String>,
}

impl From<MessageResource> for DeliveryResult {
    fn from(value: MessageResource) -> Self {
        Self {
            sid: value.sid,
            status: value.status,
        }
    }
}
