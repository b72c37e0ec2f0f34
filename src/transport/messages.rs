#[cfg(feature = "sdk")]
use serde::Deserialize;

use crate::domain::OutboundMessage;
#[cfg(feature = "sdk")]
use crate::domain::{MessageResource, MessageSid, MessageStatus};

pub const FROM_FIELD: &str = "From";
pub const TO_FIELD: &str = "To";
pub const BODY_FIELD: &str = "Body";

#[cfg(feature = "sdk")]
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing the message sid")]
    MissingSid,
}

#[cfg(feature = "sdk")]
#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    #[serde(default)]
    sid: Option<String>,
    status: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    num_segments: Option<NumSegments>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    date_created: Option<String>,
}

#[cfg(feature = "sdk")]
// Documented as a string, but older API versions sent a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumSegments {
    String(String),
    Number(serde_json::Number),
}

#[cfg(feature = "sdk")]
impl NumSegments {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

#[cfg(feature = "sdk")]
/// Body of a non-2xx response from the Twilio REST API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

pub fn encode_message_form(message: &OutboundMessage) -> Vec<(String, String)> {
    vec![
        (FROM_FIELD.to_owned(), message.from().raw().to_owned()),
        (TO_FIELD.to_owned(), message.to().raw().to_owned()),
        (BODY_FIELD.to_owned(), message.body().as_str().to_owned()),
    ]
}

#[cfg(feature = "sdk")]
pub fn decode_message_json_response(json: &str) -> Result<MessageResource, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    let sid = parsed
        .sid
        .and_then(|sid| MessageSid::new(sid).ok())
        .ok_or(TransportError::MissingSid)?;

    Ok(MessageResource {
        sid,
        status: MessageStatus::from_wire(&parsed.status),
        from: parsed.from,
        to: parsed.to,
        num_segments: parsed.num_segments.map(NumSegments::into_string),
        error_code: parsed.error_code,
        error_message: parsed.error_message,
        date_created: parsed.date_created,
    })
}

#[cfg(feature = "sdk")]
/// Best-effort decode of a Twilio error body; `None` when the body has another shape.
pub fn decode_api_error(body: &str) -> Option<ApiErrorBody> {
    serde_json::from_str(body).ok()
}
