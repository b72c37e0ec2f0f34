//! Transport layer: Twilio wire format (form encoding and JSON decoding).

mod messages;

pub use messages::encode_message_form;
#[cfg(feature = "sdk")]
pub use messages::{decode_api_error, decode_message_json_response};
