use crate::domain::value::{AccountSid, AuthToken, MessageBody, PhoneNumber};

/// Credentials for the Twilio REST API (HTTP Basic auth: sid / token).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_sid: AccountSid,
    pub auth_token: AuthToken,
}

impl Credentials {
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Self {
        Self {
            account_sid,
            auth_token,
        }
    }
}

/// Sender, recipient and text of one SMS.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    from: PhoneNumber,
    to: PhoneNumber,
    body: MessageBody,
}

impl OutboundMessage {
    pub fn new(from: PhoneNumber, to: PhoneNumber, body: MessageBody) -> Self {
        Self { from, to, body }
    }

    pub fn from(&self) -> &PhoneNumber {
        &self.from
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }
}

/// A single outbound SMS together with the account it is sent from.
///
/// Built once from CLI and environment input; every field is resolved before any
/// network call is made.
#[derive(Debug, Clone)]
pub struct MessageRequest {
    credentials: Credentials,
    message: OutboundMessage,
}

impl MessageRequest {
    pub fn new(credentials: Credentials, message: OutboundMessage) -> Self {
        Self {
            credentials,
            message,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn message(&self) -> &OutboundMessage {
        &self.message
    }
}
