use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio Account SID (`AC...`).
///
/// Invariant: non-empty after trimming. Used both as the Basic auth username and as
/// the account segment of the Messages endpoint path.
pub struct AccountSid(String);

impl AccountSid {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "account sid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Twilio Auth Token, used as the Basic auth password.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` never prints the value.
pub struct AuthToken(String);

impl AuthToken {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "auth token";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number passed to Twilio as-is.
///
/// Invariant: non-empty after trimming. Twilio expects E.164 (`+14155552671`), but the
/// value is not rejected when it does not look like one; see [`PhoneNumber::is_e164`].
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "phone number";

    /// Create a validated (non-empty) phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Whether the raw value is written in canonical E.164 form.
    ///
    /// Only the notation is checked; numbers in unassigned ranges still pass.
    pub fn is_e164(&self) -> bool {
        let Ok(parsed) = phonenumber::parse(None, &self.0) else {
            return false;
        };
        phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string()
            == self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`Body`).
///
/// The text is passed through untouched, including surrounding whitespace.
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Twilio message sid (`SM...`) assigned when a message is created.
///
/// Invariant: non-empty after trimming.
pub struct MessageSid(String);

impl MessageSid {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "message sid";

    /// Create a validated [`MessageSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status reported by Twilio for a message.
///
/// Twilio may add statuses over time; anything unrecognized is kept verbatim in
/// [`MessageStatus::Other`].
pub enum MessageStatus {
    Queued,
    Accepted,
    Scheduled,
    Sending,
    Sent,
    Delivered,
    Undelivered,
    Failed,
    Read,
    Receiving,
    Received,
    Canceled,
    PartiallyDelivered,
    Other(String),
}

impl MessageStatus {
    /// Map Twilio's wire value (`queued`, `sent`, ...) to a status.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "queued" => Self::Queued,
            "accepted" => Self::Accepted,
            "scheduled" => Self::Scheduled,
            "sending" => Self::Sending,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "undelivered" => Self::Undelivered,
            "failed" => Self::Failed,
            "read" => Self::Read,
            "receiving" => Self::Receiving,
            "received" => Self::Received,
            "canceled" => Self::Canceled,
            "partially_delivered" => Self::PartiallyDelivered,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Twilio's wire value for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Accepted => "accepted",
            Self::Scheduled => "scheduled",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Undelivered => "undelivered",
            Self::Failed => "failed",
            Self::Read => "read",
            Self::Receiving => "receiving",
            Self::Received => "received",
            Self::Canceled => "canceled",
            Self::PartiallyDelivered => "partially_delivered",
            Self::Other(other) => other,
        }
    }

    /// Whether Twilio has given up on the message.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Undelivered | Self::Canceled)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
