//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{Credentials, MessageRequest, OutboundMessage};
pub use response::{DeliveryResult, MessageResource};
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, MessageBody, MessageSid, MessageStatus, PhoneNumber};
