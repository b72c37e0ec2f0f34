//! Twilio REST endpoint construction.

use url::Url;

use crate::domain::AccountSid;

/// Base of the Twilio 2010-04-01 REST API.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid API base URL: {0}")]
    Invalid(#[from] url::ParseError),

    #[error("API base URL cannot carry a path: {0}")]
    CannotBeABase(String),
}

/// `{api_base}/Accounts/{account_sid}/Messages.json`, with the sid percent-encoded as a
/// single path segment.
pub fn messages_url(api_base: &str, account_sid: &AccountSid) -> Result<String, EndpointError> {
    let mut url = Url::parse(api_base)?;
    url.path_segments_mut()
        .map_err(|()| EndpointError::CannotBeABase(api_base.to_owned()))?
        .pop_if_empty()
        .extend(["Accounts", account_sid.as_str(), "Messages.json"]);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_builds_documented_url() {
        let sid = AccountSid::new("AC123").unwrap();
        assert_eq!(
            messages_url(DEFAULT_API_BASE, &sid).unwrap(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let sid = AccountSid::new("AC123").unwrap();
        assert_eq!(
            messages_url("http://127.0.0.1:8080/2010-04-01/", &sid).unwrap(),
            "http://127.0.0.1:8080/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn sid_cannot_escape_its_path_segment() {
        let sid = AccountSid::new("AC1/../x").unwrap();
        let url = messages_url(DEFAULT_API_BASE, &sid).unwrap();
        assert_eq!(
            url,
            "https://api.twilio.com/2010-04-01/Accounts/AC1%2F..%2Fx/Messages.json"
        );
    }

    #[test]
    fn invalid_base_is_rejected() {
        let sid = AccountSid::new("AC123").unwrap();
        assert!(matches!(
            messages_url("not a url", &sid),
            Err(EndpointError::Invalid(_))
        ));
        assert!(matches!(
            messages_url("mailto:ops@example.com", &sid),
            Err(EndpointError::CannotBeABase(_))
        ));
    }
}
