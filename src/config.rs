//! Configuration: CLI values layered over environment defaults.

use tracing::{debug, warn};

use crate::domain::{
    AccountSid, AuthToken, Credentials, MessageBody, MessageRequest, OutboundMessage, PhoneNumber,
    ValidationError,
};

pub const ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
pub const AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
pub const FROM_ENV: &str = "TWILIO_FROM";

/// Values taken from the command line. Credentials are optional there.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from: Option<String>,
    pub to: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "missing credentials ({}). Set {}, {}, and {} env vars or pass --account-sid, --auth-token, and --from",
        .missing.join(", "),
        ACCOUNT_SID_ENV,
        AUTH_TOKEN_ENV,
        FROM_ENV
    )]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("invalid --{flag}: {source}")]
    Invalid {
        flag: &'static str,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Cli,
    Env,
}

/// Merge `cli` with environment values looked up through `env`.
///
/// A non-blank CLI value wins; otherwise a non-blank environment value is used. The
/// sid, token and sender must all resolve or nothing is built.
pub fn resolve<F>(cli: CliOverrides, env: F) -> Result<MessageRequest, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let account_sid = layered(cli.account_sid, ACCOUNT_SID_ENV, &env);
    let auth_token = layered(cli.auth_token, AUTH_TOKEN_ENV, &env);
    let from = layered(cli.from, FROM_ENV, &env);

    let (account_sid, auth_token, from) = match (account_sid, auth_token, from) {
        (Some(account_sid), Some(auth_token), Some(from)) => (account_sid, auth_token, from),
        (account_sid, auth_token, from) => {
            let missing = [
                (account_sid.is_none(), ACCOUNT_SID_ENV),
                (auth_token.is_none(), AUTH_TOKEN_ENV),
                (from.is_none(), FROM_ENV),
            ]
            .into_iter()
            .filter_map(|(is_missing, name)| is_missing.then_some(name))
            .collect();
            return Err(ConfigError::MissingCredentials { missing });
        }
    };

    if auth_token.1 == Layer::Cli {
        warn!("auth token passed on the command line; prefer {AUTH_TOKEN_ENV}");
    }
    debug!(
        account_sid = ?account_sid.1,
        auth_token = ?auth_token.1,
        from = ?from.1,
        "credentials resolved"
    );

    let credentials = Credentials::new(
        AccountSid::new(account_sid.0).map_err(invalid("account-sid"))?,
        AuthToken::new(auth_token.0).map_err(invalid("auth-token"))?,
    );
    let from = PhoneNumber::new(from.0).map_err(invalid("from"))?;
    let to = PhoneNumber::new(cli.to).map_err(invalid("to"))?;

    for (role, number) in [("sender", &from), ("recipient", &to)] {
        if !number.is_e164() {
            warn!(%number, "{role} number does not look like E.164 (e.g. +14155552671)");
        }
    }

    Ok(MessageRequest::new(
        credentials,
        OutboundMessage::new(from, to, MessageBody::new(cli.body)),
    ))
}

/// [`resolve`] against the process environment.
pub fn resolve_from_env(cli: CliOverrides) -> Result<MessageRequest, ConfigError> {
    resolve(cli, |name| std::env::var(name).ok())
}

fn layered<F>(cli: Option<String>, env_name: &str, env: &F) -> Option<(String, Layer)>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |value: &String| !value.trim().is_empty();
    cli.filter(present)
        .map(|value| (value, Layer::Cli))
        .or_else(|| env(env_name).filter(present).map(|value| (value, Layer::Env)))
}

fn invalid(flag: &'static str) -> impl Fn(ValidationError) -> ConfigError {
    move |source| ConfigError::Invalid { flag, source }
}
