//! Send an SMS via Twilio.
//!
//! Usage:
//!   export TWILIO_ACCOUNT_SID="ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
//!   export TWILIO_AUTH_TOKEN="your_auth_token"
//!   export TWILIO_FROM="+1234567890"
//!   send-sms --to "+19876543210" --body "Hello from Rust!"
//!
//! Credentials may also be passed with `--account-sid`, `--auth-token` and `--from`;
//! command-line values win over the environment. Trial accounts can only send to
//! verified numbers.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use twilio_sms::config::{self, CliOverrides};
use twilio_sms::{Delivery, Route, SendError, Sender};

/// Exit status when credentials are missing or invalid.
const CONFIG_ERROR_EXIT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "send-sms", version)]
#[command(about = "Send an SMS via Twilio")]
struct Args {
    /// Recipient phone number in E.164 format, e.g. +14155552671
    #[arg(long)]
    to: String,

    /// Message body (text)
    #[arg(long)]
    body: String,

    /// Twilio Account SID (defaults to TWILIO_ACCOUNT_SID)
    #[arg(long)]
    account_sid: Option<String>,

    /// Twilio Auth Token (defaults to TWILIO_AUTH_TOKEN)
    #[arg(long)]
    auth_token: Option<String>,

    /// Sending Twilio phone number (defaults to TWILIO_FROM)
    #[arg(long)]
    from: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            account_sid: args.account_sid,
            auth_token: args.auth_token,
            from: args.from,
            to: args.to,
            body: args.body,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(args.into(), |name| std::env::var(name).ok(), Sender::detect).await
}

/// Resolve configuration, build the sender and send once, reporting on stdout/stderr.
///
/// `make_sender` is only called once the configuration is complete, so a missing
/// credential never touches the network.
async fn run<E, S>(overrides: CliOverrides, env: E, make_sender: S) -> ExitCode
where
    E: Fn(&str) -> Option<String>,
    S: FnOnce() -> Result<Sender, SendError>,
{
    let request = match config::resolve(overrides, env) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    let sender = match make_sender() {
        Ok(sender) => sender,
        Err(err) => {
            eprintln!("Failed to set up HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    match sender.send(&request).await {
        Ok(delivery) => {
            println!("{}", render(&delivery));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("Failed to send via {}: {}", failure.route, failure.source);
            if let Some(detail) = failure.source.detail() {
                eprintln!("{detail}");
            }
            if failure.source.is_auth_error() {
                eprintln!(
                    "Check {} and {}.",
                    config::ACCOUNT_SID_ENV,
                    config::AUTH_TOKEN_ENV
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn render(delivery: &Delivery) -> String {
    match delivery.route() {
        Route::Client => format!("Sent via Twilio client. Result: {delivery}"),
        Route::Http => format!("Sent via HTTP API. Response:\n{delivery}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use clap::CommandFactory;
    use serde_json::json;
    use twilio_sms::{
        BoxFuture, DeliveryResult, MessageRequest, MessageSid, MessageStatus, MessageTransport,
    };

    use super::*;

    struct FixedRoute {
        route: Route,
        reply: fn() -> Result<Delivery, SendError>,
        calls: Arc<AtomicUsize>,
    }

    impl MessageTransport for FixedRoute {
        fn route(&self) -> Route {
            self.route
        }

        fn send<'a>(
            &'a self,
            _request: &'a MessageRequest,
        ) -> BoxFuture<'a, Result<Delivery, SendError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                (self.reply)()
            })
        }
    }

    fn sender_on(
        route: Route,
        reply: fn() -> Result<Delivery, SendError>,
        calls: Arc<AtomicUsize>,
    ) -> impl FnOnce() -> Result<Sender, SendError> {
        move || {
            let transport = FixedRoute {
                route,
                reply,
                calls,
            };
            Sender::select(Some(Box::new(transport)), || {
                panic!("fallback must not be built when a route is given")
            })
        }
    }

    fn overrides() -> CliOverrides {
        CliOverrides {
            to: "+15551234567".to_owned(),
            body: "Hello".to_owned(),
            ..Default::default()
        }
    }

    fn credentials_env(name: &str) -> Option<String> {
        match name {
            config::ACCOUNT_SID_ENV => Some("AC123".to_owned()),
            config::AUTH_TOKEN_ENV => Some("tok".to_owned()),
            config::FROM_ENV => Some("+15550000000".to_owned()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn missing_credentials_exit_with_config_code_before_any_send() {
        let sender_built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&sender_built);

        let code = run(overrides(), |_| None, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(SendError::Transport("unreachable".into()))
        })
        .await;

        assert_eq!(code, ExitCode::from(CONFIG_ERROR_EXIT));
        assert_eq!(sender_built.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_send_exits_zero() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reply: fn() -> Result<Delivery, SendError> = || {
            Ok(Delivery::Client(DeliveryResult {
                sid: MessageSid::new("SM1").unwrap(),
                status: MessageStatus::Queued,
            }))
        };

        let code = run(
            overrides(),
            credentials_env,
            sender_on(Route::Client, reply, Arc::clone(&calls)),
        )
        .await;

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unauthorized_fallback_exits_one() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reply: fn() -> Result<Delivery, SendError> = || {
            Err(SendError::HttpStatus {
                status: 401,
                body: Some(r#"{"code": 20003, "message": "Authenticate"}"#.to_owned()),
            })
        };

        let code = run(
            overrides(),
            credentials_env,
            sender_on(Route::Http, reply, Arc::clone(&calls)),
        )
        .await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn client_api_error_exits_one() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reply: fn() -> Result<Delivery, SendError> = || {
            Err(SendError::Api {
                status: 400,
                code: Some(21211),
                message: "The 'To' number is not a valid phone number.".to_owned(),
                more_info: None,
            })
        };

        let code = run(
            overrides(),
            credentials_env,
            sender_on(Route::Client, reply, Arc::clone(&calls)),
        )
        .await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sender_setup_failure_exits_one() {
        let code = run(overrides(), credentials_env, || {
            Err(SendError::Transport("tls backend unavailable".into()))
        })
        .await;

        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn to_and_body_are_required() {
        assert!(Args::try_parse_from(["send-sms", "--body", "hi"]).is_err());
        assert!(Args::try_parse_from(["send-sms", "--to", "+15551234567"]).is_err());
    }

    #[test]
    fn credentials_are_optional_flags() {
        let args = Args::try_parse_from([
            "send-sms",
            "--to",
            "+15551234567",
            "--body",
            "Hello",
        ])
        .unwrap();
        let overrides = CliOverrides::from(args);
        assert_eq!(overrides.to, "+15551234567");
        assert_eq!(overrides.body, "Hello");
        assert!(overrides.account_sid.is_none());
        assert!(overrides.auth_token.is_none());
        assert!(overrides.from.is_none());
    }

    #[test]
    fn all_flags_map_onto_overrides() {
        let args = Args::try_parse_from([
            "send-sms",
            "--to",
            "+15551234567",
            "--body",
            "Hello",
            "--account-sid",
            "AC123",
            "--auth-token",
            "tok",
            "--from",
            "+15550000000",
        ])
        .unwrap();
        let overrides = CliOverrides::from(args);
        assert_eq!(overrides.account_sid.as_deref(), Some("AC123"));
        assert_eq!(overrides.auth_token.as_deref(), Some("tok"));
        assert_eq!(overrides.from.as_deref(), Some("+15550000000"));
    }

    #[test]
    fn render_reports_client_sid_and_status() {
        let delivery = Delivery::Client(DeliveryResult {
            sid: MessageSid::new("SM1").unwrap(),
            status: MessageStatus::Queued,
        });
        assert_eq!(
            render(&delivery),
            "Sent via Twilio client. Result: sid=SM1 status=queued"
        );
    }

    #[test]
    fn render_prints_fallback_json_body() {
        let delivery = Delivery::Http(json!({"sid": "SM2", "status": "sent"}));
        let rendered = render(&delivery);
        assert!(rendered.starts_with("Sent via HTTP API. Response:\n{"));
        assert!(rendered.contains("\"sid\": \"SM2\""));
        assert!(rendered.contains("\"status\": \"sent\""));
    }
}
