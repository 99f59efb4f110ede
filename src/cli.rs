//! Command-line interface for yalda-relay.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Unset options leave the environment and config file values in place.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"yalda-relay {version}
Webhook relay between a Telegram bot and an LLM chat completion service

USAGE:
    yalda-relay [OPTIONS]

OPTIONS:
    -H, --host <ADDR>       Host address to bind [default: 0.0.0.0]
    -p, --port <PORT>       Port to listen on [default: 5000]
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    TELEGRAM_TOKEN           Bot token (required)
    OPENAI_API_KEY           Completion service API key (required)
    BASE_URL                 Public URL used by /set_webhook
    TELEGRAM_WEBHOOK_SECRET  Secret token expected on webhook calls
    OPENAI_BASE_URL          Completion API base [default: https://api.openai.com/v1]
    OPENAI_MODEL             Model identifier [default: gpt-4o-mini]
    HOST                     Host address (overrides config)
    PORT                     Port number (overrides config)
    YALDA_LOG_LEVEL          Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Start with defaults (0.0.0.0:5000)
    TELEGRAM_TOKEN=... OPENAI_API_KEY=... yalda-relay

    # Local development
    yalda-relay -H 127.0.0.1 -p 8080 -l debug

    # Start with config file
    yalda-relay -c /etc/yalda-relay/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("yalda-relay {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
