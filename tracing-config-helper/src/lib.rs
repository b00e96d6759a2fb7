//! Console logging setup shared by the binaries of the workspace.
//!
//! Filtering uses `RUST_LOG`, see
//! <https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html>.
//! Logs go to stderr so they never mix with command output on stdout.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log format {0:?}, expected pretty or json")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingSetupError {
    #[error("Invalid default log directive {directive:?}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("A global tracing subscriber was already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds the filter from `RUST_LOG`, falling back to `default_directive` when
/// it is missing or unparsable.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, TracingSetupError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::builder().parse(default_directive).map_err(|source| {
            TracingSetupError::InvalidDirective {
                directive: default_directive.to_string(),
                source,
            }
        }),
    }
}

/// Installs the global subscriber and a panic hook that logs the panic before
/// the default hook runs.
pub fn setup_tracing(format: LogFormat, default_directive: &str) -> Result<(), TracingSetupError> {
    let filter = env_filter(default_directive)?;
    let fmt = match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(false)
            .with_filter(filter)
            .boxed(),
    };
    let subscriber = tracing_subscriber::Registry::default().with(fmt);
    subscriber::set_global_default(subscriber)?;
    install_log_on_panic_hook();
    Ok(())
}

fn install_log_on_panic_hook() {
    let current = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let message: String = panic_info.to_string().chars().take(28_000).collect();
        tracing::error!(is_panic = true, "Code panicked: {message}");
        current(panic_info);
    }));
}
