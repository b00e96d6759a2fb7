use std::backtrace::Backtrace;
use std::error::Error;

/// Maximum number of characters of a response body kept in a [`SerdeJsonError`].
pub const BAD_INPUT_SAMPLE_CHARS: usize = 500;

/// Formats the error and every `source()` below it, outermost first.
pub fn error_chain_to_pretty_formatted<E>(error: E) -> String
where
    E: Error,
{
    let mut err = error.to_string();
    let mut current: Option<&dyn Error> = error.source();
    while let Some(inner_err) = current {
        err.push_str(&format!("\nCaused by: \n{inner_err}"));
        current = inner_err.source();
    }
    err
}

#[derive(Debug, thiserror::Error)]
#[error("SerdeJsonError Context: {context}\n{bad_input_sample}\n{backtrace}")]
pub struct SerdeJsonError {
    #[source]
    pub source: serde_json::Error,
    pub context: String,
    pub bad_input_sample: String,
    pub backtrace: OptionBacktracePrettyPrinter,
}

impl SerdeJsonError {
    pub fn from_serde_json_error<S: Into<String>>(
        source: serde_json::Error,
        context: S,
        bad_input: &str,
    ) -> Self {
        Self {
            source,
            context: context.into(),
            bad_input_sample: bad_input.chars().take(BAD_INPUT_SAMPLE_CHARS).collect(),
            backtrace: OptionBacktracePrettyPrinter::capture(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("ReqwestError Context: {context}\n{backtrace}")]
pub struct ReqwestError {
    #[source]
    pub source: reqwest::Error,
    pub context: String,
    pub backtrace: OptionBacktracePrettyPrinter,
}

impl ReqwestError {
    pub fn from_reqwest_error<S: Into<String>>(source: reqwest::Error, context: S) -> Self {
        Self {
            source,
            context: context.into(),
            backtrace: OptionBacktracePrettyPrinter::capture(),
        }
    }
}

/// Displays the backtrace when `RUST_BACKTRACE` enabled capturing it.
#[derive(Debug)]
pub struct OptionBacktracePrettyPrinter(pub Option<Backtrace>);

impl OptionBacktracePrettyPrinter {
    pub fn capture() -> Self {
        Self::from(Backtrace::capture())
    }
}

impl From<Backtrace> for OptionBacktracePrettyPrinter {
    fn from(value: Backtrace) -> Self {
        match value.status() {
            std::backtrace::BacktraceStatus::Captured => Self(Some(value)),
            _ => Self(None),
        }
    }
}

impl std::fmt::Display for OptionBacktracePrettyPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_ref() {
            Some(backtrace) => write!(f, "{backtrace}"),
            None => write!(f, "No backtrace"),
        }
    }
}
