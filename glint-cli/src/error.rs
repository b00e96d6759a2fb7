use api_structs::trace::TraceValidationError;
use api_structs::waterfall::WaterfallError;
use backtraced_error::{ReqwestError, SerdeJsonError};

/// Longest part of an error response body echoed back to the terminal.
pub const ERROR_BODY_CHAR_LIMIT: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Request to the glint API failed")]
    Request(#[from] ReqwestError),
    #[error("Unexpected response from the glint API")]
    Decode(#[from] SerdeJsonError),
    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Trace {trace_id} can't be displayed")]
    InvalidTrace {
        trace_id: String,
        #[source]
        source: TraceValidationError,
    },
    #[error("Trace {trace_id} can't be drawn")]
    Waterfall {
        trace_id: String,
        #[source]
        source: WaterfallError,
    },
}

impl CliError {
    pub fn status(url: String, status: u16, body: &str) -> Self {
        CliError::Status {
            url,
            status,
            body: body.chars().take(ERROR_BODY_CHAR_LIMIT).collect(),
        }
    }
}
