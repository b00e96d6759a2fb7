use api_structs::log::SeverityCategory;
use api_structs::ui::search_grid::TraceFilters;
use tracing_config_helper::LogFormat;

pub const DEFAULT_API_URL: &str = "http://localhost:7070/api";

/// Terminal client for the glint telemetry API.
#[derive(Debug, clap::Parser)]
#[clap(name = "glint", version)]
pub struct Cli {
    /// Base URL of the API, without trailing slash
    #[clap(long, env = "GLINT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,
    /// pretty or json
    #[clap(long, env = "GLINT_LOG_FORMAT", default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, clap::Subcommand)]
pub enum Command {
    /// List recent traces
    Traces {
        #[clap(short, long)]
        service: Option<String>,
        /// Minimum duration in milliseconds
        #[clap(long, value_parser = parse_duration_ms)]
        min_duration: Option<f64>,
        /// Maximum duration in milliseconds
        #[clap(long, value_parser = parse_duration_ms)]
        max_duration: Option<f64>,
        #[clap(short, long, default_value_t = 25)]
        limit: usize,
        #[clap(long, default_value_t = 0)]
        offset: usize,
        /// Only show traces with at least one failed span
        #[clap(long)]
        errors: bool,
    },
    /// Print the waterfall of one trace
    Trace {
        trace_id: String,
        /// Only show root spans
        #[clap(long)]
        collapsed: bool,
        /// Width of the timeline column, in characters
        #[clap(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(10..=200))]
        width: u16,
    },
    /// List recent logs
    Logs {
        #[clap(short, long)]
        service: Option<String>,
        /// TRACE, DEBUG, INFO, WARN, ERROR or FATAL
        #[clap(long, value_parser = parse_level)]
        level: Option<SeverityCategory>,
        #[clap(short, long, default_value_t = 100)]
        limit: usize,
    },
    /// List services that reported telemetry
    Services,
    /// Health summary of one service
    Service { name: String },
    /// List metrics with their latest value
    Metrics {
        #[clap(short, long)]
        service: Option<String>,
    },
}

impl Command {
    /// Query of the `traces` command, `None` for every other command.
    pub fn trace_filters(&self) -> Option<TraceFilters> {
        match self {
            Command::Traces {
                service,
                min_duration,
                max_duration,
                limit,
                offset,
                ..
            } => Some(TraceFilters {
                service: service.clone(),
                min_duration: *min_duration,
                max_duration: *max_duration,
                limit: Some(*limit),
                offset: Some(*offset),
            }),
            _ => None,
        }
    }
}

fn parse_duration_ms(input: &str) -> Result<f64, String> {
    TraceFilters::parse_duration_input(input)
        .ok_or_else(|| format!("{input:?} is not a positive number of milliseconds"))
}

fn parse_level(input: &str) -> Result<SeverityCategory, String> {
    input
        .parse::<SeverityCategory>()
        .map_err(|_| format!("Unknown log level {input:?}"))
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[test]
    fn traces_defaults() {
        let cli = Cli::try_parse_from(["glint", "traces"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(
            cli.command.trace_filters(),
            Some(TraceFilters {
                service: None,
                min_duration: None,
                max_duration: None,
                limit: Some(25),
                offset: Some(0),
            })
        );
    }

    #[test]
    fn traces_filters() {
        let cli = Cli::try_parse_from([
            "glint",
            "traces",
            "--service",
            "checkout",
            "--min-duration",
            "12.5",
            "--limit",
            "10",
            "--errors",
        ])
        .unwrap();
        let filters = cli.command.trace_filters().unwrap();
        assert_eq!(filters.service.as_deref(), Some("checkout"));
        assert_eq!(filters.min_duration, Some(12.5));
        assert_eq!(filters.limit, Some(10));
        assert!(matches!(cli.command, Command::Traces { errors: true, .. }));
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(Cli::try_parse_from(["glint", "traces", "--max-duration", "-3"]).is_err());
        assert!(Cli::try_parse_from(["glint", "traces", "--max-duration", "abc"]).is_err());
    }

    #[test]
    fn trace_command() {
        let cli = Cli::try_parse_from(["glint", "trace", "abc123", "--collapsed"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Trace {
                trace_id: "abc123".to_string(),
                collapsed: true,
                width: 40,
            }
        );
        assert_eq!(cli.command.trace_filters(), None);
        assert!(Cli::try_parse_from(["glint", "trace"]).is_err());
        assert!(Cli::try_parse_from(["glint", "trace", "abc", "--width", "5"]).is_err());
    }

    #[test]
    fn logs_level_is_case_insensitive() {
        let cli = Cli::try_parse_from(["glint", "logs", "--level", "warn"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Logs {
                service: None,
                level: Some(SeverityCategory::Warn),
                limit: 100,
            }
        );
        assert!(Cli::try_parse_from(["glint", "logs", "--level", "loud"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "glint",
            "services",
            "--api-url",
            "http://glint.internal/api",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://glint.internal/api");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.command, Command::Services);
        assert!(Cli::try_parse_from(["glint", "services", "--log-format", "xml"]).is_err());
    }
}
