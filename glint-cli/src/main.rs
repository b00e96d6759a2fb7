use crate::cli::{Cli, Command};
use crate::client::ApiClient;
use crate::error::CliError;
use api_structs::ui::service::ServiceStats;
use api_structs::ui::search_grid::TraceFilters;
use api_structs::{LogFilters, MetricFilters};
use backtraced_error::error_chain_to_pretty_formatted;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, instrument};

mod cli;
mod client;
mod error;
mod render;

/// How many traces and logs feed the `service` summary.
pub const SERVICE_SAMPLE_LIMIT: usize = 100;
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // load env vars so clap can use them when parsing
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = tracing_config_helper::setup_tracing(cli.log_format, DEFAULT_LOG_DIRECTIVE) {
        eprintln!("{}", error_chain_to_pretty_formatted(&e));
    }
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error_chain_as_string = error_chain_to_pretty_formatted(&e);
            error!("{error_chain_as_string}");
            eprintln!("{error_chain_as_string}");
            ExitCode::FAILURE
        }
    }
}

#[instrument(skip_all)]
async fn run(cli: Cli) -> Result<(), CliError> {
    let client = ApiClient::new(&cli.api_url)?;
    info!(api_url = client.base_url(), command = ?cli.command, "running");
    let output = match &cli.command {
        Command::Traces { errors, .. } => {
            let filters = cli.command.trace_filters().unwrap_or_default();
            let mut resp = client.traces(&filters).await?;
            if *errors {
                resp.traces.retain(|t| t.has_errors);
            }
            render::trace_list(&resp.traces, resp.total)
        }
        Command::Trace {
            trace_id,
            collapsed,
            width,
        } => {
            let trace = client.trace(trace_id).await?;
            render::waterfall(&trace, *collapsed, usize::from(*width)).map_err(|source| {
                CliError::Waterfall {
                    trace_id: trace_id.clone(),
                    source,
                }
            })?
        }
        Command::Logs {
            service,
            level,
            limit,
        } => {
            let logs = client
                .logs(&LogFilters {
                    service: service.clone(),
                    level: *level,
                    limit: Some(*limit),
                })
                .await?;
            render::log_list(&logs)
        }
        Command::Services => render::service_list(&client.services().await?),
        Command::Service { name } => {
            let traces = client
                .traces(&TraceFilters {
                    service: Some(name.clone()),
                    limit: Some(SERVICE_SAMPLE_LIMIT),
                    ..TraceFilters::default()
                })
                .await?;
            let logs = client
                .logs(&LogFilters {
                    service: Some(name.clone()),
                    level: None,
                    limit: Some(SERVICE_SAMPLE_LIMIT),
                })
                .await?;
            let metrics = client
                .metrics(&MetricFilters {
                    service: Some(name.clone()),
                    limit: None,
                })
                .await?;
            let stats = ServiceStats::from_data(&traces.traces, &logs, metrics.len());
            render::service_stats(name, &stats)
        }
        Command::Metrics { service } => {
            let metrics = client
                .metrics(&MetricFilters {
                    service: service.clone(),
                    limit: None,
                })
                .await?;
            render::metric_list(&metrics)
        }
    };
    print!("{output}");
    Ok(())
}
