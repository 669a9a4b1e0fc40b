use std::path::Path;

use anyhow::{Context, Result};
use chatload_sdk::{Client, RunConfig};

use crate::args::{Commands, DatasetsCommand, EndpointsCommand, OutputFormat, WorkloadCommand};

pub async fn run(cli: crate::args::Cli) -> Result<()> {
    match cli.command {
        Commands::Run { workload, endpoint, url, model, api_key, time_tolerance, time_step, out } => {
            run_workload(&workload, &endpoint, &url, &model, api_key, time_tolerance, time_step, &out).await
        }
        Commands::Report { responses, out } => report(&responses, out.as_deref(), cli.format),
        Commands::Workload(WorkloadCommand::Validate { path }) => workload_validate(&path),
        Commands::Workload(WorkloadCommand::Show { path }) => workload_show(&path, cli.format),
        Commands::Datasets(DatasetsCommand::List) => datasets_list(cli.format),
        Commands::Endpoints(EndpointsCommand::List) => endpoints_list(cli.format),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_workload(
    workload_path: &Path,
    endpoint: &str,
    url: &str,
    model: &str,
    api_key: Option<String>,
    time_tolerance: Option<f64>,
    time_step: Option<f64>,
    out: &Path,
) -> Result<()> {
    let workload = chatload_sdk::load_workload(workload_path)
        .with_context(|| format!("loading workload from {}", workload_path.display()))?;
    workload.validate().context("workload failed validation")?;

    let mut client = Client::connect(endpoint, url, model).context("connecting to endpoint")?;
    if let Some(api_key) = api_key {
        client = client.with_api_key(api_key)?;
    }

    let mut config = RunConfig::default();
    if let Some(t) = time_tolerance {
        config.time_tolerance = t;
    }
    if let Some(t) = time_step {
        config.time_step = t;
    }
    client = client.with_config(config);

    tracing::info!(visits = workload.len(), "starting run");
    let responses = client.run(&workload).await.context("running workload")?;

    chatload_sdk::save_responses(out, &responses)
        .with_context(|| format!("writing responses to {}", out.display()))?;

    let failed = responses.iter().filter(|v| v.failed).count();
    println!("{} visits completed, {} failed", responses.len(), failed);
    Ok(())
}

fn report(responses_path: &Path, out: Option<&Path>, format: OutputFormat) -> Result<()> {
    let responses = chatload_sdk::load_responses(responses_path)
        .with_context(|| format!("loading responses from {}", responses_path.display()))?;
    let report = chatload_sdk::generate_report(&responses);

    let body = serde_json::json!({
        "request_level": report.request_level,
        "visit_level": report.visit_level,
    });
    let text = serde_json::to_string_pretty(&body)?;

    match out {
        Some(path) => std::fs::write(path, &text).with_context(|| format!("writing report to {}", path.display()))?,
        None => match format {
            OutputFormat::Json => println!("{text}"),
            OutputFormat::Plain => {
                println!("requests: {}", report.request_level.request_num);
                println!("fail rate: {:.4}", report.request_level.fail_rate);
                println!("rps: {:.4}", report.request_level.rps);
                println!("throughput (peak tok/s): {:.2}", report.request_level.throughput_peak);
                println!("visits: {}", report.visit_level.visit_num);
                println!("visit fail rate: {:.4}", report.visit_level.fail_rate);
            }
        },
    }
    Ok(())
}

fn workload_validate(path: &Path) -> Result<()> {
    let workload =
        chatload_sdk::load_workload(path).with_context(|| format!("loading workload from {}", path.display()))?;
    workload.validate().context("workload failed validation")?;
    println!("ok: {} visits", workload.len());
    Ok(())
}

fn workload_show(path: &Path, format: OutputFormat) -> Result<()> {
    let workload =
        chatload_sdk::load_workload(path).with_context(|| format!("loading workload from {}", path.display()))?;
    let req_count: usize = workload.visits.iter().map(|v| v.visit.reqs.len()).sum();
    let last_offset = workload.visits.last().map(|v| v.start_offset).unwrap_or(0.0);

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "visit_count": workload.len(),
                "request_count": req_count,
                "last_start_offset": last_offset,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Plain => {
            println!("visits: {}", workload.len());
            println!("requests: {req_count}");
            println!("last start offset: {last_offset:.2}s");
        }
    }
    Ok(())
}

fn datasets_list(format: OutputFormat) -> Result<()> {
    let names = chatload_sdk::dataset_names();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Plain => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn endpoints_list(format: OutputFormat) -> Result<()> {
    let names = chatload_sdk::endpoint_names();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Plain => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}
