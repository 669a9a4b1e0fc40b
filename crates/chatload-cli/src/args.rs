use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "chatload")]
#[command(about = "Replay recorded chat workloads against a streaming inference endpoint", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Replay a workload file against an inference endpoint")]
    Run {
        #[arg(long, help = "Path to a Workload JSON file")]
        workload: PathBuf,

        #[arg(long, help = "Endpoint adapter name, e.g. openai, tgi, triton, friendliai")]
        endpoint: String,

        #[arg(long, help = "Base URL of the inference server")]
        url: String,

        #[arg(long, help = "Model name sent in each request")]
        model: String,

        #[arg(long, help = "API key, if the endpoint requires one")]
        api_key: Option<String>,

        #[arg(long, help = "Tolerance in seconds for on-time request launches")]
        time_tolerance: Option<f64>,

        #[arg(long, help = "Scheduler poll interval in seconds")]
        time_step: Option<f64>,

        #[arg(long, help = "Write visit responses to this path")]
        out: PathBuf,
    },

    #[command(about = "Generate a report from a saved set of visit responses")]
    Report {
        #[arg(long, help = "Path to a VisitResponse list JSON file")]
        responses: PathBuf,

        #[arg(long, help = "Write the report JSON to this path instead of stdout")]
        out: Option<PathBuf>,
    },

    #[command(subcommand, about = "Inspect a workload file")]
    Workload(WorkloadCommand),

    #[command(subcommand, about = "List built-in dataset normalizers")]
    Datasets(DatasetsCommand),

    #[command(subcommand, about = "List built-in endpoint adapters")]
    Endpoints(EndpointsCommand),
}

#[derive(Subcommand)]
pub enum WorkloadCommand {
    #[command(about = "Validate a workload file's invariants")]
    Validate { path: PathBuf },

    #[command(about = "Print summary statistics about a workload file")]
    Show { path: PathBuf },
}

#[derive(Subcommand)]
pub enum DatasetsCommand {
    #[command(about = "List the names of every registered dataset normalizer")]
    List,
}

#[derive(Subcommand)]
pub enum EndpointsCommand {
    #[command(about = "List the names of every registered endpoint adapter")]
    List,
}
