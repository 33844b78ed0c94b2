pub mod config;
pub mod error;
pub mod models;
pub mod graph;
pub mod analysis;
pub mod narrative;
pub mod advisor;

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use advisor::ElderlyRiskAdvisor;
use config::AppConfig;
use error::AppError;
use graph::{Neo4jExecutor, QueryExecutor};
use narrative::{GeminiClient, TextCompleter};

pub const DRUG_PROMPT: &str = "Enter the name of the drug prescribed to an elderly patient: ";
pub const ANALYSIS_HEADER: &str = "\nAnalysis of Drug for Elderly Patients:";
pub const INSIGHT_HEADER: &str = "\nAI-Generated Insight:";

/// Initialize tracing on stderr so stdout carries only the report blocks.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();
}

/// Read one line, without its line terminator. A closed input is an error.
pub fn read_drug_name<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no drug name on input",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// One interactive run against real services.
pub fn run() -> Result<(), AppError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let executor = Neo4jExecutor::connect(&config.graph)?;
    let completer = GeminiClient::new(&config.gemini)?;

    run_with(
        executor,
        &completer,
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )
}

/// Prompt, analyse, print the report, then request and print the narrative.
///
/// Takes ownership of the executor: the graph connection is released when
/// this returns, on success and on every error path. The report is written
/// before the narrative is requested.
pub fn run_with<E, T, R, W>(
    executor: E,
    completer: &T,
    input: &mut R,
    output: &mut W,
) -> Result<(), AppError>
where
    E: QueryExecutor,
    T: TextCompleter,
    R: BufRead,
    W: Write,
{
    let advisor = ElderlyRiskAdvisor::new(&executor, completer);

    write!(output, "{DRUG_PROMPT}")?;
    output.flush()?;
    let drug_name = read_drug_name(input)?;

    let report = advisor.analysis_report(&drug_name)?;
    writeln!(output, "{ANALYSIS_HEADER}")?;
    writeln!(output, "{report}")?;
    output.flush()?;

    let insight = advisor.generate_insight(&drug_name, &report)?;
    writeln!(output, "{INSIGHT_HEADER}")?;
    writeln!(output, "{insight}")?;

    Ok(())
}
