use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use graphql_generator::code_generator::{self, client_scaffold};
use graphql_generator::config::{CodegenConfig, SchemaSource};
use graphql_generator::{emitter_for, fetch};

#[derive(Parser)]
#[command(version, about = "Generates a typed GraphQL client from an introspection schema")]
struct Cli {
    #[arg(short, long, help = "Path to config file from working directory, default: graphql-generator.conf.json")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Introspection JSON file, SDL file (.graphql/.gql), http(s) endpoint or - for stdin, override config file")]
    schema: Option<String>,
    #[arg(short, long, help = "Output directory, override config file")]
    output: Option<String>,
    #[arg(short, long, help = "Target language, override config file")]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Cli::parse();

    let mut config = CodegenConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(schema) = args.schema {
        config.schema = schema;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(language) = args.language {
        config.language = language;
    }
    config.validate_language()?;

    let options = config.code_file_options();
    let emitter = emitter_for(&config.language, options.clone())?;
    let source = config.schema_source();
    let schema = fetch::read_schema(&source)
        .await
        .with_context(|| format!("Failed to read schema from {}", config.schema))?;

    let names = config.artifact_names();
    let artifacts = code_generator::generate(&schema, emitter.as_ref(), &names);

    let endpoint = match &source {
        SchemaSource::Endpoint { url } => Some(url.as_str()),
        _ => None,
    };
    let output_directory = config.output_directory();
    code_generator::write_files(
        &artifacts,
        &names,
        &output_directory,
        &client_scaffold(endpoint, &options),
        &options.line_break,
    )
    .await
    .with_context(|| format!("Failed to write output to {}", output_directory.display()))?;

    tracing::info!(directory = %output_directory.display(), language = emitter.language(), "done");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
