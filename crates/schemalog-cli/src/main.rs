use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use schemalog_core::{
    apply, extract, infer, render_module, synthesize, PipelineConfig, Schema,
    SynthesisError,
};
use schemalog_model::{load_batches, LogBatch};
use std::path::{Path, PathBuf};

mod table;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Command::new("schemalog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Schema inference and typed-parser synthesis for diagnostic-log corpora")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("schema")
                .about("Infer the payload schema from a corpus and print it")
                .args(corpus_args()),
        )
        .subcommand(
            Command::new("generate")
                .about("Infer the schema and write a generated Rust parser module")
                .args(corpus_args())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("File to write the generated module to"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Run the full pipeline and print the aggregate report")
                .args(corpus_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the report as JSON instead of tables"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("schema", matches)) => run_schema(matches),
        Some(("generate", matches)) => run_generate(matches),
        Some(("report", matches)) => run_report(matches),
        _ => unreachable!("subcommand required"),
    }
}

fn corpus_args() -> Vec<Arg> {
    vec![
        Arg::new("data-dir")
            .long("data-dir")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
            .help("Directory tree of log-container files"),
        Arg::new("marker")
            .long("marker")
            .default_value("KLEKLE")
            .help("Literal token bounding schema-bearing payloads"),
        Arg::new("diagnostic")
            .long("diagnostic")
            .default_value("IE_DIAGNOSTIC")
            .help("Diagnostic kind whose messages carry payloads"),
    ]
}

fn pipeline_config(matches: &ArgMatches) -> PipelineConfig {
    PipelineConfig::new(
        matches.get_one::<String>("marker").expect("has default"),
        matches.get_one::<String>("diagnostic").expect("has default"),
    )
}

fn data_dir(matches: &ArgMatches) -> &Path {
    matches
        .get_one::<PathBuf>("data-dir")
        .expect("required arg")
}

/// Load the corpus and infer the schema from matching entries
fn infer_schema(
    dir: &Path,
    cfg: &PipelineConfig,
) -> anyhow::Result<(Vec<LogBatch>, Schema)> {
    let batches = load_batches(dir)
        .with_context(|| format!("failed to read corpus under {}", dir.display()))?;

    let payloads = batches
        .iter()
        .flat_map(|batch| batch.entries.iter())
        .filter(|entry| entry.diagnostic == cfg.diagnostic)
        .filter_map(|entry| extract(&entry.message, &cfg.marker));
    let schema = infer(payloads);
    Ok((batches, schema))
}

fn run_schema(matches: &ArgMatches) -> anyhow::Result<()> {
    let cfg = pipeline_config(matches);
    let (_, schema) = infer_schema(data_dir(matches), &cfg)?;

    if schema.is_empty() {
        tracing::warn!(marker = %cfg.marker, "no payload blocks found in corpus");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = schema
        .fields()
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                f.kind.to_string(),
                if f.nullable { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print!(
        "{}",
        table::render_table(&rows, Some(&["Field", "Kind", "Nullable"]))
    );
    Ok(())
}

fn run_generate(matches: &ArgMatches) -> anyhow::Result<()> {
    let cfg = pipeline_config(matches);
    let out = matches.get_one::<PathBuf>("out").expect("required arg");
    let (_, schema) = infer_schema(data_dir(matches), &cfg)?;

    if schema.is_empty() {
        tracing::warn!(marker = %cfg.marker, "no payload blocks found; skipping code generation");
        return Ok(());
    }

    let enums = schema
        .fields()
        .iter()
        .filter(|f| matches!(f.kind, schemalog_core::FieldKind::Enum(_)))
        .count();
    let source = render_module(&schema, &cfg.marker);
    std::fs::write(out, source)
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(
        fields = schema.len(),
        enums,
        out = %out.display(),
        "generated parser module"
    );
    Ok(())
}

fn run_report(matches: &ArgMatches) -> anyhow::Result<()> {
    let cfg = pipeline_config(matches);
    let (batches, schema) = infer_schema(data_dir(matches), &cfg)?;

    let parser = match synthesize(schema, &cfg.marker) {
        Ok(parser) => parser,
        Err(SynthesisError::EmptySchema) => {
            tracing::warn!(marker = %cfg.marker, "no payload blocks found; nothing to report");
            return Ok(());
        }
    };
    let report = apply(batches, &cfg.diagnostic, &parser)
        .context("corpus no longer matches the inferred schema")?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.failed_projects.is_empty() {
        println!("Projects that did not compile successfully:");
        for project in &report.failed_projects {
            println!("  - {project}");
        }
        println!();
    }
    if !report.no_diagnostics_projects.is_empty() {
        println!("Projects with no diagnostics collected:");
        for project in &report.no_diagnostics_projects {
            println!("  - {project}");
        }
        println!();
    }

    println!("Entries per project:");
    print!(
        "{}",
        table::render_counts("Project", &report.project_counts())
    );
    Ok(())
}
