//! CLI entry point for apkguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `apkguard-app` crate.

use anyhow::Context;
use apkguard_app::{
    CheckInput, ExplainOutput, failed_report, format_explanation, format_not_found,
    parse_report_json, render_annotations, render_markdown, report_exit_code, run_check,
    run_explain, serialize_report, to_renderable,
};
use apkguard_settings::Overrides;
use apkguard_types::ApkguardReport;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use schemars::schema_for;
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "apkguard",
    version,
    about = "Android manifest exposure and app-link verification checks"
)]
struct Cli {
    /// Path to apkguard config TOML. A missing file means defaults.
    #[arg(long, default_value = "apkguard.toml", global = true)]
    config: Utf8PathBuf,

    /// Log progress at info level (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a manifest snapshot and write artifacts.
    Check {
        /// Path to the analysis input JSON.
        #[arg(long)]
        input: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/apkguard/report.json")]
        out: Utf8PathBuf,

        /// Proxy URL for app-link verification requests.
        #[arg(long)]
        proxy: Option<String>,

        /// Do not verify TLS certificates of app-link hosts.
        #[arg(long)]
        insecure: bool,

        /// Skip app-link verification; no network requests are made.
        #[arg(long)]
        offline: bool,

        /// Override maximum findings to emit.
        #[arg(long)]
        max_findings: Option<u32>,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/apkguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/apkguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/apkguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Show the template behind a rule key.
    Explain {
        /// The rule key (e.g., "explicitly_exported").
        rule_key: String,
    },

    /// Print a JSON schema.
    Schema {
        #[arg(value_enum, default_value = "report")]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    Report,
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref input,
            ref out,
            ref proxy,
            insecure,
            offline,
            max_findings,
            write_markdown,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                proxy: proxy.clone(),
                insecure,
                offline,
                max_findings,
            };
            cmd_check(
                &cli.config,
                input,
                overrides,
                out,
                write_markdown.then_some(markdown_out.as_path()),
            )
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { rule_key } => cmd_explain(&rule_key),
        Commands::Schema { kind } => cmd_schema(kind),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn cmd_check(
    config: &Utf8Path,
    input_path: &Utf8Path,
    overrides: Overrides,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let started_at = OffsetDateTime::now_utc();

    let result = (|| -> anyhow::Result<i32> {
        // Missing config file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(config).unwrap_or_default();
        let input_text = std::fs::read_to_string(input_path)
            .with_context(|| format!("read analysis input: {}", input_path))?;

        let output = run_check(CheckInput {
            input_text: &input_text,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if let Some(md_path) = markdown_out {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(md_path, &md).context("write markdown")?;
        }

        info!(
            findings = output.report.findings.len(),
            verdict = ?output.report.verdict,
            "report written to {}",
            report_out
        );
        Ok(report_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = failed_report(started_at, &format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("apkguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &ApkguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<ApkguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(rule_key: &str) -> anyhow::Result<()> {
    match run_explain(rule_key) {
        ExplainOutput::Found { rule_key, template } => {
            print!("{}", format_explanation(&rule_key, &template));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_keys,
        } => {
            eprint!("{}", format_not_found(&identifier, available_rule_keys));
            std::process::exit(1);
        }
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Report => schema_for!(ApkguardReport),
        SchemaKind::Config => schema_for!(apkguard_settings::ApkguardConfigV1),
    };
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{}", text);
    Ok(())
}
