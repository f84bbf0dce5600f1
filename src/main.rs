//! Command-line access to translation catalogues.
//!
//! Usage:
//!   ts-catalogue lookup <file> <context> <source>   # Translate one string from a file
//!   ts-catalogue translate <context> <source>       # Translate using the configured catalogues
//!   ts-catalogue stats <file>...                    # Completion statistics as JSON
//!   ts-catalogue check <file>...                    # Validate catalogues (exit 1 on errors)

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};
use ts_catalogue::catalogue::{Catalogue, CatalogueStats, CatalogueValidator};
use ts_catalogue::config::Config;

fn print_usage() {
    eprintln!(
        "Usage:
  ts-catalogue lookup <file> <context> <source>
  ts-catalogue translate <context> <source>
  ts-catalogue stats <file>...
  ts-catalogue check <file>...

Environment (translate):
  CATALOGUE_DIR      Directory holding .ts files (default: resources/i18n)
  CATALOGUE_DOMAINS  Comma-separated catalogue names (default: settings,ultralytics_ui)
  APP_LANGUAGE       Locale code or Auto (default: Auto)"
    );
}

fn load(path: &str) -> Result<Catalogue> {
    Catalogue::load(Path::new(path)).with_context(|| format!("Failed to load catalogue {}", path))
}

fn lookup_command(args: &[String]) -> Result<()> {
    let [file, context, source] = args else {
        anyhow::bail!("lookup expects <file> <context> <source>");
    };

    let catalogue = load(file)?;
    println!("{}", catalogue.lookup(context, source));
    Ok(())
}

fn translate_command(args: &[String]) -> Result<()> {
    let [context, source] = args else {
        anyhow::bail!("translate expects <context> <source>");
    };

    let config = Config::from_env()?;
    let translator = config.translator()?;
    info!(
        "Translating with {} ({} catalogue(s))",
        translator.locale(),
        translator.catalogues().len()
    );

    println!("{}", translator.translate(context, source));
    Ok(())
}

fn stats_command(files: &[String]) -> Result<()> {
    if files.is_empty() {
        anyhow::bail!("stats expects at least one <file>");
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let stats = CatalogueStats::collect(&load(file)?);
        info!("{}: {}", file, stats.summary());
        reports.push(stats);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

/// Returns whether every catalogue passed without errors.
fn check_command(files: &[String]) -> Result<bool> {
    if files.is_empty() {
        anyhow::bail!("check expects at least one <file>");
    }

    let mut passed = true;
    for file in files {
        let report = CatalogueValidator::validate(&load(file)?);

        for warning in &report.warnings {
            warn!("{}: {}", file, warning);
        }
        for error in &report.errors {
            eprintln!("{}: error: {}", file, error);
        }

        if report.has_errors() {
            passed = false;
        } else {
            info!("✓ {} ({} warning(s))", file, report.warnings.len());
        }
    }

    Ok(passed)
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ts_catalogue=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];
    let rest = &args[2..];

    match command.as_str() {
        "lookup" => lookup_command(rest),
        "translate" => translate_command(rest),
        "stats" => stats_command(rest),
        "check" => {
            if !check_command(rest)? {
                std::process::exit(1);
            }
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}
