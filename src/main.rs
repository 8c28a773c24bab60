use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use proxyform::form::check_document;
use proxyform::models::Features;
use proxyform::schema::server_form;
use proxyform::uci::UciDocument;

/// Schema and validation tool for homeproxy server configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the server entries of a uci config file
    Check {
        /// Path to the config file (e.g. /etc/config/homeproxy)
        file: PathBuf,

        /// Comma-separated sing-box build tags (e.g. with_quic,with_acme)
        #[arg(long, value_name = "TAGS")]
        features: Option<String>,

        /// File holding `sing-box version` output to read the tags from
        #[arg(long, value_name = "FILE")]
        tags_from: Option<PathBuf>,
    },

    /// Print the form schema as JSON
    Schema {
        /// Comma-separated sing-box build tags (e.g. with_quic,with_acme)
        #[arg(long, value_name = "TAGS")]
        features: Option<String>,

        /// File holding `sing-box version` output to read the tags from
        #[arg(long, value_name = "FILE")]
        tags_from: Option<PathBuf>,
    },
}

/// Resolve the feature set from the flags. Without either flag every
/// capability is assumed, matching a full sing-box build.
fn resolve_features(features: Option<&str>, tags_from: Option<&PathBuf>) -> anyhow::Result<Features> {
    if let Some(tags) = features {
        return Ok(Features::from_tags(tags.split(',')));
    }
    if let Some(path) = tags_from {
        let output = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Features::from_version_output(&output));
    }
    Ok(Features::all())
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    match args.command {
        Command::Check {
            file,
            features,
            tags_from,
        } => {
            let features = resolve_features(features.as_deref(), tags_from.as_ref())?;
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let doc = UciDocument::parse(&content)
                .with_context(|| format!("failed to parse {}", file.display()))?;

            let schema = server_form(features);
            let findings = check_document(&schema, &doc);
            if findings.is_empty() {
                info!("{}: all entries valid", file.display());
                return Ok(());
            }

            for finding in &findings {
                println!("{}", finding);
            }
            anyhow::bail!("{} finding(s) in {}", findings.len(), file.display());
        }
        Command::Schema { features, tags_from } => {
            let features = resolve_features(features.as_deref(), tags_from.as_ref())?;
            let schema = server_form(features);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
