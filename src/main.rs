use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prdtrace::models::{EntityRef, EntityType, Severity};
use prdtrace::tree_render::render_tree;
use prdtrace::{EngineConfig, TraceEngine};

#[derive(Parser)]
#[command(name = "prdtrace")]
#[command(about = "Operational targets and requirement traceability for PRD documents")]
struct Cli {
    /// Root directory holding scenarios/ and resources/
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Bypass cached requirement trees and reports
    #[arg(long, global = true)]
    fresh: bool,

    #[command(subcommand)]
    command: Commands,
}

fn parse_entity_type(s: &str) -> Result<EntityType, String> {
    EntityType::from_str(s).ok_or_else(|| format!("unknown entity type '{}' (scenario, resource)", s))
}

#[derive(clap::Args)]
struct Entity {
    /// Entity type: scenario or resource
    #[arg(value_parser = parse_entity_type)]
    kind: EntityType,
    /// Entity name
    name: String,
}

impl Entity {
    fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.kind, self.name.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List operational targets parsed from the PRD
    Targets {
        #[command(flatten)]
        entity: Entity,
    },
    /// Link targets to requirements and list orphans
    Link {
        #[command(flatten)]
        entity: Entity,
    },
    /// Print the requirement import tree
    Tree {
        #[command(flatten)]
        entity: Entity,
    },
    /// Validate the PRD against the template
    Validate {
        #[command(flatten)]
        entity: Entity,
        /// Only check heading structure, choosing the best-fitting template
        #[arg(long)]
        structure: bool,
    },
    /// Print the quality report
    Report {
        #[command(flatten)]
        entity: Entity,
    },
}

/// Logs go to stderr so stdout stays clean JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "prdtrace=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = EngineConfig::from_env();
    if let Some(root) = cli.root {
        config.root = root;
    }
    tracing::debug!(root = %config.root.display(), "using root");
    let engine = TraceEngine::from_config(&config);

    match cli.command {
        Commands::Targets { entity } => {
            let entity = entity.to_ref();
            let targets = engine
                .targets(&entity)
                .with_context(|| format!("Failed to parse targets for {entity}"))?;
            print_json(&targets)?;
        }
        Commands::Link { entity } => {
            let entity = entity.to_ref();
            let linkage = engine
                .linkage(&entity, cli.fresh)
                .with_context(|| format!("Failed to link {entity}"))?;
            print_json(&linkage)?;
        }
        Commands::Tree { entity } => {
            let entity = entity.to_ref();
            let tree = engine
                .requirement_tree(&entity, cli.fresh)
                .with_context(|| format!("Failed to load requirements for {entity}"))?;
            print!("{}", render_tree(&tree));
        }
        Commands::Validate { entity, structure } => {
            let entity = entity.to_ref();
            if structure {
                print_json(&engine.check_structure(&entity)?)?;
            } else {
                let report = engine.validate(&entity)?;
                print_json(&report)?;
                let errors = report.error_count();
                if errors > 0 {
                    for issue in report
                        .content_issues
                        .iter()
                        .filter(|i| i.severity == Severity::Error)
                    {
                        tracing::warn!(
                            section = %issue.section,
                            severity = issue.severity.as_str(),
                            "{}",
                            issue.message
                        );
                    }
                    anyhow::bail!("{} has {} blocking template finding(s)", entity, errors);
                }
            }
        }
        Commands::Report { entity } => {
            let entity = entity.to_ref();
            let report = engine
                .quality_report(&entity, cli.fresh)
                .with_context(|| format!("Failed to build report for {entity}"))?;
            print_json(&report)?;
        }
    }

    Ok(())
}
