use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use category_tree_core::verifier::{self, Diagnostic, Severity};
use category_tree_core::{
    fingerprint, Error, HomePolicy, JsonFileSource, NormalizedCategoryNode, Normalizer, Result,
};

/// category-tree - category tree normalizer CLI
///
/// Normalize raw category snapshots, fingerprint them, and verify stored
/// normalized snapshots.
#[derive(Parser)]
#[command(name = "category-tree", version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw category snapshot and print it as JSON
    Normalize {
        /// Path to raw snapshot (.json)
        file: PathBuf,
        /// Path to home policy (.json)
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Compute the SHA-256 fingerprint of a normalized raw snapshot
    Hash {
        /// Path to raw snapshot (.json)
        file: PathBuf,
        /// Path to home policy (.json)
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Verify a stored normalized snapshot
    Verify {
        /// Path to normalized snapshot (.json)
        file: PathBuf,
        /// Path to home policy (.json)
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Normalize {
            file,
            policy,
            pretty,
        } => {
            let tree = normalize_file(&file, policy.as_deref()).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{}", json);
            Ok(0)
        }
        Commands::Hash { file, policy } => {
            let tree = normalize_file(&file, policy.as_deref()).await?;
            println!("{}", fingerprint(&tree)?);
            Ok(0)
        }
        Commands::Verify { file, policy, json } => {
            let policy = load_policy(policy.as_deref())?;
            let text = tokio::fs::read_to_string(&file)
                .await
                .map_err(|source| Error::Io {
                    path: file.clone(),
                    source,
                })?;
            let tree: Vec<NormalizedCategoryNode> = serde_json::from_str(&text)?;
            let result = verifier::verify(&tree, &policy);

            if json {
                let diagnostics: Vec<_> = result.diagnostics.iter().map(diagnostic_json).collect();
                let report = serde_json::json!({
                    "valid": result.is_valid(),
                    "errors": result.errors().len(),
                    "warnings": result.warnings().len(),
                    "diagnostics": diagnostics,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for d in &result.diagnostics {
                    match d.severity {
                        Severity::Error => eprintln!("{}", d.to_string().red()),
                        Severity::Warning => eprintln!("{}", d.to_string().yellow()),
                    }
                }
                if result.is_valid() {
                    println!("{} {} is valid", "✓".green().bold(), file.display());
                } else {
                    println!(
                        "{} {}: {} error(s)",
                        "✗".red().bold(),
                        file.display(),
                        result.errors().len()
                    );
                }
            }

            Ok(if result.is_valid() { 0 } else { 1 })
        }
        Commands::Version => {
            println!(
                "category-tree {} (category-tree-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            Ok(0)
        }
    }
}

fn load_policy(path: Option<&Path>) -> Result<HomePolicy> {
    match path {
        Some(path) => {
            let policy = HomePolicy::from_file(path)?;
            debug!(path = %path.display(), ?policy, "loaded home policy");
            Ok(policy)
        }
        None => Ok(HomePolicy::default()),
    }
}

async fn normalize_file(
    file: &Path,
    policy: Option<&Path>,
) -> Result<Vec<NormalizedCategoryNode>> {
    let normalizer = Normalizer::new(load_policy(policy)?);
    normalizer.load(&JsonFileSource::new(file)).await
}

fn diagnostic_json(d: &Diagnostic) -> serde_json::Value {
    let severity = match d.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    serde_json::json!({
        "severity": severity,
        "kind": d.kind.to_string(),
        "message": d.message,
        "path": d.path,
    })
}
