//! Redirect resolver CLI.
//!
//! Three entry points over the same library core:
//! - `check`: load and validate a rule file, reporting every defect
//! - `resolve`: map paths to destinations, as text or JSON lines
//! - `watch`: resolve paths from stdin while hot-reloading the rule file

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;

use doc_redirects::config::{load_config, ConfigError, ConfigWatcher};
use doc_redirects::observability::logging::init_logging;
use doc_redirects::resolver::{Resolver, SharedResolver};

#[derive(Parser)]
#[command(name = "doc-redirects", version, about = "Versioned documentation redirect resolver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a rule file and report every defect.
    Check {
        /// Path to the rule file.
        config: PathBuf,
    },
    /// Resolve paths against a rule file (from arguments, or stdin if none).
    Resolve {
        /// Path to the rule file.
        config: PathBuf,
        /// Documentation paths to resolve.
        paths: Vec<String>,
        /// Emit JSON lines instead of `path -> destination`.
        #[arg(long)]
        json: bool,
    },
    /// Resolve paths from stdin while hot-reloading the rule file on change.
    Watch {
        /// Path to the rule file.
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging("doc_redirects=info");

    let cli = Cli::parse();
    match cli.command {
        Command::Check { config } => check(&config),
        Command::Resolve {
            config,
            paths,
            json,
        } => resolve(&config, paths, json),
        Command::Watch { config } => watch(&config).await,
    }
}

fn check(path: &PathBuf) -> ExitCode {
    match load_config(path) {
        Ok(resolver) => {
            println!(
                "ok: prefix `{}`, {} versions, {} rules",
                resolver.prefix(),
                resolver.registry().len(),
                resolver.table().len()
            );
            ExitCode::SUCCESS
        }
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                eprintln!("error: {error}");
            }
            eprintln!("{} error(s) found", errors.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve(path: &PathBuf, paths: Vec<String>, json: bool) -> ExitCode {
    let resolver = match load_config(path) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let paths: Vec<String> = if paths.is_empty() {
        match std::io::stdin().lock().lines().collect() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("error: failed to read stdin: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        paths
    };

    let mut missed = false;
    for input in &paths {
        match resolver.resolve(input) {
            Ok(hit) if json => match serde_json::to_string(&hit) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    missed = true;
                }
            },
            Ok(hit) => println!("{} -> {}", hit.path, hit.destination),
            Err(e) => {
                eprintln!("{e}");
                missed = true;
            }
        }
    }

    if missed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn watch(path: &PathBuf) -> ExitCode {
    let resolver = match load_config(path) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        prefix = %resolver.prefix(),
        versions = resolver.registry().len(),
        rules = resolver.table().len(),
        "Rule set loaded"
    );

    let shared = SharedResolver::new(resolver);
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = match watcher.run() {
        Ok(watcher) => watcher,
        Err(e) => {
            eprintln!("error: failed to start watcher: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(input)) => print_resolution(&shared.load(), input.trim()),
                Ok(None) => break,
                Err(e) => {
                    eprintln!("error: failed to read stdin: {e}");
                    return ExitCode::FAILURE;
                }
            },
            Some(resolver) = updates.recv() => {
                tracing::info!(
                    versions = resolver.registry().len(),
                    rules = resolver.table().len(),
                    "Rule set reloaded"
                );
                shared.store(resolver);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_resolution(resolver: &Resolver, input: &str) {
    if input.is_empty() {
        return;
    }
    match resolver.resolve(input) {
        Ok(hit) => println!("{} -> {}", hit.path, hit.destination),
        Err(e) => println!("{e}"),
    }
}
