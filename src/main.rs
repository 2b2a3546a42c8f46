//! untangle CLI entry point.

mod cli;

use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{Cli, Command, RunArgs};
use tracing_subscriber::EnvFilter;
use untangle::config::Config;
use untangle::diagnostics::{format_failure, print_parse_error};
use untangle::snapshot::SnapshotWriter;
use untangle::{PassObserver, deobfuscate_with_observer};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => run(&args),
        Command::Rules { json } => list_rules(json),
    }
}

/// Log to stderr, filtered by `UNTANGLE_LOG` (default `warn`); `-v` forces
/// `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("UNTANGLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &RunArgs) {
    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    args.apply_to(&mut config);
    let options = config.into_options();
    let multiple = args.inputs.len() > 1;
    if let (true, Some(dir)) = (multiple, &args.output) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error creating output directory {}: {e}", dir.display());
            std::process::exit(1);
        }
    }

    for input in &args.inputs {
        let source = match std::fs::read_to_string(input) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error reading {}: {e}", input.display());
                std::process::exit(1);
            }
        };

        let mut snapshots = args.snapshot_dir.as_ref().map(|dir| {
            // One subdirectory per input when there are several.
            let dir = if multiple { dir.join(stem(input)) } else { dir.clone() };
            match SnapshotWriter::create(&dir) {
                Ok(writer) => writer,
                Err(e) => {
                    eprintln!("Error creating snapshot directory {}: {e}", dir.display());
                    std::process::exit(1);
                }
            }
        });
        let observer = snapshots
            .as_mut()
            .map(|writer| writer as &mut (dyn PassObserver + Send));

        let output = match deobfuscate_with_observer(&source, &options, observer) {
            Ok(output) => output,
            Err(e) => {
                print_parse_error(&e, &source, &input.display().to_string());
                std::process::exit(1);
            }
        };

        for failure in &output.result.failures {
            eprintln!("warning: {}", format_failure(failure));
        }
        if args.trace {
            match serde_json::to_string_pretty(&output.result) {
                Ok(json) => eprintln!("{json}"),
                Err(e) => eprintln!("Error serializing trace: {e}"),
            }
        }

        match output_path(args.output.as_deref(), input, multiple) {
            Some(path) => {
                if let Err(e) = std::fs::write(&path, &output.code) {
                    eprintln!("Error writing {}: {e}", path.display());
                    std::process::exit(1);
                }
            }
            None => print!("{}", output.code),
        }
    }
}

/// Where the output for `input` goes; `None` means stdout.
fn output_path(output: Option<&Path>, input: &Path, multiple: bool) -> Option<PathBuf> {
    let output = output?;
    if multiple || output.is_dir() {
        Some(output.join(format!("{}.out.js", stem(input))))
    } else {
        Some(output.to_owned())
    }
}

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_owned())
}

fn list_rules(json: bool) {
    let rules = untangle::rules();
    if json {
        match serde_json::to_string_pretty(&rules) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing rules: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    for rule in rules {
        let disabled = if rule.enabled_by_default {
            ""
        } else {
            " (disabled by default)"
        };
        println!(
            "{:<32} {:>4}  {}{disabled}",
            rule.name, rule.phase, rule.description
        );
    }
}
