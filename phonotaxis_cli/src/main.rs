// Phonotaxis word generator: CLI entry point.
//
// Loads a language config (or the built-in default), builds and reweights
// its phonotactic tree, and prints a batch of generated words, one per line.
// Words that hit an unreachable state are reported on stderr and skipped;
// the rest of the batch still prints.
//
// Usage:
//   generate [CONFIG.json] [OPTIONS]
//     --count <N>     Number of words (default: the config's word_count)
//     --seed <N>      Seed for reproducible output (default: config seed, else clock)
//     --paths         Also print each syllable's node path
//     --help, -h      Show this help

use phonotaxis_engine::{LanguageConfig, Session, default_config};
use phonotaxis_phonology::IpaRenderer;
use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config_path: Option<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    paths: bool,
    help: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        return;
    }
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config_path {
        Some(path) => LanguageConfig::load(path)?,
        None => default_config(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let count = cli.count.unwrap_or(config.word_count);

    let inventory = config.inventory()?;
    let mut session = Session::from_config_seeded(&config)?;
    let lengths = session.lengths();

    println!("=== Phonotaxis Word Generator ===");
    match &cli.config_path {
        Some(path) => println!("Language: {}", path.display()),
        None => println!("Language: built-in default"),
    }
    println!("Inventory: {}", inventory.symbols(&IpaRenderer).join(" "));
    println!(
        "Tree: {} nodes, {} edges",
        session.tree().node_count(),
        session.tree().edge_count()
    );
    println!(
        "Word length: {:?} / {:?} / {:?}",
        lengths.min(),
        lengths.median(),
        lengths.max()
    );
    if let Some(s) = config.seed {
        println!("Seed: {s}");
    }
    println!();

    let batch = session.generate(count);
    for word in &batch.words {
        if cli.paths {
            let paths: Vec<String> = word
                .syllables
                .iter()
                .map(|nodes| {
                    nodes
                        .iter()
                        .map(|n| n.0.to_string())
                        .collect::<Vec<_>>()
                        .join("-")
                })
                .collect();
            println!("{:<24} {}", word.text, paths.join(" | "));
        } else {
            println!("{}", word.text);
        }
    }
    for failure in &batch.failures {
        eprintln!(
            "  word {} ({} syllables) failed: {}",
            failure.index + 1,
            failure.syllables,
            failure.error
        );
    }
    if !batch.failures.is_empty() {
        println!();
        println!(
            "{} of {} words generated.",
            batch.words.len(),
            batch.words.len() + batch.failures.len()
        );
    }
    Ok(())
}

/// Parse arguments after the program name. The first bare argument is the
/// config path; any second one is an error.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                i += 1;
                cli.count = Some(parse_value(args.get(i), "--count")?);
            }
            "--seed" => {
                i += 1;
                cli.seed = Some(parse_value(args.get(i), "--seed")?);
            }
            "--paths" => cli.paths = true,
            "--help" | "-h" => cli.help = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown argument: {other}"));
            }
            path => {
                if cli.config_path.is_some() {
                    return Err(format!("Unexpected argument: {path}"));
                }
                cli.config_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(cli)
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{flag} requires a valid number"))
}

fn print_usage() {
    println!("Usage: generate [CONFIG.json] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --count <N>     Number of words (default: the config's word_count)");
    println!("  --seed <N>      Seed for reproducible output (default: config seed, else clock)");
    println!("  --paths         Also print each syllable's node path");
    println!("  --help, -h      Show this help");
}
