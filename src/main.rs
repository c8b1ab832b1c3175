use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use facesplit::config::ConfigSource;
use facesplit::{logging, Config, DatasetIndexer, SkippedPerson, SplitIndex, SplitSummary};

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    required: Option<usize>,
    percentage: Option<f64>,
    random: bool,
    max_images: Option<usize>,
    train_images: Option<usize>,
    seed: Option<u64>,
    json: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{flag} requires a value"),
    }
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("facesplit {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" => {
                cli.config_path = Some(PathBuf::from(value(&args, i, arg)?));
                i += 1;
            }
            "--required" => {
                let v = value(&args, i, arg)?;
                cli.required = Some(v.parse().with_context(|| format!("invalid --required: {v}"))?);
                i += 1;
            }
            "--percentage" => {
                let v = value(&args, i, arg)?;
                cli.percentage =
                    Some(v.parse().with_context(|| format!("invalid --percentage: {v}"))?);
                i += 1;
            }
            "--random" => {
                cli.random = true;
            }
            "--max" => {
                let v = value(&args, i, arg)?;
                cli.max_images = Some(v.parse().with_context(|| format!("invalid --max: {v}"))?);
                i += 1;
            }
            "--train" => {
                let v = value(&args, i, arg)?;
                cli.train_images = Some(v.parse().with_context(|| format!("invalid --train: {v}"))?);
                i += 1;
            }
            "--seed" => {
                let v = value(&args, i, arg)?;
                cli.seed = Some(v.parse().with_context(|| format!("invalid --seed: {v}"))?);
                i += 1;
            }
            "--json" => {
                cli.json = true;
            }
            _ if !arg.starts_with('-') && cli.root.is_none() => {
                cli.root = Some(PathBuf::from(arg));
            }
            _ => {
                eprintln!("Unknown argument: {arg}");
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Ok(cli)
}

fn print_help() {
    println!(
        r#"facesplit - per-person train/test split of a face image dataset

USAGE:
    facesplit [OPTIONS] [ROOT]

ARGS:
    ROOT                Dataset directory, one folder of images per person
                        (default: dataset.root from the config, "datasets")

OPTIONS:
    --config, -c PATH   Path to config file
    --required N        Fixed-count split: first N images of each person train
    --percentage P      Percentage split: fraction P in [0, 1] of each person trains
    --random            Random-sampling split (see --max, --train, --seed)
    --max N             Images sampled per person (default: 20)
    --train N           Sampled images that go to train (default: 6)
    --seed N            Sampling seed (default: 42)
    --json              Print the full index as JSON instead of the summary
    --version, -V       Show version
    --help, -h          Show this help message

ENVIRONMENT:
    FACESPLIT_CONFIG    Path to config file (overrides default location)
    FACESPLIT_LOG       Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/facesplit/config.toml"#
    );
}

/// Command line flags take priority over the config file. Choosing a mode on
/// the command line clears the modes that would otherwise win over it.
fn apply_overrides(config: &mut Config, cli: &CliArgs) {
    let split = &mut config.split;

    if let Some(required) = cli.required {
        split.random_sampling = false;
        split.train_percentage = None;
        split.required_no = Some(required);
    }
    if let Some(percentage) = cli.percentage {
        split.random_sampling = false;
        split.train_percentage = Some(percentage);
    }
    if cli.random {
        split.random_sampling = true;
    }
    if let Some(max) = cli.max_images {
        split.max_images_per_person = max;
    }
    if let Some(train) = cli.train_images {
        split.train_images_per_person = train;
    }
    if let Some(seed) = cli.seed {
        split.seed = seed;
    }
    if let Some(ref root) = cli.root {
        config.dataset.root = root.clone();
    }
}

#[derive(Serialize)]
struct Report<'a> {
    root: &'a Path,
    summary: SplitSummary,
    index: &'a SplitIndex,
    skipped: &'a [SkippedPerson],
}

fn main() -> Result<()> {
    let cli = parse_args()?;

    let (mut config, source) = match cli.config_path {
        Some(ref path) => (Config::load_from(path)?, ConfigSource::File(path.clone())),
        None => Config::load()?,
    };
    apply_overrides(&mut config, &cli);

    logging::init(config.logging.dir.clone()).context("Failed to initialize logging")?;
    if let ConfigSource::Defaults { missing } = source {
        warn!("Config file not found at {:?}, using defaults", missing);
    }

    let indexer = DatasetIndexer::from_config(&config)?;

    if cli.json {
        let report = Report {
            root: indexer.root(),
            summary: indexer.summary(),
            index: indexer.index(),
            skipped: indexer.skipped(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Dataset: {}", indexer.root().display());
        println!("Policy: {}", indexer.policy());
        println!();
        println!("{}", indexer.summary());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use facesplit::SplitPolicy;

    #[test]
    fn cli_mode_overrides_config_mode() {
        let mut config = Config::default();
        config.split.random_sampling = true;

        let cli = CliArgs {
            required: Some(4),
            ..CliArgs::default()
        };
        apply_overrides(&mut config, &cli);

        assert_eq!(config.split.resolve().unwrap(), SplitPolicy::fixed_count(4));
    }

    #[test]
    fn cli_random_keeps_config_sample_sizes() {
        let mut config = Config::default();
        config.split.max_images_per_person = 10;

        let cli = CliArgs {
            random: true,
            train_images: Some(3),
            seed: Some(1),
            root: Some(PathBuf::from("/faces")),
            ..CliArgs::default()
        };
        apply_overrides(&mut config, &cli);

        assert_eq!(
            config.split.resolve().unwrap(),
            SplitPolicy::RandomSampling {
                max_images: 10,
                train_images: 3,
                seed: 1
            }
        );
        assert_eq!(config.dataset.root, PathBuf::from("/faces"));
    }
}
