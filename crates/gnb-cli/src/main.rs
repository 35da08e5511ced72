use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use gnb_classifiers::config::ZeroVariancePolicy;
use gnb_cli::evaluate::{load_run_config, run_evaluation, RunConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("GNB_LOG", "error,gnb=info"))
        .init();

    let matches = Command::new("gnb")
        .version(clap::crate_version!())
        .about("Gaussian naive Bayes evaluated over repeated random train/test splits")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the resampling evaluation on a labelled CSV dataset")
                .arg(
                    Arg::new("data")
                        .help("Path to the CSV dataset (header row, one integer label column)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON run configuration")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("label_column")
                        .short('l')
                        .long("label-column")
                        .help("Name of the label column. Overrides the configuration file.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("repetitions")
                        .short('n')
                        .long("repetitions")
                        .help("Number of realizations. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("test_fraction")
                        .short('t')
                        .long("test-fraction")
                        .help("Fraction of samples held out per realization, in (0, 1).")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("zero_variance")
                        .long("zero-variance")
                        .help("How to treat features with zero class variance.")
                        .value_parser(["exact", "epsilon", "reject"]),
                )
                .arg(
                    Arg::new("surface_out")
                        .long("surface-out")
                        .help("Write the two-feature decision surface grid to this CSV file.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("surface_step")
                        .long("surface-step")
                        .help("Grid spacing for the decision surface.")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => handle_run(run_matches),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let data_path: &PathBuf = matches
        .get_one("data")
        .ok_or_else(|| anyhow::anyhow!("missing dataset path"))?;

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[gnb] Using config: {:?}", config_path);
            load_run_config(config_path)?
        }
        None => RunConfig::default(),
    };

    if let Some(label) = matches.get_one::<String>("label_column") {
        config.label_column = label.clone();
    }
    if let Some(&repetitions) = matches.get_one::<usize>("repetitions") {
        config.resample.repetitions = repetitions;
    }
    if let Some(&fraction) = matches.get_one::<f64>("test_fraction") {
        config.resample.test_fraction = fraction;
    }
    if let Some(policy) = matches.get_one::<String>("zero_variance") {
        config.resample.model.zero_variance =
            ZeroVariancePolicy::from_str(policy).map_err(anyhow::Error::msg)?;
    }
    if let Some(out) = matches.get_one::<PathBuf>("surface_out") {
        config.surface_out = Some(out.clone());
    }
    if let Some(&step) = matches.get_one::<f64>("surface_step") {
        config.surface_step = step;
    }

    log::info!("[gnb] Evaluating {:?}", data_path);
    match run_evaluation(data_path, &config) {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
