use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use numbox_cli::config::{
    load_matrix_config, load_ndarray_config, MatrixDemoConfig, NdarrayDemoConfig,
};
use numbox_cli::demo::{run_matrix_demo, run_ndarray_demo};
use numbox_core::Shape;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("NUMBOX_LOG", "error,numbox=info"))
        .init();

    let matches = Command::new("numbox")
        .version(clap::crate_version!())
        .about("Row-major NDArray, Vector and Matrix demonstrations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("ndarray")
                .about("Fill, reshape and update an integer NDArray, rendering each step")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("shape")
                        .short('s')
                        .long("shape")
                        .help("Initial shape, e.g. 2x3x4. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(Shape)),
                )
                .arg(
                    Arg::new("fill")
                        .short('f')
                        .long("fill")
                        .help("Fill value. Overrides the configuration file.")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("reshape")
                        .short('r')
                        .long("reshape")
                        .help("Target shape, e.g. 2x12. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(Shape)),
                )
                .arg(
                    Arg::new("scalar")
                        .long("scalar")
                        .help("Scalar added after reshaping. Overrides the configuration file.")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("matrix")
                .about("Render a filled matrix, its transpose and their product")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .help("Number of rows. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("cols")
                        .long("cols")
                        .help("Number of columns. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("fill")
                        .short('f')
                        .long("fill")
                        .help("Fill value. Overrides the configuration file.")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("ndarray", sub_m)) => handle_ndarray(sub_m),
        Some(("matrix", sub_m)) => handle_matrix(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = result {
        log::error!("numbox failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn handle_ndarray(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[numbox::ndarray] Using config: {:?}", config_path);
            load_ndarray_config(config_path)?
        }
        None => NdarrayDemoConfig::default(),
    };

    if let Some(shape) = matches.get_one::<Shape>("shape") {
        config.shape = shape.clone();
    }
    if let Some(fill) = matches.get_one::<i64>("fill") {
        config.fill = *fill;
    }
    if let Some(reshape) = matches.get_one::<Shape>("reshape") {
        config.reshape = reshape.clone();
    }
    if let Some(scalar) = matches.get_one::<i64>("scalar") {
        config.scalar = *scalar;
    }

    if matches.get_one::<PathBuf>("config").is_none() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[numbox::ndarray] Config:\n{}", default_json);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_ndarray_demo(&config, &mut out)
}

fn handle_matrix(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[numbox::matrix] Using config: {:?}", config_path);
            load_matrix_config(config_path)?
        }
        None => MatrixDemoConfig::default(),
    };

    if let Some(rows) = matches.get_one::<usize>("rows") {
        config.rows = *rows;
    }
    if let Some(cols) = matches.get_one::<usize>("cols") {
        config.cols = *cols;
    }
    if let Some(fill) = matches.get_one::<f64>("fill") {
        config.fill = *fill;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_matrix_demo(&config, &mut out)
}
