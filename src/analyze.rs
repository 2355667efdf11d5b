use super::{DEFAULT_DATA_FILE, DEFAULT_FIRST_TEMPERATURE, DEFAULT_SECOND_TEMPERATURE, VERSION};
use clap::{App, Arg};
use std::path::PathBuf;

/// Builds the CLI for the TGA analysis pipeline.
/// Kept separate from the parsing so the help can also be printed
/// when the data file cannot be read.
pub fn build_cli() -> App<'static, 'static> {
    let arg_csvin = Arg::with_name("csv_data_file")
        .help("location (directory and file name) of the csv file with data to analyze")
        .short("c")
        .long("csv_data_file")
        .takes_value(true)
        .default_value(DEFAULT_DATA_FILE);
    let arg_first = Arg::with_name("first_temperature")
        .help("first target temperature in °C, loss is taken from the initial 100 %")
        .long("first_temperature")
        .takes_value(true)
        .default_value(DEFAULT_FIRST_TEMPERATURE);
    let arg_second = Arg::with_name("second_temperature")
        .help("second target temperature in °C, loss is taken from the first target")
        .long("second_temperature")
        .takes_value(true)
        .default_value(DEFAULT_SECOND_TEMPERATURE);
    let arg_verbose = Arg::with_name("verbose")
        .help("print the extracted table and the matched rows")
        .short("v")
        .long("verbose")
        .takes_value(false);
    App::new("tga_analyze")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to compute and plot the TGA weight percent loss")
        .arg(arg_csvin)
        .arg(arg_first)
        .arg(arg_second)
        .arg(arg_verbose)
}

/// Takes the CLI arguments that control the TGA analysis.
pub fn parse_cli() -> (PathBuf, f64, f64, bool) {
    let cli_args = build_cli().get_matches();
    let csvin = PathBuf::from(cli_args.value_of("csv_data_file").unwrap_or_default());
    let first_temperature = cli_args
        .value_of("first_temperature")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap();
    let second_temperature = cli_args
        .value_of("second_temperature")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap();
    let verbose: bool = cli_args.is_present("verbose");
    return (csvin, first_temperature, second_temperature, verbose);
}
