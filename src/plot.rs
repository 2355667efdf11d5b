use super::{DEFAULT_FIRST_TEMPERATURE, DEFAULT_SECOND_TEMPERATURE, VERSION};
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of an analysis csv.
pub fn parse_cli() -> (PathBuf, PathBuf, f64, f64) {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name for the analysis csv file")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .required(true)
        .default_value("data_analysis.csv");
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file")
        .short("o")
        .long("pngfile")
        .takes_value(true);
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
    let cli_args = App::new("tga_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the TGA weight percent curve")
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_first)
        .arg(arg_second)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default());
    let pngout = match cli_args.value_of("output_pngfile") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut pngout = csvin.clone();
            pngout.set_extension("png");
            pngout
        }
    };
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
    return (csvin, pngout, first_temperature, second_temperature);
}
