use std::path::PathBuf;

use tga_wpl::analyze::{build_cli, parse_cli};
use tga_wpl::{analysis_base_name, TgaData, TgaError, SUCCESS};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let (csvin, first_temperature, second_temperature, verbose) = parse_cli();
    let base = analysis_base_name(&csvin);
    let csvout = PathBuf::from(format!("{}.csv", base));
    let pngout = PathBuf::from(format!("{}.png", base));
    println!(
        "read data from {} and save the analysis to {} and {}",
        csvin.to_str().unwrap(),
        csvout.to_str().unwrap(),
        pngout.to_str().unwrap()
    );
    let data = match TgaData::from_csv(&csvin) {
        Ok(d) => d,
        Err(e) => return abort(e),
    };
    let stats = data.extract_stats();
    if verbose {
        print!("{}", stats);
    }
    if let Err(e) = stats.to_csv(&csvout) {
        return abort(e);
    }
    println!("Wrote file: {}", csvout.to_str().unwrap());
    let (first, second) = match stats.weight_losses(first_temperature, second_temperature) {
        Ok(losses) => losses,
        Err(e) => return abort(e),
    };
    if verbose {
        for wl in [first, second].iter() {
            println!(
                "target {} °C matched row {} at {} °C, deviation {:.3} °C",
                wl.target_temp,
                wl.row,
                wl.matched_temp,
                wl.deviation()
            );
        }
    }
    if let Err(e) = stats.plot_tga(&pngout, &[first, second]) {
        return abort(e);
    }
    println!("{}", first.report_line());
    println!("{}", second.report_line());
    println!("Wrote file: {}", pngout.to_str().unwrap());
    SUCCESS
}

fn abort(e: TgaError) -> i32 {
    eprintln!("WARNING: {}", e);
    if e.is_read() {
        let mut cli = build_cli();
        cli.print_help().ok();
        println!();
    }
    e.exit_code()
}
