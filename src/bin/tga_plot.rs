use tga_wpl::plot::parse_cli;
use tga_wpl::{TgaError, TgaStats, SUCCESS};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let (csvin, pngout, first_temperature, second_temperature) = parse_cli();
    println!(
        "read stats from {} and plot to {}",
        csvin.to_str().unwrap(),
        pngout.to_str().unwrap()
    );
    let stats = match TgaStats::from_csv(&csvin) {
        Ok(s) => s,
        Err(e) => return abort(e),
    };
    let (first, second) = match stats.weight_losses(first_temperature, second_temperature) {
        Ok(losses) => losses,
        Err(e) => return abort(e),
    };
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
    e.exit_code()
}
