use std::path::PathBuf;
use std::process::Command;

use tga_wpl::{TgaData, TgaStats};

const FIRST_TEMPERATURE: f64 = 100.004;
const SECOND_TEMPERATURE: f64 = 770.098;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(name);
    p
}

/// A full heating ramp with the two reference rows of the PAA/PDADMA/KCl run
/// pinned to their measured temperatures and weight percents.
fn write_sample_csv(path: &PathBuf) {
    let mut lines = String::with_capacity(5700 * 32);
    for i in 0..5700 {
        let (temperature, weight_pct) = if i == 1662 {
            (100.004, 96.3208)
        } else if i == 5697 {
            (770.098, 26.3771)
        } else {
            (30.0 + 0.153 * i as f64, 100.0 - 0.013 * i as f64)
        };
        let time = i as f64 / 10.0;
        let weight = 5.0 * weight_pct / 100.0;
        lines.push_str(&format!(
            "{},{},{},{}\n",
            time, temperature, weight, weight_pct
        ));
    }
    std::fs::write(path, lines).unwrap();
}

#[test]
fn pipeline_resolves_the_reference_rows_and_losses() {
    let csvin = tmp_path("tga_wpl_e2e_input.csv");
    let csvout = tmp_path("tga_wpl_e2e_input_analysis.csv");
    write_sample_csv(&csvin);

    let data = TgaData::from_csv(&csvin).unwrap();
    assert_eq!(data.len(), 5700);
    let stats = data.extract_stats();
    assert_eq!(stats.temperature.len(), 5700);

    let (first, second) = stats
        .weight_losses(FIRST_TEMPERATURE, SECOND_TEMPERATURE)
        .unwrap();
    assert_eq!(first.row, 1662);
    assert_eq!(second.row, 5697);
    assert_eq!(first.deviation(), 0.0);
    assert_eq!(second.deviation(), 0.0);
    assert!((first.loss_pct - 3.6792).abs() < 1e-9);
    assert!((second.loss_pct - 69.9437).abs() < 1e-9);
    assert_eq!(
        first.report_line(),
        "At temperature: 100.004 °C, the weight percent loss is: 3.6792%"
    );
    assert_eq!(
        second.report_line(),
        "At temperature: 770.098 °C, the weight percent loss is: 69.9437%"
    );

    stats.to_csv(&csvout).unwrap();
    let again = TgaStats::from_csv(&csvout).unwrap();
    assert_eq!(again.temperature, stats.temperature);
    assert_eq!(again.weight_pct, stats.weight_pct);

    std::fs::remove_file(&csvin).ok();
    std::fs::remove_file(&csvout).ok();
}

#[test]
fn missing_input_file_exits_with_io_error_and_warns() {
    let out = Command::new(env!("CARGO_BIN_EXE_tga_analyze"))
        .arg("-c")
        .arg("tga_wpl_e2e_missing.csv")
        .current_dir(std::env::temp_dir())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Problems reading file"));
    assert!(!tmp_path("tga_wpl_e2e_missing_analysis.csv").exists());
    assert!(!tmp_path("tga_wpl_e2e_missing_analysis.png").exists());
}

#[test]
fn malformed_input_exits_with_invalid_data() {
    let csvin = tmp_path("tga_wpl_e2e_malformed.csv");
    std::fs::write(&csvin, "0.0,30.0,5.0\n").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_tga_analyze"))
        .arg("-c")
        .arg(&csvin)
        .current_dir(std::env::temp_dir())
        .output()
        .unwrap();
    std::fs::remove_file(&csvin).ok();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid data"));
    assert!(!tmp_path("tga_wpl_e2e_malformed_analysis.csv").exists());
    assert!(!tmp_path("tga_wpl_e2e_malformed_analysis.png").exists());
}

#[test]
fn out_of_range_target_fails_before_the_png() {
    let csvin = tmp_path("tga_wpl_e2e_short.csv");
    std::fs::write(
        &csvin,
        "0.0,30.0,5.0,100.0\n1.0,100.0,4.8,96.0\n2.0,900.0,1.3,26.0\n",
    )
    .unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_tga_analyze"))
        .arg("-c")
        .arg(&csvin)
        .arg("--second_temperature")
        .arg("2000.0")
        .current_dir(std::env::temp_dir())
        .output()
        .unwrap();
    std::fs::remove_file(&csvin).ok();
    let csvout = tmp_path("tga_wpl_e2e_short_analysis.csv");
    let pngout = tmp_path("tga_wpl_e2e_short_analysis.png");
    let wrote_csv = csvout.exists();
    std::fs::remove_file(&csvout).ok();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("outside the measured range"));
    // the reduced csv is written before the losses are resolved,
    // the png never is
    assert!(wrote_csv);
    assert!(!pngout.exists());
}
