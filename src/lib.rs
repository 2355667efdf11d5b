use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
pub mod analyze;
pub mod plot;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const SUCCESS: i32 = 0;
pub const INVALID_DATA: i32 = 1;
pub const IO_ERROR: i32 = 2;

pub const DEFAULT_DATA_FILE: &str = "data.csv";
pub const DEFAULT_FIRST_TEMPERATURE: &str = "100.004";
pub const DEFAULT_SECOND_TEMPERATURE: &str = "770.098";

#[derive(Debug, Error)]
pub enum TgaError {
    #[error("Problems reading file {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Problems writing file {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("target temperature {target} °C is outside the measured range {min} to {max} °C")]
    OutOfRange { target: f64, min: f64, max: f64 },
    #[error("could not render plot: {0}")]
    Plot(String),
}

impl TgaError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TgaError::Read { .. } | TgaError::Write { .. } | TgaError::Plot(_) => IO_ERROR,
            TgaError::InvalidData(_) | TgaError::OutOfRange { .. } => INVALID_DATA,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, TgaError::Read { .. })
    }
}

/// The main struct for the raw TGA acquisition, one vector per instrument column:
/// time [min], temperature [°C], weight [mg], weight percent [%].
/// Rows keep the acquisition order of the file.
#[derive(Debug, Clone)]
pub struct TgaData {
    pub time: Vec<f64>,
    pub temperature: Vec<f64>,
    pub weight: Vec<f64>,
    pub weight_pct: Vec<f64>,
}

impl TgaData {
    pub fn new(capacity: usize) -> TgaData {
        TgaData {
            time: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            weight: Vec::with_capacity(capacity),
            weight_pct: Vec::with_capacity(capacity),
        }
    }

    /// Init a TgaData from csv: comma separated, no header,
    /// exactly 4 numeric fields per row.
    /// Blank lines are skipped, anything else malformed is invalid data;
    /// the file must contain at least one data row.
    pub fn from_csv(fin: &Path) -> Result<TgaData, TgaError> {
        let file = File::open(fin).map_err(|e| TgaError::Read {
            path: fin.to_path_buf(),
            source: e,
        })?;
        let buf = BufReader::new(file);
        let mut data = TgaData::new(10000);
        for (i, l) in buf.lines().enumerate() {
            let l = l.map_err(|e| TgaError::Read {
                path: fin.to_path_buf(),
                source: e,
            })?;
            if l.trim().is_empty() {
                continue;
            }
            let row = parse_csv_row(&l, i + 1, 4)?;
            data.time.push(row[0]);
            data.temperature.push(row[1]);
            data.weight.push(row[2]);
            data.weight_pct.push(row[3]);
        }
        if data.is_empty() {
            return Err(TgaError::InvalidData(format!(
                "{} contains no data rows",
                fin.display()
            )));
        }
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// project the acquisition onto the temperature and weight percent columns,
    /// preserving the row order
    pub fn extract_stats(&self) -> TgaStats {
        TgaStats {
            temperature: self.temperature.clone(),
            weight_pct: self.weight_pct.clone(),
        }
    }
}

/// The temperature and weight percent columns of an acquisition,
/// the part of the data the loss analysis and the plot work on.
#[derive(Debug, Clone)]
pub struct TgaStats {
    pub temperature: Vec<f64>,
    pub weight_pct: Vec<f64>,
}

impl TgaStats {
    pub fn new(capacity: usize) -> TgaStats {
        TgaStats {
            temperature: Vec::with_capacity(capacity),
            weight_pct: Vec::with_capacity(capacity),
        }
    }

    /// Init a TgaStats from a previously written analysis csv:
    /// comma separated, no header, 2 numeric fields per row.
    pub fn from_csv(fin: &Path) -> Result<TgaStats, TgaError> {
        let file = File::open(fin).map_err(|e| TgaError::Read {
            path: fin.to_path_buf(),
            source: e,
        })?;
        let buf = BufReader::new(file);
        let mut stats = TgaStats::new(10000);
        for (i, l) in buf.lines().enumerate() {
            let l = l.map_err(|e| TgaError::Read {
                path: fin.to_path_buf(),
                source: e,
            })?;
            if l.trim().is_empty() {
                continue;
            }
            let row = parse_csv_row(&l, i + 1, 2)?;
            stats.temperature.push(row[0]);
            stats.weight_pct.push(row[1]);
        }
        if stats.temperature.is_empty() {
            return Err(TgaError::InvalidData(format!(
                "{} contains no data rows",
                fin.display()
            )));
        }
        Ok(stats)
    }

    /// writes the temperature and weight percent columns as csv rows at the given path,
    /// no header, default float formatting so reading the file back is lossless
    pub fn to_csv(&self, fout: &Path) -> Result<(), TgaError> {
        let file = File::create(fout).map_err(|e| TgaError::Write {
            path: fout.to_path_buf(),
            source: e,
        })?;
        let mut buf = BufWriter::new(file);
        for (t, wp) in self.temperature.iter().zip(self.weight_pct.iter()) {
            buf.write_all(format!("{},{}\n", t, wp).as_bytes())
                .map_err(|e| TgaError::Write {
                    path: fout.to_path_buf(),
                    source: e,
                })?;
        }
        buf.flush().map_err(|e| TgaError::Write {
            path: fout.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// finds the sample row whose temperature is nearest to the target,
    /// returns the row index and the temperature actually measured there;
    /// targets outside the measured range are rejected
    pub fn nearest_temperature(&self, target: f64) -> Result<(usize, f64), TgaError> {
        if self.temperature.is_empty() {
            return Err(TgaError::InvalidData(String::from(
                "no rows to search for the target temperature",
            )));
        }
        let (tmin, tmax) = min_and_max(&self.temperature[..]);
        if target < tmin || target > tmax {
            return Err(TgaError::OutOfRange {
                target,
                min: tmin,
                max: tmax,
            });
        }
        let mut row = 0;
        let mut deviation = f64::INFINITY;
        for (i, t) in self.temperature.iter().enumerate() {
            let d = (t - target).abs();
            if d < deviation {
                deviation = d;
                row = i;
            }
        }
        Ok((row, self.temperature[row]))
    }

    /// resolves both target temperatures and computes the weight percent losses:
    /// from the initial 100 % down to the first target,
    /// and between the first and the second target
    pub fn weight_losses(
        &self,
        t_first: f64,
        t_second: f64,
    ) -> Result<(WeightLoss, WeightLoss), TgaError> {
        let (row_first, matched_first) = self.nearest_temperature(t_first)?;
        let (row_second, matched_second) = self.nearest_temperature(t_second)?;
        let wp_first = self.weight_pct[row_first];
        let wp_second = self.weight_pct[row_second];
        let first = WeightLoss {
            target_temp: t_first,
            matched_temp: matched_first,
            row: row_first,
            weight_pct: wp_first,
            loss_pct: 100.0 - wp_first,
        };
        let second = WeightLoss {
            target_temp: t_second,
            matched_temp: matched_second,
            row: row_second,
            weight_pct: wp_second,
            loss_pct: wp_first - wp_second,
        };
        Ok((first, second))
    }

    /// plots the weight percent against temperature to png
    /// and marks the resolved loss points on the curve
    pub fn plot_tga(&self, fout: &Path, losses: &[WeightLoss]) -> Result<(), TgaError> {
        self.render_png(fout, losses)
            .map_err(|e| TgaError::Plot(e.to_string()))
    }

    fn render_png(
        &self,
        fout: &Path,
        losses: &[WeightLoss],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (xmin, xmax) = min_and_max(&self.temperature[..]);
        let xspan = xmax - xmin;
        let xmargin = xspan / 20.;
        let (ymin, ymax) = min_and_max(&self.weight_pct[..]);
        let yspan = ymax - ymin;
        let ymargin = yspan / 10.;
        let root = BitMapBackend::new(fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("TGA test for PAA/PDADMA/KCl", ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin - xmargin..xmax + xmargin, ymin - ymargin..ymax + ymargin)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .y_desc("Weight Percentage")
            .y_label_formatter(&|y: &f64| format!("{:5}", y))
            .x_desc("Temperature")
            .draw()?;
        let line = LineSeries::new(
            self.temperature
                .iter()
                .zip(self.weight_pct.iter())
                .map(|(x, y)| (*x, *y)),
            BLUE.stroke_width(1),
        );
        chart.draw_series(line)?;
        for wl in losses {
            let (tx, ty) = (wl.matched_temp + xspan / 30., wl.weight_pct + yspan / 15.);
            chart.draw_series(std::iter::once(Circle::new(
                (wl.matched_temp, wl.weight_pct),
                4,
                BLACK.filled(),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(tx, ty), (wl.matched_temp, wl.weight_pct)],
                BLACK.stroke_width(1),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                wl.plot_label(),
                (tx + xspan / 100., ty),
                ("sans-serif", 20),
            )))?;
        }
        root.present()?;
        Ok(())
    }
}

impl std::fmt::Display for TgaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "temperature_c,weight_pct\n")?;
        for (t, wp) in self.temperature.iter().zip(self.weight_pct.iter()) {
            write!(f, "{},{}\n", t, wp)?
        }
        Ok(())
    }
}

/// weight percent loss resolved at a target temperature,
/// the single source for both the console report and the plot annotation
#[derive(Debug, Clone, Copy)]
pub struct WeightLoss {
    pub target_temp: f64,
    pub matched_temp: f64,
    pub row: usize,
    pub weight_pct: f64,
    pub loss_pct: f64,
}

impl WeightLoss {
    pub fn report_line(&self) -> String {
        format!(
            "At temperature: {} °C, the weight percent loss is: {:.4}%",
            self.target_temp, self.loss_pct
        )
    }

    pub fn plot_label(&self) -> String {
        format!("{} °C, loss {:.4}%", self.target_temp, self.loss_pct)
    }

    /// distance between the requested and the measured temperature
    pub fn deviation(&self) -> f64 {
        (self.matched_temp - self.target_temp).abs()
    }
}

fn parse_csv_row(l: &str, line_number: usize, columns: usize) -> Result<Vec<f64>, TgaError> {
    let split: Vec<&str> = l.split(',').collect();
    if split.len() != columns {
        return Err(TgaError::InvalidData(format!(
            "line {}: expected {} columns, found {}",
            line_number,
            columns,
            split.len()
        )));
    }
    split
        .iter()
        .map(|s| {
            s.trim().parse::<f64>().map_err(|_| {
                TgaError::InvalidData(format!(
                    "line {}: could not parse '{}' as a number",
                    line_number,
                    s.trim()
                ))
            })
        })
        .collect()
}

/// strips directory and extension from the input file name
/// and appends the analysis suffix, outputs go to the working directory
pub fn analysis_base_name(fin: &Path) -> String {
    let stem = fin.file_stem().and_then(|s| s.to_str()).unwrap_or("data");
    format!("{}_analysis", stem)
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}
