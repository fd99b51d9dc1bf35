// export.rs
// Tabular export of predictions: CSV curves and a JSON report

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::eis::EisCurve;
use crate::error::Result;
use crate::gcd::{CapacityRow, GcdCurveSet, RatePoint};
use crate::ies::IesSpectrum;
use crate::predictor::Prediction;

pub const GCD_HEADER: &str = "current_a_g,time_h,voltage_v";
pub const EIS_HEADER: &str = "frequency_hz,z_real_ohm,z_imag_ohm";

/// One row per sample, curves in request order
pub fn write_gcd_csv<W: Write>(out: &mut W, set: &GcdCurveSet) -> Result<()> {
    writeln!(out, "{}", GCD_HEADER)?;
    for curve in set.iter() {
        for s in &curve.samples {
            writeln!(out, "{},{},{}", s.current_density_a_g, s.time_h, s.voltage_v)?;
        }
    }
    Ok(())
}

pub fn write_eis_csv<W: Write>(out: &mut W, curve: &EisCurve) -> Result<()> {
    writeln!(out, "{}", EIS_HEADER)?;
    for s in &curve.samples {
        writeln!(out, "{},{},{}", s.frequency_hz, s.z_real_ohm, s.z_imag_ohm)?;
    }
    Ok(())
}

/// Fresh and cycled spectra side by side; both share the frequency sweep
pub fn write_eis_pair_csv<W: Write>(
    out: &mut W,
    fresh: &EisCurve,
    cycled: &EisCurve,
) -> Result<()> {
    writeln!(
        out,
        "frequency_hz,z_real_ohm,z_imag_ohm,z_real_cycled_ohm,z_imag_cycled_ohm"
    )?;
    for (a, b) in fresh.samples.iter().zip(&cycled.samples) {
        writeln!(
            out,
            "{},{},{},{},{}",
            a.frequency_hz, a.z_real_ohm, a.z_imag_ohm, b.z_real_ohm, b.z_imag_ohm
        )?;
    }
    Ok(())
}

pub fn write_rate_csv<W: Write>(
    out: &mut W,
    table: &[CapacityRow],
    rate: &[RatePoint],
) -> Result<()> {
    writeln!(
        out,
        "current_a_g,specific_capacity_c_g,specific_capacitance_f_g,rate_capacity_mah_g"
    )?;
    for (row, point) in table.iter().zip(rate) {
        writeln!(
            out,
            "{},{},{},{}",
            row.current_density_a_g,
            row.specific_capacity_c_g,
            row.specific_capacitance_f_g,
            point.capacity_mah_g
        )?;
    }
    Ok(())
}

pub fn write_ies_csv<W: Write>(out: &mut W, spectrum: &IesSpectrum) -> Result<()> {
    writeln!(out, "energy_ev,intensity")?;
    for s in &spectrum.samples {
        writeln!(out, "{},{}", s.energy_ev, s.intensity)?;
    }
    Ok(())
}

pub fn write_report_json<W: Write>(out: &mut W, prediction: &Prediction) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, prediction)?;
    writeln!(out)?;
    Ok(())
}

/// File stem for a configuration, e.g. "Cu_4_4-bipyridine"
pub fn file_stem(prediction: &Prediction) -> String {
    let config = &prediction.configuration;
    sanitize(&format!("{}_{}", config.metal().symbol, config.ligand()))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn write_file<F>(path: PathBuf, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(&path)?);
    write(&mut out)?;
    out.flush()?;
    tracing::info!(path = %path.display(), "exported");
    Ok(path)
}

/// Write every table of `prediction` into `output_dir`, creating it if needed.
/// Returns the written paths.
pub fn export_prediction(
    prediction: &Prediction,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;
    let stem = file_stem(prediction);

    let path = |kind: &str, ext: &str| dir.join(format!("{}_{}.{}", kind, stem, ext));

    Ok(vec![
        write_file(path("gcd", "csv"), |out| write_gcd_csv(out, &prediction.gcd))?,
        write_file(path("eis", "csv"), |out| {
            write_eis_pair_csv(out, &prediction.eis, &prediction.eis_cycled)
        })?,
        write_file(path("rate", "csv"), |out| {
            write_rate_csv(out, &prediction.capacity_table, &prediction.rate_capability)
        })?,
        write_file(path("ies", "csv"), |out| write_ies_csv(out, &prediction.ies))?,
        write_file(path("report", "json"), |out| write_report_json(out, prediction))?,
    ])
}
