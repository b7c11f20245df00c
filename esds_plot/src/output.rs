use crate::fmt::EnergyType;
use crate::table::Row;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::path::{Path, PathBuf};

pub fn csv_file_name(energy_type: EnergyType) -> String {
    format!("e_{}.csv", energy_type.name())
}

/// Writes `rows` to `e_<energy type>.csv` in `output_dir`, overwriting any
/// previous file.
pub fn write_csv<R: Row>(
    output_dir: impl AsRef<Path>,
    energy_type: EnergyType,
    rows: &[R],
) -> Result<PathBuf, Report> {
    let file_name = csv_file_name(energy_type);
    let path = output_dir.as_ref().join(&file_name);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote(b'|')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        // the header is written even if there are no rows
        .has_headers(false)
        .from_path(&path)
        .wrap_err_with(|| format!("create csv {}", path.display()))?;

    writer
        .write_record(R::HEADER)
        .wrap_err_with(|| format!("write csv header {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .wrap_err_with(|| format!("write csv row {}", path.display()))?;
    }
    writer
        .flush()
        .wrap_err_with(|| format!("flush csv {}", path.display()))?;

    tracing::info!("wrote {} rows to {}", rows.len(), path.display());
    println!("csv: {}", file_name);
    Ok(path)
}
