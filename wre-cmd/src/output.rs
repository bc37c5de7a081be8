//! CSV output to a file or stdout.

use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};

/// A CSV writer over `path`, or over stdout when `path` is `None`.
pub fn csv_writer(path: Option<&str>) -> anyhow::Result<csv::Writer<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    Ok(csv::Writer::from_writer(sink))
}

/// Serialize every row, header first, and flush.
pub fn write_rows<W: Write, T: Serialize>(
    writer: &mut csv::Writer<W>,
    rows: &[T],
) -> anyhow::Result<()> {
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `rows` to `path` (stdout when `None`) and log where they went.
pub fn emit<T: Serialize>(path: Option<&str>, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv_writer(path)?;
    write_rows(&mut writer, rows)?;
    if let Some(path) = path {
        log::info!("Wrote {} rows to {}", rows.len(), path);
    }
    Ok(())
}
