use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::model::{SalesRecord, HEADER};
use super::GenerateError;

/// Write the header and every record; returns the number of data rows.
pub fn write_sales_csv<W, I>(writer: W, records: I) -> Result<u64, GenerateError>
where
    W: Write,
    I: IntoIterator<Item = SalesRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;

    let mut rows = 0u64;
    for record in records {
        writer.serialize(&record)?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

pub fn write_sales_file<I>(path: &Path, records: I) -> Result<u64, GenerateError>
where
    I: IntoIterator<Item = SalesRecord>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    write_sales_csv(file, records)
}
