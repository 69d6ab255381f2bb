//! CSV export of filtered collections.
//!
//! Each exportable record type declares a fixed file name and header row. Fields are written through the `csv` crate,
//! so values containing commas, quotes or line breaks are quoted instead of corrupting the row structure.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::instrument;

use crate::dasherr;
use crate::error::Result;
use crate::locale::Localization;

pub trait CsvExport {
    /// File name the export is saved under.
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    fn csv_record(&self, loc: &Localization) -> Vec<String>;
}

/// Writes the header followed by one row per record. Returns the number of data rows written.
pub fn write_csv<'a, R, I, W>(records: I, loc: &Localization, out: W) -> Result<usize>
where
    R: CsvExport + 'a,
    I: IntoIterator<Item = &'a R>,
    W: io::Write,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(R::HEADERS)?;

    let mut rows = 0;
    for record in records {
        writer.write_record(record.csv_record(loc))?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

pub fn csv_string<'a, R, I>(records: I, loc: &Localization) -> Result<String>
where
    R: CsvExport + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut buf = Vec::new();
    write_csv(records, loc, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Saves the export as `dir/<FILE_NAME>`, replacing any previous file. The directory must exist.
#[instrument(level = "debug", skip(records, loc), fields(file = R::FILE_NAME))]
pub fn export_to_dir<'a, R, I>(records: I, loc: &Localization, dir: &Path) -> Result<PathBuf>
where
    R: CsvExport + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if !dir.is_dir() {
        return Err(dasherr!("export target {} is not a directory", dir.display()));
    }

    let path = dir.join(R::FILE_NAME);
    let file = BufWriter::new(File::create(&path)?);
    let rows = write_csv(records, loc, file)?;
    info!("exported {rows} rows to {}", path.display());
    Ok(path)
}
